//! Snapshot Reconciliation
//!
//! Turns one full store snapshot into the render plan for the list region.

use crate::models::{Item, ItemStatus};

/// The per-item data needed to draw one list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRecord {
    pub id: String,
    pub text: String,
    pub status: ItemStatus,
}

/// Complete render plan for one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPlan {
    pub records: Vec<RenderRecord>,
    pub count: usize,
}

/// Build the render plan for a snapshot.
///
/// Pure and idempotent: equal snapshots always produce equal plans, and the
/// plan covers the whole snapshot or nothing. Records keep the snapshot's
/// own order; no sort key is applied, so the list order is whatever order
/// the store delivered.
pub fn reconcile(snapshot: &[Item]) -> RenderPlan {
    let records: Vec<RenderRecord> = snapshot
        .iter()
        .map(|item| RenderRecord {
            id: item.id.clone(),
            text: item.text.clone(),
            status: item.status,
        })
        .collect();
    let count = records.len();
    RenderPlan { records, count }
}

//! Frontend Models
//!
//! Data structures matching the stored document shape.

use serde::{Deserialize, Serialize};

/// Completion status of an item
///
/// Stored as a lowercase string in the document; any other stored value is
/// read back as `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ItemStatus {
    #[default]
    Active,
    Completed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "completed" => ItemStatus::Completed,
            _ => ItemStatus::Active,
        }
    }

    /// The other status; toggling is the only transition an item ever makes.
    pub fn toggled(&self) -> Self {
        match self {
            ItemStatus::Active => ItemStatus::Completed,
            ItemStatus::Completed => ItemStatus::Active,
        }
    }

    pub fn is_completed(&self) -> bool {
        *self == ItemStatus::Completed
    }
}

impl From<String> for ItemStatus {
    fn from(s: String) -> Self {
        ItemStatus::from_str(&s)
    }
}

/// A to-do list entry: one stored document plus its store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub status: ItemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_statuses() {
        assert_eq!(ItemStatus::Active.toggled(), ItemStatus::Completed);
        assert_eq!(ItemStatus::Completed.toggled(), ItemStatus::Active);
        assert_eq!(ItemStatus::Active.toggled().toggled(), ItemStatus::Active);
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&ItemStatus::Active).unwrap(), "\"active\"");
        assert_eq!(
            serde_json::to_string(&ItemStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn unknown_status_reads_back_as_active() {
        assert_eq!(ItemStatus::from_str("archived"), ItemStatus::Active);
        let status: ItemStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, ItemStatus::Active);
    }

    #[test]
    fn item_deserializes_from_document_shape() {
        let item: Item =
            serde_json::from_str(r#"{"id":"doc-1","text":"Buy milk","status":"completed"}"#)
                .unwrap();
        assert_eq!(item.id, "doc-1");
        assert_eq!(item.text, "Buy milk");
        assert_eq!(item.status, ItemStatus::Completed);
    }
}

//! Inventory record: a payload attached to an area.
//!
//! The store never looks inside a record. It is kept as raw JSON so whatever
//! the inventory screens write survives unrelated edits to the surrounding tree.

use serde::{Deserialize, Serialize};

/// Opaque inventory payload carried through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryRecord(serde_json::Value);

impl InventoryRecord {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for InventoryRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

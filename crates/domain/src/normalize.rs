//! Id back-fill for partially constructed trees.
//!
//! Callers sometimes hand back a location whose newly added counters or areas
//! were built by hand and never got an id. Before such a tree is saved every
//! nested entity must have one.

use crate::id::{AreaId, CounterId};
use crate::location::Location;

/// Assign a fresh id to every counter and area whose id is blank.
///
/// Entities that already have an id keep it. Nothing else is touched.
#[must_use]
pub fn normalize_tree(mut location: Location) -> Location {
    for counter in &mut location.counters {
        if counter.id.is_blank() {
            counter.id = CounterId::generate();
        }
        for area in &mut counter.areas {
            if area.id.is_blank() {
                area.id = AreaId::generate();
            }
        }
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_nested_ids_and_keep_existing_ones() {
        let json = r#"{
            "id": "loc_1",
            "name": "Main Bar",
            "counters": [
                {"id": "ctr_1", "name": "Front", "areas": [
                    {"id": "area_1", "name": "Well"},
                    {"name": "Speed Rail"}
                ]},
                {"name": "Back", "areas": [{"id": "", "name": "Fridge"}]}
            ]
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();

        let normalized = normalize_tree(location);

        assert_eq!(normalized.id.as_str(), "loc_1");
        let front = &normalized.counters[0];
        assert_eq!(front.id.as_str(), "ctr_1");
        assert_eq!(front.areas[0].id.as_str(), "area_1");
        assert!(front.areas[1].id.as_str().starts_with("area_"));

        let back = &normalized.counters[1];
        assert!(back.id.as_str().starts_with("ctr_"));
        assert!(!back.areas[0].id.is_blank());
    }

    #[test]
    fn should_leave_complete_tree_unchanged() {
        let json = r#"{"id":"loc_1","name":"Main Bar","counters":[{"id":"ctr_1","name":"Front","areas":[{"id":"area_1","name":"Well","inventoryRecords":[{"n":1}]}]}]}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(normalize_tree(location.clone()), location);
    }
}

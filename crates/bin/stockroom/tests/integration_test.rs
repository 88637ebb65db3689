//! End-to-end tests for the full stockroom stack.
//!
//! Each test wires the real location store to the real `SQLite` repository
//! backed by an in-memory database: no file is written.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stockroom_adapter_storage_sqlite_sqlx::{Config, Database, SqliteLocationRepository};
use stockroom_app::services::location_store::LocationStore;
use stockroom_domain::area::NewArea;
use stockroom_domain::counter::NewCounter;
use stockroom_domain::error::StockroomError;
use stockroom_domain::location::{Location, NewLocation};

async fn database() -> Database {
    Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise")
}

fn store(db: &Database) -> LocationStore<SqliteLocationRepository> {
    LocationStore::new(SqliteLocationRepository::new(db.pool().clone()))
}

#[tokio::test]
async fn should_build_and_read_back_a_bar() {
    let db = database().await;
    let store = store(&db);

    let location = store
        .add_location(NewLocation::named("Main Bar"))
        .await
        .unwrap();
    let counter = store
        .add_counter(&location.id, NewCounter::named("Front"))
        .await
        .unwrap();
    store
        .add_area(
            &location.id,
            &counter.id,
            NewArea::named("Top Shelf").with_display_order(1.0),
        )
        .await
        .unwrap();

    let fetched = store.location(&location.id).unwrap();
    assert_eq!(fetched.counters.len(), 1);
    assert_eq!(fetched.counters[0].name, "Front");
    let areas = &fetched.counters[0].areas;
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].name, "Top Shelf");
    assert_eq!(areas[0].display_order, Some(1.0));
    assert!(areas[0].inventory_records.is_empty());
}

#[tokio::test]
async fn should_reload_everything_into_a_fresh_store() {
    let db = database().await;
    let writer = store(&db);
    let bar = writer
        .add_location(NewLocation::named("Main Bar").with_address("1 Quay St"))
        .await
        .unwrap();
    let front = writer
        .add_counter(&bar.id, NewCounter::named("Front"))
        .await
        .unwrap();
    for name in ["Well", "Back Shelf", "Fridge"] {
        writer
            .add_area(&bar.id, &front.id, NewArea::named(name))
            .await
            .unwrap();
    }
    writer
        .add_location(NewLocation::named("Rooftop"))
        .await
        .unwrap();

    let reader = store(&db);
    let notified = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&notified);
    reader.subscribe(move |locations: &[Location]| {
        seen.store(locations.len(), Ordering::SeqCst);
    });
    reader.load_locations().await.unwrap();

    assert_eq!(reader.locations(), writer.locations());
    assert_eq!(notified.load(Ordering::SeqCst), 2);
    let areas: Vec<String> = reader
        .counter(&bar.id, &front.id)
        .unwrap()
        .areas
        .into_iter()
        .map(|area| area.name)
        .collect();
    assert_eq!(areas, ["Back Shelf", "Fridge", "Well"]);
}

#[tokio::test]
async fn should_persist_deletes_at_every_level() {
    let db = database().await;
    let writer = store(&db);
    let bar = writer
        .add_location(NewLocation::named("Main Bar"))
        .await
        .unwrap();
    let front = writer
        .add_counter(&bar.id, NewCounter::named("Front"))
        .await
        .unwrap();
    let back = writer
        .add_counter(&bar.id, NewCounter::named("Back"))
        .await
        .unwrap();
    let well = writer
        .add_area(&bar.id, &front.id, NewArea::named("Well"))
        .await
        .unwrap();
    let rooftop = writer
        .add_location(NewLocation::named("Rooftop"))
        .await
        .unwrap();

    writer.delete_area(&bar.id, &front.id, &well.id).await.unwrap();
    writer.delete_counter(&bar.id, &back.id).await.unwrap();
    writer.delete_location(&rooftop.id).await.unwrap();

    let reader = store(&db);
    reader.load_locations().await.unwrap();
    let locations = reader.locations();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].counters.len(), 1);
    assert_eq!(locations[0].counters[0].id, front.id);
    assert!(locations[0].counters[0].areas.is_empty());
}

#[tokio::test]
async fn should_persist_backfilled_ids_from_hand_built_tree() {
    let db = database().await;
    let writer = store(&db);
    let bar = writer
        .add_location(NewLocation::named("Main Bar"))
        .await
        .unwrap();
    let mut edited: Location = serde_json::from_value(serde_json::json!({
        "id": bar.id,
        "name": "Main Bar",
        "counters": [{"name": "Front", "areas": [{"name": "Well", "displayOrder": 1}]}]
    }))
    .unwrap();
    edited.address = Some("1 Quay St".to_string());

    writer.update_location(edited).await.unwrap();

    let reader = store(&db);
    reader.load_locations().await.unwrap();
    let loaded = reader.location(&bar.id).unwrap();
    assert_eq!(loaded.address.as_deref(), Some("1 Quay St"));
    assert!(loaded.counters[0].id.as_str().starts_with("ctr_"));
    assert!(loaded.counters[0].areas[0].id.as_str().starts_with("area_"));
    assert_eq!(loaded, writer.location(&bar.id).unwrap());
}

#[tokio::test]
async fn should_reject_blank_name_without_touching_storage() {
    let db = database().await;
    let writer = store(&db);

    let result = writer.add_location(NewLocation::named("  ")).await;
    assert!(matches!(result, Err(StockroomError::Validation(_))));

    let reader = store(&db);
    reader.load_locations().await.unwrap();
    assert!(reader.locations().is_empty());
}

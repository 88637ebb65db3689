//! `SQLite` implementation of [`LocationRepository`].
//!
//! Each location is one row holding the serialized aggregate. The `name`
//! column is a copy kept for ad-hoc inspection; reads only use `document`.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use stockroom_app::ports::LocationRepository;
use stockroom_domain::error::StockroomError;
use stockroom_domain::id::LocationId;
use stockroom_domain::location::Location;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Location`].
struct Wrapper(Location);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let document: String = row.try_get("document")?;
        let location =
            serde_json::from_str(&document).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Self(location))
    }
}

const UPSERT: &str = "INSERT INTO locations (id, name, document, updated_at) VALUES (?, ?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, document = excluded.document, updated_at = excluded.updated_at";
const SELECT_ALL: &str = "SELECT document FROM locations ORDER BY rowid";
const DELETE_BY_ID: &str = "DELETE FROM locations WHERE id = ?";

/// `SQLite`-backed location repository.
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn load_all(&self) -> impl Future<Output = Result<Vec<Location>, StockroomError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn save(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<LocationId, StockroomError>> + Send {
        let pool = self.pool.clone();
        async move {
            let document = serde_json::to_string(&location).map_err(StorageError::from)?;

            sqlx::query(UPSERT)
                .bind(location.id.as_str())
                .bind(&location.name)
                .bind(document)
                .bind(chrono::Utc::now().to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(location.id)
        }
    }

    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), StockroomError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use stockroom_domain::area::Area;
    use stockroom_domain::counter::Counter;
    use stockroom_domain::inventory::InventoryRecord;

    async fn setup() -> SqliteLocationRepository {
        let db = Config::new("sqlite::memory:").build().await.unwrap();
        SqliteLocationRepository::new(db.pool().clone())
    }

    fn test_location(name: &str) -> Location {
        Location::builder().name(name).build().unwrap()
    }

    #[tokio::test]
    async fn should_save_and_load_location_when_valid() {
        let repo = setup().await;
        let location = test_location("Main Bar");
        let id = location.id.clone();

        let saved_id = repo.save(location).await.unwrap();
        assert_eq!(saved_id, id);

        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].name, "Main Bar");
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_stored() {
        let repo = setup().await;
        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_store_whole_nested_tree() {
        let repo = setup().await;
        let area = Area::builder()
            .name("Top Shelf")
            .display_order(1.0)
            .inventory_record(InventoryRecord::new(
                serde_json::json!({"sku": "GIN-01", "count": 4}),
            ))
            .build()
            .unwrap();
        let location = Location::builder()
            .name("Main Bar")
            .address("1 Quay St")
            .counter(Counter::builder().name("Front").area(area).build().unwrap())
            .build()
            .unwrap();

        repo.save(location.clone()).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded, vec![location]);
    }

    #[tokio::test]
    async fn should_replace_document_when_saved_again() {
        let repo = setup().await;
        let mut location = test_location("Main Bar");
        repo.save(location.clone()).await.unwrap();

        location.name = "Main Bar & Grill".to_string();
        location
            .counters
            .push(Counter::builder().name("Front").build().unwrap());
        repo.save(location.clone()).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded, vec![location]);
    }

    #[tokio::test]
    async fn should_load_in_first_insertion_order() {
        let repo = setup().await;
        let first = test_location("First");
        let second = test_location("Second");
        repo.save(first.clone()).await.unwrap();
        repo.save(second.clone()).await.unwrap();
        repo.save(first.clone()).await.unwrap();

        let names: Vec<String> = repo
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[tokio::test]
    async fn should_delete_location_when_exists() {
        let repo = setup().await;
        let location = test_location("Main Bar");
        let id = location.id.clone();
        repo.save(location).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_ignore_delete_of_unknown_id() {
        let repo = setup().await;
        repo.save(test_location("Main Bar")).await.unwrap();

        repo.delete(LocationId::generate()).await.unwrap();

        assert_eq!(repo.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_report_storage_error_when_document_is_corrupt() {
        let repo = setup().await;
        sqlx::query("INSERT INTO locations (id, name, document, updated_at) VALUES ('loc_x', 'x', 'not json', '')")
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.load_all().await;

        assert!(matches!(result, Err(StockroomError::Storage(_))));
    }
}

//! Failures while reading or writing location documents.
//!
//! Everything here ends up as [`StockroomError::Storage`]; the store never
//! inspects the variant, only logs and propagates it.

use stockroom_domain::error::StockroomError;

/// Errors raised by the `SQLite` location repository.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The locations table could not be queried or written.
    #[error("location query failed")]
    Database(#[from] sqlx::Error),

    /// A location tree could not be turned into its stored document, or a
    /// stored document no longer parses as a location.
    #[error("invalid location document")]
    Json(#[from] serde_json::Error),

    /// The locations schema could not be brought up to date.
    #[error("failed to migrate the locations schema")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for StockroomError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

//! Storage port: persistence of whole location aggregates.
//!
//! The store never saves a counter or an area on its own. Every nested change
//! re-saves the owning location, so one document per location is all an
//! adapter has to handle.

use std::future::Future;

use stockroom_domain::error::StockroomError;
use stockroom_domain::id::LocationId;
use stockroom_domain::location::Location;

/// Repository for persisting [`Location`] aggregates.
pub trait LocationRepository {
    /// Load every stored location.
    fn load_all(&self) -> impl Future<Output = Result<Vec<Location>, StockroomError>> + Send;

    /// Insert or replace a location, including its whole nested tree.
    fn save(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<LocationId, StockroomError>> + Send;

    /// Remove a location and everything nested inside it.
    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), StockroomError>> + Send;
}

impl<T: LocationRepository + Send + Sync> LocationRepository for std::sync::Arc<T> {
    fn load_all(&self) -> impl Future<Output = Result<Vec<Location>, StockroomError>> + Send {
        (**self).load_all()
    }

    fn save(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<LocationId, StockroomError>> + Send {
        (**self).save(location)
    }

    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), StockroomError>> + Send {
        (**self).delete(id)
    }
}

//! Location store: in-memory cache of the location → counter → area tree.
//!
//! Reads are served from memory and always hand out copies. Every change,
//! however deep, re-saves the whole owning location through the repository
//! and then notifies subscribers with a snapshot of all locations.
//!
//! Nested changes are applied to the cached tree before the save is awaited
//! and are not rolled back if the save fails, so the cache can run ahead of
//! storage until the next successful save or [`LocationStore::load_locations`].
//!
//! Calls only interleave while a save is in flight. There is no version check:
//! two concurrent changes to the same location race and the save that finishes
//! last wins, both in storage and in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};

use stockroom_domain::area::{Area, NewArea};
use stockroom_domain::counter::{Counter, NewCounter};
use stockroom_domain::error::{NotFoundError, StockroomError};
use stockroom_domain::id::{AreaId, CounterId, LocationId};
use stockroom_domain::location::{Location, NewLocation};
use stockroom_domain::normalize::normalize_tree;
use stockroom_domain::ordering::sort_areas;

use crate::ports::LocationRepository;
use crate::subscribers::{SubscriberRegistry, Subscription};

/// Application service owning the cached locations and their subscribers.
pub struct LocationStore<R> {
    repo: R,
    locations: Mutex<Vec<Location>>,
    subscribers: SubscriberRegistry,
}

impl<R: LocationRepository> LocationStore<R> {
    /// Create an empty store backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            locations: Mutex::new(Vec::new()),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Copy of every cached location, in insertion order.
    #[must_use]
    pub fn locations(&self) -> Vec<Location> {
        self.state().clone()
    }

    /// Copy of one cached location.
    #[must_use]
    pub fn location(&self, id: &LocationId) -> Option<Location> {
        self.state().iter().find(|location| &location.id == id).cloned()
    }

    #[must_use]
    pub fn counter(&self, location_id: &LocationId, counter_id: &CounterId) -> Option<Counter> {
        self.state()
            .iter()
            .find(|location| &location.id == location_id)
            .and_then(|location| location.counter(counter_id))
            .cloned()
    }

    #[must_use]
    pub fn area(
        &self,
        location_id: &LocationId,
        counter_id: &CounterId,
        area_id: &AreaId,
    ) -> Option<Area> {
        self.state()
            .iter()
            .find(|location| &location.id == location_id)
            .and_then(|location| location.counter(counter_id))
            .and_then(|counter| counter.area(area_id))
            .cloned()
    }

    /// Replace the cache with everything the repository holds.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache keeps its previous content.
    #[tracing::instrument(skip(self))]
    pub async fn load_locations(&self) -> Result<(), StockroomError> {
        let loaded = self
            .repo
            .load_all()
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to load locations"))?;

        tracing::info!(count = loaded.len(), "locations loaded");
        *self.state() = loaded;
        self.notify();
        Ok(())
    }

    /// Create a location with no counters.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if the name is blank, or a
    /// storage error from the repository. Nothing is cached unless the save
    /// succeeds.
    #[tracing::instrument(skip(self, new), fields(location_name = %new.name))]
    pub async fn add_location(&self, new: NewLocation) -> Result<Location, StockroomError> {
        let location = new.build()?;
        self.persist(location.clone()).await?;
        self.state().push(location.clone());
        self.notify();
        Ok(location)
    }

    /// Save a whole location tree and replace the cached copy.
    ///
    /// Counters and areas without an id get one before saving. The returned
    /// location is the tree exactly as saved.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if no location with that id is
    /// cached (this is not an upsert), [`StockroomError::Validation`] if two
    /// siblings share an id, or a storage error from the repository.
    #[tracing::instrument(skip(self, location), fields(location_id = %location.id))]
    pub async fn update_location(&self, location: Location) -> Result<Location, StockroomError> {
        if !self.contains(&location.id) {
            return Err(NotFoundError::new("location", &location.id).into());
        }

        let location = normalize_tree(location);
        location.ensure_unique_ids()?;
        self.persist(location.clone()).await?;

        if !self.replace(&location) {
            tracing::warn!("location was deleted while its save was in flight");
        }
        self.notify();
        Ok(location)
    }

    /// Delete a location and everything inside it.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if no location with that id is
    /// cached, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_location(&self, id: &LocationId) -> Result<(), StockroomError> {
        if !self.contains(id) {
            return Err(NotFoundError::new("location", id).into());
        }

        self.repo.delete(id.clone()).await.inspect_err(
            |err| tracing::error!(location_id = %id, error = %err, "failed to delete location"),
        )?;

        self.state().retain(|location| &location.id != id);
        self.notify();
        Ok(())
    }

    /// Append a new, empty counter to a location.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if the name is blank,
    /// [`StockroomError::NotFound`] if the location is unknown, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, new), fields(counter_name = %new.name))]
    pub async fn add_counter(
        &self,
        location_id: &LocationId,
        new: NewCounter,
    ) -> Result<Counter, StockroomError> {
        let counter = new.build()?;
        let counter_id = counter.id.clone();
        let saved = self
            .modify(location_id, |location| {
                location.counters.push(counter);
                Ok(())
            })
            .await?;
        saved_counter(&saved, &counter_id)
    }

    /// Replace a counter, including its areas, by id.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if the location or counter is
    /// unknown, or a storage error from the repository.
    #[tracing::instrument(skip(self, counter), fields(counter_id = %counter.id))]
    pub async fn update_counter(
        &self,
        location_id: &LocationId,
        counter: Counter,
    ) -> Result<Counter, StockroomError> {
        let counter_id = counter.id.clone();
        let saved = self
            .modify(location_id, |location| {
                let slot = location
                    .counter_mut(&counter.id)
                    .ok_or_else(|| NotFoundError::new("counter", &counter.id))?;
                *slot = counter;
                Ok(())
            })
            .await?;
        saved_counter(&saved, &counter_id)
    }

    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if the location or counter is
    /// unknown, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_counter(
        &self,
        location_id: &LocationId,
        counter_id: &CounterId,
    ) -> Result<(), StockroomError> {
        self.modify(location_id, |location| {
            let index = location
                .counters
                .iter()
                .position(|counter| &counter.id == counter_id)
                .ok_or_else(|| NotFoundError::new("counter", counter_id))?;
            location.counters.remove(index);
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Add a new, empty area to a counter and re-sort the counter's areas.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if the name is blank,
    /// [`StockroomError::NotFound`] if the location or counter is unknown, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self, new), fields(area_name = %new.name))]
    pub async fn add_area(
        &self,
        location_id: &LocationId,
        counter_id: &CounterId,
        new: NewArea,
    ) -> Result<Area, StockroomError> {
        let area = new.build()?;
        let area_id = area.id.clone();
        let saved = self
            .modify(location_id, |location| {
                let counter = find_counter(location, counter_id)?;
                counter.areas.push(area);
                sort_areas(&mut counter.areas);
                Ok(())
            })
            .await?;
        saved_area(&saved, counter_id, &area_id)
    }

    /// Replace an area by id and re-sort the counter's areas.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if the location, counter or area
    /// is unknown, or a storage error from the repository.
    #[tracing::instrument(skip(self, area), fields(area_id = %area.id))]
    pub async fn update_area(
        &self,
        location_id: &LocationId,
        counter_id: &CounterId,
        area: Area,
    ) -> Result<Area, StockroomError> {
        let area_id = area.id.clone();
        let saved = self
            .modify(location_id, |location| {
                let counter = find_counter(location, counter_id)?;
                let slot = counter
                    .area_mut(&area.id)
                    .ok_or_else(|| NotFoundError::new("area", &area.id))?;
                *slot = area;
                sort_areas(&mut counter.areas);
                Ok(())
            })
            .await?;
        saved_area(&saved, counter_id, &area_id)
    }

    /// Remove an area. The remaining areas keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::NotFound`] if the location, counter or area
    /// is unknown, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_area(
        &self,
        location_id: &LocationId,
        counter_id: &CounterId,
        area_id: &AreaId,
    ) -> Result<(), StockroomError> {
        self.modify(location_id, |location| {
            let counter = find_counter(location, counter_id)?;
            let index = counter
                .areas
                .iter()
                .position(|area| &area.id == area_id)
                .ok_or_else(|| NotFoundError::new("area", area_id))?;
            counter.areas.remove(index);
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Register a callback invoked with every location after each change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Location]) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a registration; does nothing if it is already gone.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.subscribers.unsubscribe(subscription);
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Forget every cached location and subscriber. Storage is left alone.
    pub fn reset(&self) {
        self.state().clear();
        self.subscribers.clear();
    }

    /// Apply `mutate` to a copy of one cached location and, if the result is
    /// a valid tree, write it into the cache and save it through
    /// [`Self::update_location`]. A rejected change leaves the cache untouched.
    async fn modify<F>(&self, location_id: &LocationId, mutate: F) -> Result<Location, StockroomError>
    where
        F: FnOnce(&mut Location) -> Result<(), StockroomError>,
    {
        let draft = {
            let mut state = self.state();
            let cached = state
                .iter_mut()
                .find(|location| &location.id == location_id)
                .ok_or_else(|| NotFoundError::new("location", location_id))?;
            let mut draft = cached.clone();
            mutate(&mut draft)?;
            let draft = normalize_tree(draft);
            draft.ensure_unique_ids()?;
            cached.clone_from(&draft);
            draft
        };
        self.update_location(draft).await
    }

    async fn persist(&self, location: Location) -> Result<LocationId, StockroomError> {
        let id = location.id.clone();
        self.repo.save(location).await.inspect_err(
            |err| tracing::error!(location_id = %id, error = %err, "failed to save location"),
        )
    }

    fn contains(&self, id: &LocationId) -> bool {
        self.state().iter().any(|location| &location.id == id)
    }

    fn replace(&self, location: &Location) -> bool {
        let mut state = self.state();
        match state.iter_mut().find(|cached| cached.id == location.id) {
            Some(slot) => {
                slot.clone_from(location);
                true
            }
            None => false,
        }
    }

    fn notify(&self) {
        let snapshot = self.locations();
        self.subscribers.notify(&snapshot);
    }

    fn state(&self) -> MutexGuard<'_, Vec<Location>> {
        self.locations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn find_counter<'a>(
    location: &'a mut Location,
    counter_id: &CounterId,
) -> Result<&'a mut Counter, StockroomError> {
    location
        .counter_mut(counter_id)
        .ok_or_else(|| NotFoundError::new("counter", counter_id).into())
}

fn saved_counter(saved: &Location, counter_id: &CounterId) -> Result<Counter, StockroomError> {
    saved
        .counter(counter_id)
        .cloned()
        .ok_or_else(|| NotFoundError::new("counter", counter_id).into())
}

fn saved_area(
    saved: &Location,
    counter_id: &CounterId,
    area_id: &AreaId,
) -> Result<Area, StockroomError> {
    saved
        .counter(counter_id)
        .and_then(|counter| counter.area(area_id))
        .cloned()
        .ok_or_else(|| NotFoundError::new("area", area_id).into())
}

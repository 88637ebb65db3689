//! Location: a venue; the root aggregate and the unit of persistence.
//!
//! Counters and areas never get saved on their own: any change anywhere in
//! the tree re-saves the whole location.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::counter::Counter;
use crate::error::{StockroomError, ValidationError};
use crate::id::{CounterId, LocationId};

/// A venue and everything nested inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub counters: Vec<Counter>,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] when `name` is blank or a
    /// sibling id repeats.
    pub fn validate(&self) -> Result<(), StockroomError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { entity: "location" }.into());
        }
        self.ensure_unique_ids()
    }

    /// Check that no two counters, and no two areas of the same counter,
    /// share an id. Blank ids count too, so run [`crate::normalize::normalize_tree`]
    /// first on hand-built trees.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] naming the first repeated id.
    pub fn ensure_unique_ids(&self) -> Result<(), StockroomError> {
        let mut counter_ids = HashSet::new();
        for counter in &self.counters {
            if !counter_ids.insert(&counter.id) {
                return Err(duplicate("counter", &counter.id));
            }
            let mut area_ids = HashSet::new();
            for area in &counter.areas {
                if !area_ids.insert(&area.id) {
                    return Err(duplicate("area", &area.id));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn counter(&self, id: &CounterId) -> Option<&Counter> {
        self.counters.iter().find(|counter| &counter.id == id)
    }

    pub fn counter_mut(&mut self, id: &CounterId) -> Option<&mut Counter> {
        self.counters.iter_mut().find(|counter| &counter.id == id)
    }
}

fn duplicate(entity: &'static str, id: impl ToString) -> StockroomError {
    ValidationError::DuplicateId {
        entity,
        id: id.to_string(),
    }
    .into()
}

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    id: Option<LocationId>,
    name: Option<String>,
    address: Option<String>,
    counters: Vec<Counter>,
}

impl LocationBuilder {
    #[must_use]
    pub fn id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn counter(mut self, counter: Counter) -> Self {
        self.counters.push(counter);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Location, StockroomError> {
        let location = Location {
            id: self.id.unwrap_or_else(LocationId::generate),
            name: self.name.unwrap_or_default().trim().to_owned(),
            address: self.address,
            counters: self.counters,
        };
        location.validate()?;
        Ok(location)
    }
}

/// Caller-supplied fields for creating a location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLocation {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewLocation {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Build a fully formed [`Location`] with a fresh id and no counters.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is blank.
    pub fn build(self) -> Result<Location, StockroomError> {
        let mut builder = Location::builder().name(self.name);
        if let Some(address) = self.address {
            builder = builder.address(address);
        }
        builder.build()
    }
}

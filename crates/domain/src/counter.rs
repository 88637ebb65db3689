//! Counter: a bar, back bar or stock room inside a location.

use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::error::{StockroomError, ValidationError};
use crate::id::{AreaId, CounterId};

/// A counter owns its areas; it is only ever addressed through its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    #[serde(default)]
    pub id: CounterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl Counter {
    /// Create a builder for constructing a [`Counter`].
    #[must_use]
    pub fn builder() -> CounterBuilder {
        CounterBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), StockroomError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { entity: "counter" }.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn area(&self, id: &AreaId) -> Option<&Area> {
        self.areas.iter().find(|area| &area.id == id)
    }

    pub fn area_mut(&mut self, id: &AreaId) -> Option<&mut Area> {
        self.areas.iter_mut().find(|area| &area.id == id)
    }
}

/// Step-by-step builder for [`Counter`].
#[derive(Debug, Default)]
pub struct CounterBuilder {
    id: Option<CounterId>,
    name: Option<String>,
    description: Option<String>,
    areas: Vec<Area>,
}

impl CounterBuilder {
    #[must_use]
    pub fn id(mut self, id: CounterId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn area(mut self, area: Area) -> Self {
        self.areas.push(area);
        self
    }

    /// Consume the builder, validate, and return a [`Counter`].
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Counter, StockroomError> {
        let counter = Counter {
            id: self.id.unwrap_or_else(CounterId::generate),
            name: self.name.unwrap_or_default().trim().to_owned(),
            description: self.description,
            areas: self.areas,
        };
        counter.validate()?;
        Ok(counter)
    }
}

/// Caller-supplied fields for creating a counter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCounter {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCounter {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Build a fully formed [`Counter`] with a fresh id and no areas.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is blank.
    pub fn build(self) -> Result<Counter, StockroomError> {
        let mut builder = Counter::builder().name(self.name);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

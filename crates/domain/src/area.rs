//! Area: a shelf, well or fridge inside a counter, holding inventory records.

use serde::{Deserialize, Serialize};

use crate::error::{StockroomError, ValidationError};
use crate::id::AreaId;
use crate::inventory::InventoryRecord;

/// A sortable subdivision of a counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(default)]
    pub id: AreaId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort key among sibling areas; areas without one sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<f64>,
    #[serde(default)]
    pub inventory_records: Vec<InventoryRecord>,
}

impl Area {
    /// Create a builder for constructing an [`Area`].
    #[must_use]
    pub fn builder() -> AreaBuilder {
        AreaBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), StockroomError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { entity: "area" }.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Area`].
#[derive(Debug, Default)]
pub struct AreaBuilder {
    id: Option<AreaId>,
    name: Option<String>,
    description: Option<String>,
    display_order: Option<f64>,
    inventory_records: Vec<InventoryRecord>,
}

impl AreaBuilder {
    #[must_use]
    pub fn id(mut self, id: AreaId) -> Self {
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
    pub fn display_order(mut self, display_order: f64) -> Self {
        self.display_order = Some(display_order);
        self
    }

    #[must_use]
    pub fn inventory_record(mut self, record: InventoryRecord) -> Self {
        self.inventory_records.push(record);
        self
    }

    /// Consume the builder, validate, and return an [`Area`].
    ///
    /// The name is stored trimmed and a fresh id is generated unless one was set.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Area, StockroomError> {
        let area = Area {
            id: self.id.unwrap_or_else(AreaId::generate),
            name: self.name.unwrap_or_default().trim().to_owned(),
            description: self.description,
            display_order: self.display_order,
            inventory_records: self.inventory_records,
        };
        area.validate()?;
        Ok(area)
    }
}

/// Caller-supplied fields for creating an area.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArea {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<f64>,
}

impl NewArea {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display_order(mut self, display_order: f64) -> Self {
        self.display_order = Some(display_order);
        self
    }

    /// Build a fully formed [`Area`] with a fresh id and no inventory records.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Validation`] if `name` is blank.
    pub fn build(self) -> Result<Area, StockroomError> {
        let mut builder = Area::builder().name(self.name);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(display_order) = self.display_order {
            builder = builder.display_order(display_order);
        }
        builder.build()
    }
}

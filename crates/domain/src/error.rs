//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StockroomError`] via `From`.

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum StockroomError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence collaborator failed. Adapters box their own error type.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated by caller-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required name was empty or whitespace only.
    #[error("{entity} name must not be empty")]
    EmptyName { entity: &'static str },

    /// Two siblings in the same collection carry the same id.
    #[error("duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },
}

/// A referenced location, counter or area does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_empty_name_with_entity_kind() {
        let err: StockroomError = ValidationError::EmptyName { entity: "location" }.into();
        assert_eq!(err.to_string(), "location name must not be empty");
    }

    #[test]
    fn should_describe_duplicate_id_with_entity_kind() {
        let err: StockroomError = ValidationError::DuplicateId {
            entity: "area",
            id: "area_1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "duplicate area id: area_1");
    }

    #[test]
    fn should_describe_missing_entity_with_id() {
        let err: StockroomError = NotFoundError::new("counter", "ctr_123").into();
        assert_eq!(err.to_string(), "counter not found: ctr_123");
    }

    #[test]
    fn should_expose_boxed_storage_source() {
        let io = std::io::Error::other("disk full");
        let err = StockroomError::Storage(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk full");
    }
}

//! Typed identifier newtypes.
//!
//! Identifiers are plain strings carrying a short prefix (`loc`, `ctr`,
//! `area`) so they can be told apart in logs. A blank identifier stands for
//! "not assigned yet", which happens when a caller hand-builds part of a tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a collision-resistant identifier of the form `<prefix>_<uuid>`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $prefix:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by [`Self::generate`].
            pub const PREFIX: &'static str = $prefix;

            /// Generate a new unique identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(generate_id(Self::PREFIX))
            }

            /// An unassigned identifier.
            #[must_use]
            pub fn blank() -> Self {
                Self(String::new())
            }

            /// Whether no usable identifier has been assigned.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Location`](crate::location::Location).
    LocationId,
    "loc"
);

define_id!(
    /// Identifier for a [`Counter`](crate::counter::Counter), unique within its location.
    CounterId,
    "ctr"
);

define_id!(
    /// Identifier for an [`Area`](crate::area::Area), unique within its counter.
    AreaId,
    "area"
);

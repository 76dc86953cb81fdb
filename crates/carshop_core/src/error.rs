//! Service-level error taxonomy.
//!
//! # Invariants
//! - `NotFound`, `UnsupportedAttribute` and `InvalidValue` are distinct
//!   caller mistakes and are never converted into each other.
//! - Storage failures pass through as `Storage` without reinterpretation.

use crate::model::EntityKind;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DomainResult<T> = Result<T, DomainError>;

/// Error surfaced by service operations.
#[derive(Debug)]
pub enum DomainError {
    /// Identifier does not resolve in storage.
    NotFound { entity: EntityKind, id: i64 },
    /// Filter/sort key is outside the entity's supported set.
    UnsupportedAttribute { entity: EntityKind, key: String },
    /// Raw parameter failed coercion for a recognized attribute.
    InvalidValue {
        key: String,
        raw: String,
        reason: String,
    },
    /// Opaque persistence failure.
    Storage(RepoError),
}

impl DomainError {
    /// Stable short code for log fields and boundary mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::UnsupportedAttribute { .. } => "unsupported_attribute",
            Self::InvalidValue { .. } => "invalid_value",
            Self::Storage(_) => "storage",
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} with id {id} not found"),
            Self::UnsupportedAttribute { entity, key } => {
                write!(f, "unsupported {entity} attribute `{key}`")
            }
            Self::InvalidValue { key, raw, reason } => {
                write!(f, "invalid value `{raw}` for attribute `{key}`: {reason}")
            }
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

//! Domain model for the car shop collections.
//!
//! # Responsibility
//! - Define the records managed by core (cars, orders, users).
//! - Name each collection with a stable `EntityKind` used by errors and logs.
//!
//! # Invariants
//! - A record id of `None` means "not persisted yet"; storage assigns ids.
//! - Record equality compares every field, including the id.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod car;
pub mod order;
pub mod user;

/// Managed record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Car,
    Order,
    User,
}

impl EntityKind {
    /// Stable lowercase name used in errors and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Order => "order",
            Self::User => "user",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

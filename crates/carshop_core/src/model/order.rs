//! Order record.
//!
//! # Invariants
//! - `date` is a calendar date without time zone; serialized as `YYYY-MM-DD`.
//! - `user_id` / `car_id` are plain references, not enforced by storage.

use super::car::CarId;
use super::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned order identifier.
pub type OrderId = i64;

/// Status written by `OrderService::cancel`.
pub const ORDER_STATUS_CANCELLED: &str = "cancelled";

/// Purchase order linking one user to one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Option<OrderId>,
    pub user_id: UserId,
    pub car_id: CarId,
    pub date: NaiveDate,
    pub status: String,
}

impl Order {
    /// Creates an unsaved order.
    pub fn new(user_id: UserId, car_id: CarId, date: NaiveDate, status: impl Into<String>) -> Self {
        Self {
            order_id: None,
            user_id,
            car_id,
            date,
            status: status.into(),
        }
    }

    /// Returns the same order bound to an existing id.
    pub fn with_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }
}

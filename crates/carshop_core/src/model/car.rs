//! Car record.

use serde::{Deserialize, Serialize};

/// Storage-assigned car identifier.
pub type CarId = i64;

/// Car offered by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub car_id: Option<CarId>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    /// Free-form condition label, e.g. `new` or `good`.
    pub condition: String,
}

impl Car {
    /// Creates an unsaved car.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        price: f64,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            car_id: None,
            brand: brand.into(),
            model: model.into(),
            year,
            price,
            condition: condition.into(),
        }
    }

    /// Returns the same car bound to an existing id.
    pub fn with_id(mut self, car_id: CarId) -> Self {
        self.car_id = Some(car_id);
        self
    }
}

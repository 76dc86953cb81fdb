//! Car filter table.

use super::{FilterBinding, FilterQuery, QueryDispatcher};
use crate::model::car::Car;
use crate::model::EntityKind;
use crate::repo::car_repo::CarRepository;

pub const CAR_FILTER_BRAND: &str = "brand";
pub const CAR_FILTER_CONDITION: &str = "condition";
pub const CAR_FILTER_PRICE: &str = "price";

impl<R: CarRepository + ?Sized> QueryDispatcher<R, Car> {
    /// Dispatcher over `brand` (text), `condition` (text) and `price`
    /// (decimal). Cars have no sort keys.
    pub fn cars() -> Self {
        Self::new(
            EntityKind::Car,
            vec![
                FilterBinding::new(CAR_FILTER_BRAND, FilterQuery::Text(R::find_by_brand)),
                FilterBinding::new(
                    CAR_FILTER_CONDITION,
                    FilterQuery::Text(R::find_by_condition),
                ),
                FilterBinding::new(CAR_FILTER_PRICE, FilterQuery::Decimal(R::find_by_price)),
            ],
            Vec::new(),
        )
    }
}

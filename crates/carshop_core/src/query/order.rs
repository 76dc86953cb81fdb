//! Order filter table.

use super::{FilterBinding, FilterQuery, QueryDispatcher};
use crate::model::order::Order;
use crate::model::EntityKind;
use crate::repo::order_repo::OrderRepository;

pub const ORDER_FILTER_DATE: &str = "date";
pub const ORDER_FILTER_STATUS: &str = "status";

impl<R: OrderRepository + ?Sized> QueryDispatcher<R, Order> {
    /// Dispatcher over `date` (calendar date) and `status` (text). Orders
    /// have no sort keys.
    pub fn orders() -> Self {
        Self::new(
            EntityKind::Order,
            vec![
                FilterBinding::new(ORDER_FILTER_DATE, FilterQuery::Date(R::find_by_date)),
                FilterBinding::new(ORDER_FILTER_STATUS, FilterQuery::Text(R::find_by_status)),
            ],
            Vec::new(),
        )
    }
}

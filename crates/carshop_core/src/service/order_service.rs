//! Order use-case service.
//!
//! # Responsibility
//! - Provide CRUD and attribute filtering entry points for orders.
//! - Provide status transitions (`change_status`, `cancel`).
//!
//! # Invariants
//! - Status transitions read the current order first and fail with
//!   `NotFound` instead of creating a new row.

use crate::error::{DomainError, DomainResult};
use crate::interceptor::Observed;
use crate::model::order::{Order, OrderId, ORDER_STATUS_CANCELLED};
use crate::model::EntityKind;
use crate::query::QueryDispatcher;
use crate::repo::order_repo::OrderRepository;

/// Service boundary for orders.
pub trait OrderService {
    fn get_all(&self) -> DomainResult<Vec<Order>>;
    fn get_by_id(&self, id: OrderId) -> DomainResult<Order>;
    fn save_or_update(&self, order: &Order) -> DomainResult<Order>;
    fn delete(&self, id: OrderId) -> DomainResult<()>;
    /// Filters by `date` (`YYYY-MM-DD`) or `status`.
    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Order>>;
    /// Replaces the status of an existing order.
    fn change_status(&self, id: OrderId, status: &str) -> DomainResult<Order>;
    /// Sets the status of an existing order to `cancelled`.
    fn cancel(&self, id: OrderId) -> DomainResult<Order>;
}

/// Repository-backed order service.
pub struct RepoOrderService<R: OrderRepository> {
    repo: R,
    queries: QueryDispatcher<R, Order>,
}

impl<R: OrderRepository> RepoOrderService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            queries: QueryDispatcher::orders(),
        }
    }
}

impl<R: OrderRepository> OrderService for RepoOrderService<R> {
    fn get_all(&self) -> DomainResult<Vec<Order>> {
        Ok(self.repo.find_all()?)
    }

    fn get_by_id(&self, id: OrderId) -> DomainResult<Order> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound {
            entity: EntityKind::Order,
            id,
        })
    }

    fn save_or_update(&self, order: &Order) -> DomainResult<Order> {
        Ok(self.repo.save(order)?)
    }

    fn delete(&self, id: OrderId) -> DomainResult<()> {
        self.get_by_id(id)?;
        Ok(self.repo.delete_by_id(id)?)
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Order>> {
        self.queries.filter(&self.repo, attribute_key, raw_value)
    }

    fn change_status(&self, id: OrderId, status: &str) -> DomainResult<Order> {
        let mut order = self.get_by_id(id)?;
        order.status = status.to_string();
        self.save_or_update(&order)
    }

    fn cancel(&self, id: OrderId) -> DomainResult<Order> {
        self.change_status(id, ORDER_STATUS_CANCELLED)
    }
}

impl<S: OrderService> OrderService for Observed<S> {
    fn get_all(&self) -> DomainResult<Vec<Order>> {
        self.call("OrderService::get_all", &[], |inner| inner.get_all())
    }

    fn get_by_id(&self, id: OrderId) -> DomainResult<Order> {
        self.call("OrderService::get_by_id", &[&id], |inner| inner.get_by_id(id))
    }

    fn save_or_update(&self, order: &Order) -> DomainResult<Order> {
        self.call("OrderService::save_or_update", &[order], |inner| {
            inner.save_or_update(order)
        })
    }

    fn delete(&self, id: OrderId) -> DomainResult<()> {
        self.call("OrderService::delete", &[&id], |inner| inner.delete(id))
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Order>> {
        self.call(
            "OrderService::filter",
            &[&attribute_key, &raw_value],
            |inner| inner.filter(attribute_key, raw_value),
        )
    }

    fn change_status(&self, id: OrderId, status: &str) -> DomainResult<Order> {
        self.call("OrderService::change_status", &[&id, &status], |inner| {
            inner.change_status(id, status)
        })
    }

    fn cancel(&self, id: OrderId) -> DomainResult<Order> {
        self.call("OrderService::cancel", &[&id], |inner| inner.cancel(id))
    }
}

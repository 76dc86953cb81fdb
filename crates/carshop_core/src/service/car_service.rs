//! Car use-case service.
//!
//! # Responsibility
//! - Provide CRUD and attribute filtering entry points for cars.
//! - Delegate persistence to `CarRepository` and filtering to the car
//!   `QueryDispatcher`.

use crate::error::{DomainError, DomainResult};
use crate::interceptor::Observed;
use crate::model::car::{Car, CarId};
use crate::model::EntityKind;
use crate::query::QueryDispatcher;
use crate::repo::car_repo::CarRepository;

/// Service boundary for cars.
pub trait CarService {
    fn get_all(&self) -> DomainResult<Vec<Car>>;
    /// Fails with `NotFound` when `id` does not resolve.
    fn get_by_id(&self, id: CarId) -> DomainResult<Car>;
    fn save_or_update(&self, car: &Car) -> DomainResult<Car>;
    /// Fails with `NotFound` when `id` does not resolve.
    fn delete(&self, id: CarId) -> DomainResult<()>;
    /// Filters by `brand`, `condition` or `price`.
    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Car>>;
}

/// Repository-backed car service.
pub struct RepoCarService<R: CarRepository> {
    repo: R,
    queries: QueryDispatcher<R, Car>,
}

impl<R: CarRepository> RepoCarService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            queries: QueryDispatcher::cars(),
        }
    }
}

impl<R: CarRepository> CarService for RepoCarService<R> {
    fn get_all(&self) -> DomainResult<Vec<Car>> {
        Ok(self.repo.find_all()?)
    }

    fn get_by_id(&self, id: CarId) -> DomainResult<Car> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound {
            entity: EntityKind::Car,
            id,
        })
    }

    fn save_or_update(&self, car: &Car) -> DomainResult<Car> {
        Ok(self.repo.save(car)?)
    }

    fn delete(&self, id: CarId) -> DomainResult<()> {
        self.get_by_id(id)?;
        Ok(self.repo.delete_by_id(id)?)
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Car>> {
        self.queries.filter(&self.repo, attribute_key, raw_value)
    }
}

impl<S: CarService> CarService for Observed<S> {
    fn get_all(&self) -> DomainResult<Vec<Car>> {
        self.call("CarService::get_all", &[], |inner| inner.get_all())
    }

    fn get_by_id(&self, id: CarId) -> DomainResult<Car> {
        self.call("CarService::get_by_id", &[&id], |inner| inner.get_by_id(id))
    }

    fn save_or_update(&self, car: &Car) -> DomainResult<Car> {
        self.call("CarService::save_or_update", &[car], |inner| {
            inner.save_or_update(car)
        })
    }

    fn delete(&self, id: CarId) -> DomainResult<()> {
        self.call("CarService::delete", &[&id], |inner| inner.delete(id))
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<Car>> {
        self.call(
            "CarService::filter",
            &[&attribute_key, &raw_value],
            |inner| inner.filter(attribute_key, raw_value),
        )
    }
}

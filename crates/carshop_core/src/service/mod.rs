//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and attribute dispatch into use-case APIs.
//! - Hand out services only in their observed form.
//!
//! # Invariants
//! - Every operation of a service built here runs through the
//!   `Interceptor`; there is no per-operation opt-out.

pub mod car_service;
pub mod order_service;
pub mod user_service;

use crate::interceptor::{Interceptor, Observed};
use crate::repo::car_repo::CarRepository;
use crate::repo::order_repo::OrderRepository;
use crate::repo::user_repo::UserRepository;
use car_service::RepoCarService;
use order_service::RepoOrderService;
use user_service::RepoUserService;

/// Builds the observed car service over `repo`.
pub fn car_service<R: CarRepository>(
    repo: R,
    interceptor: Interceptor,
) -> Observed<RepoCarService<R>> {
    Observed::new(RepoCarService::new(repo), interceptor)
}

/// Builds the observed order service over `repo`.
pub fn order_service<R: OrderRepository>(
    repo: R,
    interceptor: Interceptor,
) -> Observed<RepoOrderService<R>> {
    Observed::new(RepoOrderService::new(repo), interceptor)
}

/// Builds the observed user service over `repo`.
pub fn user_service<R: UserRepository>(
    repo: R,
    interceptor: Interceptor,
) -> Observed<RepoUserService<R>> {
    Observed::new(RepoUserService::new(repo), interceptor)
}

//! Core domain logic for the car shop backend.
//! Cars, orders and users with attribute-keyed filtering, served through
//! observed services.

pub mod config;
pub mod db;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use error::{DomainError, DomainResult};
pub use interceptor::{AuditRecord, AuditSink, Interceptor, LogSink, Observed};
pub use logging::{
    default_log_level, init_from_config, init_logging, init_stderr_logging, logging_status,
    LogTarget,
};
pub use model::car::{Car, CarId};
pub use model::order::{Order, OrderId};
pub use model::user::{Role, User, UserId};
pub use model::EntityKind;
pub use query::QueryDispatcher;
pub use repo::car_repo::{CarRepository, SqliteCarRepository};
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::car_service::CarService;
pub use service::order_service::OrderService;
pub use service::user_service::UserService;
pub use service::{car_service, order_service, user_service};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

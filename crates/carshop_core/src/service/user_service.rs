//! User use-case service.

use crate::error::{DomainError, DomainResult};
use crate::interceptor::Observed;
use crate::model::user::{User, UserId};
use crate::model::EntityKind;
use crate::query::QueryDispatcher;
use crate::repo::user_repo::UserRepository;

/// Service boundary for users. Only users support sorting.
pub trait UserService {
    fn get_all(&self) -> DomainResult<Vec<User>>;
    fn get_by_id(&self, id: UserId) -> DomainResult<User>;
    fn save_or_update(&self, user: &User) -> DomainResult<User>;
    fn delete(&self, id: UserId) -> DomainResult<()>;
    /// Filters by `name`, `age` or `city`.
    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<User>>;
    /// Full collection ascending by `name`, `age` or `city`.
    fn sort(&self, attribute_key: &str) -> DomainResult<Vec<User>>;
}

/// Repository-backed user service.
pub struct RepoUserService<R: UserRepository> {
    repo: R,
    queries: QueryDispatcher<R, User>,
}

impl<R: UserRepository> RepoUserService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            queries: QueryDispatcher::users(),
        }
    }
}

impl<R: UserRepository> UserService for RepoUserService<R> {
    fn get_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.repo.find_all()?)
    }

    fn get_by_id(&self, id: UserId) -> DomainResult<User> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound {
            entity: EntityKind::User,
            id,
        })
    }

    fn save_or_update(&self, user: &User) -> DomainResult<User> {
        Ok(self.repo.save(user)?)
    }

    fn delete(&self, id: UserId) -> DomainResult<()> {
        self.get_by_id(id)?;
        Ok(self.repo.delete_by_id(id)?)
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<User>> {
        self.queries.filter(&self.repo, attribute_key, raw_value)
    }

    fn sort(&self, attribute_key: &str) -> DomainResult<Vec<User>> {
        self.queries.sort(&self.repo, attribute_key)
    }
}

// Arguments are rendered with `Debug`, so saved users are logged with their
// password field.
impl<S: UserService> UserService for Observed<S> {
    fn get_all(&self) -> DomainResult<Vec<User>> {
        self.call("UserService::get_all", &[], |inner| inner.get_all())
    }

    fn get_by_id(&self, id: UserId) -> DomainResult<User> {
        self.call("UserService::get_by_id", &[&id], |inner| inner.get_by_id(id))
    }

    fn save_or_update(&self, user: &User) -> DomainResult<User> {
        self.call("UserService::save_or_update", &[user], |inner| {
            inner.save_or_update(user)
        })
    }

    fn delete(&self, id: UserId) -> DomainResult<()> {
        self.call("UserService::delete", &[&id], |inner| inner.delete(id))
    }

    fn filter(&self, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<User>> {
        self.call(
            "UserService::filter",
            &[&attribute_key, &raw_value],
            |inner| inner.filter(attribute_key, raw_value),
        )
    }

    fn sort(&self, attribute_key: &str) -> DomainResult<Vec<User>> {
        self.call("UserService::sort", &[&attribute_key], |inner| {
            inner.sort(attribute_key)
        })
    }
}

//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `users` with the role set kept in `user_roles`.
//! - Provide typed equality lookups and full-collection ascending sorts.
//!
//! # Invariants
//! - `save` replaces the whole role set in the same transaction as the row.
//! - Sorted lists break ties by ascending `user_id`.

use super::{ensure_connection_ready, query_rows, RepoError, RepoResult};
use crate::model::user::{Role, User, UserId};
use rusqlite::{params, Connection, Row, ToSql};
use std::collections::BTreeSet;

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    login,
    password,
    name,
    age,
    city
FROM users";

/// Persistence capability for users.
pub trait UserRepository {
    fn find_all(&self) -> RepoResult<Vec<User>>;
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Inserts when `user.user_id` is `None`, otherwise upserts by id.
    fn save(&self, user: &User) -> RepoResult<User>;
    fn delete_by_id(&self, id: UserId) -> RepoResult<()>;
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<User>>;
    fn find_by_age(&self, age: i32) -> RepoResult<Vec<User>>;
    fn find_by_city(&self, city: &str) -> RepoResult<Vec<User>>;
    fn find_all_sorted_by_name(&self) -> RepoResult<Vec<User>>;
    fn find_all_sorted_by_age(&self) -> RepoResult<Vec<User>>;
    fn find_all_sorted_by_city(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users", "user_roles"])?;
        Ok(Self { conn })
    }

    fn find_where(&self, clause: &str, value: impl ToSql) -> RepoResult<Vec<User>> {
        let users = query_rows(
            self.conn,
            &format!("{USER_SELECT_SQL} WHERE {clause} ORDER BY user_id ASC;"),
            [value],
            parse_user_row,
        )?;
        self.with_roles(users)
    }

    fn find_ordered(&self, order_by: &str) -> RepoResult<Vec<User>> {
        let users = query_rows(
            self.conn,
            &format!("{USER_SELECT_SQL} ORDER BY {order_by};"),
            [],
            parse_user_row,
        )?;
        self.with_roles(users)
    }

    fn with_roles(&self, mut users: Vec<User>) -> RepoResult<Vec<User>> {
        for user in &mut users {
            if let Some(id) = user.user_id {
                user.roles = load_roles(self.conn, id)?;
            }
        }
        Ok(users)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<User>> {
        self.find_ordered("user_id ASC")
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.find_where("user_id = ?1", id)?.into_iter().next())
    }

    fn save(&self, user: &User) -> RepoResult<User> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO users (user_id, login, password, name, age, city)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                login = excluded.login,
                password = excluded.password,
                name = excluded.name,
                age = excluded.age,
                city = excluded.city;",
            params![
                user.user_id,
                user.login.as_str(),
                user.password.as_str(),
                user.name.as_str(),
                user.age,
                user.city.as_str(),
            ],
        )?;

        let id = user.user_id.unwrap_or_else(|| tx.last_insert_rowid());
        tx.execute("DELETE FROM user_roles WHERE user_id = ?1;", [id])?;
        for role in &user.roles {
            tx.execute(
                "INSERT INTO user_roles (user_id, role) VALUES (?1, ?2);",
                params![id, role.as_str()],
            )?;
        }
        tx.commit()?;

        self.find_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("saved user {id} missing on read-back")))
    }

    fn delete_by_id(&self, id: UserId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [id])?;
        Ok(())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<User>> {
        self.find_where("name = ?1", name)
    }

    fn find_by_age(&self, age: i32) -> RepoResult<Vec<User>> {
        self.find_where("age = ?1", age)
    }

    fn find_by_city(&self, city: &str) -> RepoResult<Vec<User>> {
        self.find_where("city = ?1", city)
    }

    fn find_all_sorted_by_name(&self) -> RepoResult<Vec<User>> {
        self.find_ordered("name ASC, user_id ASC")
    }

    fn find_all_sorted_by_age(&self) -> RepoResult<Vec<User>> {
        self.find_ordered("age ASC, user_id ASC")
    }

    fn find_all_sorted_by_city(&self) -> RepoResult<Vec<User>> {
        self.find_ordered("city ASC, user_id ASC")
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        user_id: Some(row.get("user_id")?),
        login: row.get("login")?,
        password: row.get("password")?,
        name: row.get("name")?,
        age: row.get("age")?,
        city: row.get("city")?,
        roles: BTreeSet::new(),
    })
}

fn load_roles(conn: &Connection, id: UserId) -> RepoResult<BTreeSet<Role>> {
    let names = query_rows(
        conn,
        "SELECT role FROM user_roles WHERE user_id = ?1 ORDER BY role ASC;",
        [id],
        |row| Ok(row.get::<_, String>("role")?),
    )?;

    names
        .into_iter()
        .map(|name| {
            Role::parse(&name).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid role `{name}` in user_roles.role"))
            })
        })
        .collect()
}

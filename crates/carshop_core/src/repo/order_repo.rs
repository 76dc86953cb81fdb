//! Order repository contract and SQLite implementation.
//!
//! # Invariants
//! - Dates are stored as ISO-8601 `YYYY-MM-DD` text, so equality lookups
//!   compare canonical date strings.

use super::{ensure_connection_ready, query_rows, RepoError, RepoResult};
use crate::model::order::{Order, OrderId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, ToSql};

const ORDER_SELECT_SQL: &str = "SELECT
    order_id,
    user_id,
    car_id,
    date,
    status
FROM orders";

/// Persistence capability for orders.
pub trait OrderRepository {
    fn find_all(&self) -> RepoResult<Vec<Order>>;
    fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>>;
    /// Inserts when `order.order_id` is `None`, otherwise upserts by id.
    fn save(&self, order: &Order) -> RepoResult<Order>;
    fn delete_by_id(&self, id: OrderId) -> RepoResult<()>;
    fn find_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Order>>;
    fn find_by_status(&self, status: &str) -> RepoResult<Vec<Order>>;
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["orders"])?;
        Ok(Self { conn })
    }

    fn find_where(&self, clause: &str, value: impl ToSql) -> RepoResult<Vec<Order>> {
        query_rows(
            self.conn,
            &format!("{ORDER_SELECT_SQL} WHERE {clause} ORDER BY order_id ASC;"),
            [value],
            parse_order_row,
        )
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Order>> {
        query_rows(
            self.conn,
            &format!("{ORDER_SELECT_SQL} ORDER BY order_id ASC;"),
            [],
            parse_order_row,
        )
    }

    fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        Ok(self.find_where("order_id = ?1", id)?.into_iter().next())
    }

    fn save(&self, order: &Order) -> RepoResult<Order> {
        self.conn.execute(
            "INSERT INTO orders (order_id, user_id, car_id, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(order_id) DO UPDATE SET
                user_id = excluded.user_id,
                car_id = excluded.car_id,
                date = excluded.date,
                status = excluded.status;",
            params![
                order.order_id,
                order.user_id,
                order.car_id,
                order.date,
                order.status.as_str(),
            ],
        )?;

        let id = order
            .order_id
            .unwrap_or_else(|| self.conn.last_insert_rowid());
        self.find_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("saved order {id} missing on read-back"))
        })
    }

    fn delete_by_id(&self, id: OrderId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM orders WHERE order_id = ?1;", [id])?;
        Ok(())
    }

    fn find_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Order>> {
        self.find_where("date = ?1", date)
    }

    fn find_by_status(&self, status: &str) -> RepoResult<Vec<Order>> {
        self.find_where("status = ?1", status)
    }
}

fn parse_order_row(row: &Row<'_>) -> RepoResult<Order> {
    Ok(Order {
        order_id: Some(row.get("order_id")?),
        user_id: row.get("user_id")?,
        car_id: row.get("car_id")?,
        date: row.get("date")?,
        status: row.get("status")?,
    })
}

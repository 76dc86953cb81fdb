//! Car repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `cars` table.
//! - Provide one typed equality lookup per filterable car attribute.

use super::{ensure_connection_ready, query_rows, RepoError, RepoResult};
use crate::model::car::{Car, CarId};
use rusqlite::{params, Connection, Row};

const CAR_SELECT_SQL: &str = "SELECT
    car_id,
    brand,
    model,
    year,
    price,
    condition
FROM cars";

/// Persistence capability for cars.
pub trait CarRepository {
    fn find_all(&self) -> RepoResult<Vec<Car>>;
    fn find_by_id(&self, id: CarId) -> RepoResult<Option<Car>>;
    /// Inserts when `car.car_id` is `None`, otherwise inserts-or-replaces
    /// the row with that id. Returns the stored car.
    fn save(&self, car: &Car) -> RepoResult<Car>;
    /// Deletes the row if present; deleting a missing id is a no-op.
    fn delete_by_id(&self, id: CarId) -> RepoResult<()>;
    fn find_by_brand(&self, brand: &str) -> RepoResult<Vec<Car>>;
    fn find_by_condition(&self, condition: &str) -> RepoResult<Vec<Car>>;
    fn find_by_price(&self, price: f64) -> RepoResult<Vec<Car>>;
}

/// SQLite-backed car repository.
pub struct SqliteCarRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCarRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["cars"])?;
        Ok(Self { conn })
    }

    fn find_where(&self, clause: &str, value: impl rusqlite::ToSql) -> RepoResult<Vec<Car>> {
        query_rows(
            self.conn,
            &format!("{CAR_SELECT_SQL} WHERE {clause} ORDER BY car_id ASC;"),
            [value],
            parse_car_row,
        )
    }
}

impl CarRepository for SqliteCarRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Car>> {
        query_rows(
            self.conn,
            &format!("{CAR_SELECT_SQL} ORDER BY car_id ASC;"),
            [],
            parse_car_row,
        )
    }

    fn find_by_id(&self, id: CarId) -> RepoResult<Option<Car>> {
        Ok(self.find_where("car_id = ?1", id)?.into_iter().next())
    }

    fn save(&self, car: &Car) -> RepoResult<Car> {
        self.conn.execute(
            "INSERT INTO cars (car_id, brand, model, year, price, condition)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(car_id) DO UPDATE SET
                brand = excluded.brand,
                model = excluded.model,
                year = excluded.year,
                price = excluded.price,
                condition = excluded.condition;",
            params![
                car.car_id,
                car.brand.as_str(),
                car.model.as_str(),
                car.year,
                car.price,
                car.condition.as_str(),
            ],
        )?;

        let id = car.car_id.unwrap_or_else(|| self.conn.last_insert_rowid());
        self.find_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("saved car {id} missing on read-back")))
    }

    fn delete_by_id(&self, id: CarId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM cars WHERE car_id = ?1;", [id])?;
        Ok(())
    }

    fn find_by_brand(&self, brand: &str) -> RepoResult<Vec<Car>> {
        self.find_where("brand = ?1", brand)
    }

    fn find_by_condition(&self, condition: &str) -> RepoResult<Vec<Car>> {
        self.find_where("condition = ?1", condition)
    }

    fn find_by_price(&self, price: f64) -> RepoResult<Vec<Car>> {
        self.find_where("price = ?1", price)
    }
}

fn parse_car_row(row: &Row<'_>) -> RepoResult<Car> {
    Ok(Car {
        car_id: Some(row.get("car_id")?),
        brand: row.get("brand")?,
        model: row.get("model")?,
        year: row.get("year")?,
        price: row.get("price")?,
        condition: row.get("condition")?,
    })
}

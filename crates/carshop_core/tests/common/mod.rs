//! Shared fixtures for integration tests.
#![allow(dead_code)]

use carshop_core::{
    AuditRecord, AuditSink, Car, CarRepository, Interceptor, Order, OrderRepository, Role,
    SqliteCarRepository, SqliteOrderRepository, SqliteUserRepository, User, UserRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub const NOT_EXIST_ID: i64 = 800;

/// Sink that keeps every record in emission order.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.records().iter().map(|record| record.message).collect()
    }
}

impl AuditSink for RecordingSink {
    fn emit(&self, record: &AuditRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Interceptor backed by a fresh `RecordingSink`.
pub fn recording_interceptor() -> (Interceptor, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (Interceptor::new(sink.clone()), sink)
}

pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

/// Five cars; ids 1..=5. Two Volvos (2, 4); three priced 25000 (1, 3, 4).
pub fn seed_cars(conn: &Connection) -> Vec<Car> {
    let repo = SqliteCarRepository::try_new(conn).unwrap();
    [
        Car::new("Toyota", "Camry", 2024, 25000.0, "new"),
        Car::new("Volvo", "S40", 2023, 17500.0, "good"),
        Car::new("Mercedes", "SLS", 2024, 25000.0, "new"),
        Car::new("Volvo", "S60", 2019, 25000.0, "good"),
        Car::new("Audi", "Q3", 2020, 19500.80, "good"),
    ]
    .iter()
    .map(|car| repo.save(car).unwrap())
    .collect()
}

/// Six users; ids 1..=6. Two named "Alexandr" (1, 3); three in Moscow
/// (1, 3, 6); two aged 33 (1, 6).
pub fn seed_users(conn: &Connection) -> Vec<User> {
    let repo = SqliteUserRepository::try_new(conn).unwrap();
    [
        User::new("admin", "admin", "Alexandr", 33, "Moscow").with_role(Role::Administrator),
        User::new("manager1", "manager1", "John", 36, "New-York").with_role(Role::Manager),
        User::new("manager2", "manager2", "Alexandr", 34, "Moscow").with_role(Role::Manager),
        User::new("client1", "client1", "Tanya", 25, "London").with_role(Role::Client),
        User::new("client2", "client2", "Valera", 45, "Milan").with_role(Role::Client),
        User::new("client3", "client3", "Robert", 33, "Moscow").with_role(Role::Client),
    ]
    .iter()
    .map(|user| repo.save(user).unwrap())
    .collect()
}

/// Two orders for user 4; ids 1..=2.
pub fn seed_orders(conn: &Connection) -> Vec<Order> {
    let repo = SqliteOrderRepository::try_new(conn).unwrap();
    [
        Order::new(4, 1, date("2024-08-12"), "placed"),
        Order::new(4, 2, date("2024-08-13"), "ready for pickup"),
    ]
    .iter()
    .map(|order| repo.save(order).unwrap())
    .collect()
}

pub fn ids<T>(items: &[T], id_of: impl Fn(&T) -> Option<i64>) -> Vec<i64> {
    items.iter().map(|item| id_of(item).unwrap()).collect()
}

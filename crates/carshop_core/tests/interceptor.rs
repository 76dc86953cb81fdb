mod common;

use carshop_core::db::open_db_in_memory;
use carshop_core::interceptor::{AUDIT_EVENT, FAILURE_EVENT, TIMING_EVENT};
use carshop_core::service::car_service::RepoCarService;
use carshop_core::{
    car_service, user_service, CarService, DomainError, SqliteCarRepository,
    SqliteUserRepository, User, UserService,
};
use common::{recording_interceptor, seed_cars, seed_users, NOT_EXIST_ID};
use log::Level;
use std::error::Error;
use std::fmt;

#[test]
fn successful_call_emits_audit_then_timing() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, sink) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    service.get_by_id(2).unwrap();

    assert_eq!(sink.messages(), vec![AUDIT_EVENT, TIMING_EVENT]);
    let records = sink.records();
    assert_eq!(records[0].field("operation"), Some("CarService::get_by_id"));
    assert_eq!(records[0].field("args"), Some("[2]"));
    assert!(records[0].field("started_at").is_some());
    assert_eq!(records[1].field("status"), Some("ok"));
    assert!(records[1].field("duration_ms").is_some());
    assert_eq!(
        records[0].field("invocation_id"),
        records[1].field("invocation_id")
    );
}

#[test]
fn failing_call_emits_audit_timing_and_failure() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, sink) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let err = service.get_by_id(NOT_EXIST_ID).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    assert_eq!(sink.messages(), vec![AUDIT_EVENT, TIMING_EVENT, FAILURE_EVENT]);
    let records = sink.records();
    assert_eq!(records[1].field("status"), Some("error"));
    let failure = &records[2];
    assert_eq!(failure.level, Level::Error);
    assert_eq!(failure.field("operation"), Some("CarService::get_by_id"));
    assert_eq!(failure.field("args"), Some("[800]"));
    assert_eq!(failure.field("error"), Some("car with id 800 not found"));
}

#[test]
fn every_call_is_observed_separately() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, sink) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    service.get_all().unwrap();
    service.filter("brand", "Volvo").unwrap();
    let _ = service.filter("colour", "red");

    let audits: Vec<_> = sink
        .records()
        .into_iter()
        .filter(|record| record.message == AUDIT_EVENT)
        .collect();
    assert_eq!(audits.len(), 3);
    assert_eq!(audits[2].field("args"), Some("[\"colour\", \"red\"]"));
    assert_ne!(
        audits[0].field("invocation_id"),
        audits[1].field("invocation_id")
    );
}

#[test]
fn observed_results_match_plain_service() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let observed = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);
    let plain = RepoCarService::new(SqliteCarRepository::try_new(&conn).unwrap());

    assert_eq!(observed.get_all().unwrap(), plain.get_all().unwrap());
    assert_eq!(
        observed.filter("price", "25000").unwrap(),
        plain.filter("price", "25000").unwrap()
    );
    assert_eq!(
        observed.filter("price", "abc").unwrap_err().to_string(),
        plain.filter("price", "abc").unwrap_err().to_string()
    );
    assert_eq!(
        observed.get_by_id(NOT_EXIST_ID).unwrap_err().to_string(),
        plain.get_by_id(NOT_EXIST_ID).unwrap_err().to_string()
    );
}

#[test]
fn errors_pass_through_with_their_variant() {
    let conn = open_db_in_memory().unwrap();
    seed_users(&conn);
    let (interceptor, sink) = recording_interceptor();
    let service = user_service(SqliteUserRepository::try_new(&conn).unwrap(), interceptor);

    assert!(matches!(
        service.filter("age", "abc").unwrap_err(),
        DomainError::InvalidValue { .. }
    ));
    assert!(matches!(
        service.sort("password").unwrap_err(),
        DomainError::UnsupportedAttribute { .. }
    ));
    assert_eq!(
        sink.messages()
            .iter()
            .filter(|message| **message == FAILURE_EVENT)
            .count(),
        2
    );
}

#[test]
fn user_arguments_are_logged_unredacted() {
    let conn = open_db_in_memory().unwrap();
    let (interceptor, sink) = recording_interceptor();
    let service = user_service(SqliteUserRepository::try_new(&conn).unwrap(), interceptor);

    service
        .save_or_update(&User::new("guest", "hunter2", "Guest", 20, "Oslo"))
        .unwrap();

    let audit = &sink.records()[0];
    assert_eq!(audit.field("operation"), Some("UserService::save_or_update"));
    assert!(audit.field("args").unwrap().contains("hunter2"));
}

#[derive(Debug)]
struct DiskGone;

impl fmt::Display for DiskGone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "disk gone")
    }
}

impl Error for DiskGone {}

#[derive(Debug)]
struct LoadFailed(DiskGone);

impl fmt::Display for LoadFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load failed")
    }
}

impl Error for LoadFailed {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn failure_detail_includes_source_chain() {
    let (interceptor, sink) = recording_interceptor();
    let mut calls = 0;
    let result: Result<u8, LoadFailed> = interceptor.observe("Loader::load", &[&"cars"], || {
        calls += 1;
        Err(LoadFailed(DiskGone))
    });

    assert_eq!(calls, 1);
    assert_eq!(result.unwrap_err().to_string(), "load failed");
    let failure = &sink.records()[2];
    assert_eq!(failure.field("error"), Some("load failed"));
    let detail = failure.field("detail").unwrap();
    assert!(detail.starts_with("LoadFailed(DiskGone)"));
    assert!(detail.contains("caused by: disk gone"));
}

#[test]
fn observe_returns_success_value_untouched() {
    let (interceptor, sink) = recording_interceptor();
    let result: Result<Vec<i32>, LoadFailed> =
        interceptor.observe("Loader::load", &[], || Ok(vec![3, 1, 2]));

    assert_eq!(result.unwrap(), vec![3, 1, 2]);
    assert_eq!(sink.messages(), vec![AUDIT_EVENT, TIMING_EVENT]);
    assert_eq!(sink.records()[0].field("args"), Some("[]"));
}

#[test]
fn audit_is_emitted_before_the_call_runs() {
    let (interceptor, sink) = recording_interceptor();
    let mut seen_during_call = Vec::new();

    let result: Result<(), LoadFailed> = interceptor.observe("Loader::load", &[&1_i64], || {
        seen_during_call = sink.messages();
        Ok(())
    });

    result.unwrap();
    assert_eq!(seen_during_call, vec![AUDIT_EVENT]);
    assert_eq!(sink.messages(), vec![AUDIT_EVENT, TIMING_EVENT]);
}

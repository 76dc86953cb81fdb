mod common;

use carshop_core::db::open_db_in_memory;
use carshop_core::{car_service, Car, CarService, DomainError, EntityKind, SqliteCarRepository};
use common::{ids, recording_interceptor, seed_cars, NOT_EXIST_ID};

#[test]
fn filter_by_brand_returns_matching_cars_in_persistence_order() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let volvos = service.filter("brand", "Volvo").unwrap();
    assert_eq!(volvos, vec![seeded[1].clone(), seeded[3].clone()]);
}

#[test]
fn filter_by_condition_and_price() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let new_cars = service.filter("condition", "new").unwrap();
    assert_eq!(ids(&new_cars, |car| car.car_id), vec![1, 3]);

    let priced = service.filter("price", "25000").unwrap();
    assert_eq!(ids(&priced, |car| car.car_id), vec![1, 3, 4]);

    let fractional = service.filter("price", "19500.80").unwrap();
    assert_eq!(ids(&fractional, |car| car.car_id), vec![5]);
}

#[test]
fn filter_without_matches_is_empty_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    assert!(service.filter("brand", "Lada").unwrap().is_empty());
    assert!(service.filter("brand", "volvo").unwrap().is_empty());
    assert!(service.filter("price", "1").unwrap().is_empty());
}

#[test]
fn filter_with_unsupported_key_fails_regardless_of_value() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    for (key, value) in [("model", "S40"), ("year", "2024"), ("Brand", "Volvo"), ("", "")] {
        let err = service.filter(key, value).unwrap_err();
        match err {
            DomainError::UnsupportedAttribute { entity, key: rejected } => {
                assert_eq!(entity, EntityKind::Car);
                assert_eq!(rejected, key);
            }
            other => panic!("unexpected error for `{key}`: {other}"),
        }
    }
}

#[test]
fn filter_price_with_malformed_value_is_invalid_value() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let err = service.filter("price", "not-a-number").unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidValue { ref key, ref raw, .. } if key == "price" && raw == "not-a-number"
    ));
}

#[test]
fn get_by_id_is_idempotent_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let first = service.get_by_id(2).unwrap();
    let second = service.get_by_id(2).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, seeded[1]);

    let err = service.get_by_id(NOT_EXIST_ID).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound { entity: EntityKind::Car, id: NOT_EXIST_ID }
    ));
}

#[test]
fn save_or_update_inserts_then_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    let created = service
        .save_or_update(&Car::new("Lada", "Vesta", 2022, 12000.0, "used"))
        .unwrap();
    assert_eq!(created.car_id, Some(6));
    assert_eq!(service.get_all().unwrap().len(), 6);

    let edited = Car::new("BMW", "S60", 2021, 25000.0, "good").with_id(4);
    service.save_or_update(&edited).unwrap();
    assert_eq!(service.get_by_id(4).unwrap(), edited);
    assert_eq!(service.get_all().unwrap().len(), 6);
}

#[test]
fn delete_removes_existing_and_rejects_missing() {
    let conn = open_db_in_memory().unwrap();
    seed_cars(&conn);
    let (interceptor, _) = recording_interceptor();
    let service = car_service(SqliteCarRepository::try_new(&conn).unwrap(), interceptor);

    service.delete(3).unwrap();
    assert!(matches!(
        service.get_by_id(3).unwrap_err(),
        DomainError::NotFound { id: 3, .. }
    ));
    assert!(matches!(
        service.delete(3).unwrap_err(),
        DomainError::NotFound { id: 3, .. }
    ));
    assert_eq!(ids(&service.get_all().unwrap(), |car| car.car_id), vec![1, 2, 4, 5]);
}

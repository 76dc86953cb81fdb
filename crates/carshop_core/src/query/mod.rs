//! Attribute-keyed filter/sort dispatch.
//!
//! # Responsibility
//! - Resolve a loosely typed `(attribute_key, raw_value)` pair against a
//!   closed, per-entity table of typed repository queries.
//! - Coerce the raw value with the attribute's canonical parse rule before
//!   any query runs.
//!
//! # Invariants
//! - Keys match by exact, case-sensitive equality; unknown keys fail with
//!   `UnsupportedAttribute` before coercion is attempted.
//! - A coercion failure is `InvalidValue`, never an empty result.
//! - Each successful dispatch runs exactly one repository query and returns
//!   its rows unchanged.

use crate::error::{DomainError, DomainResult};
use crate::model::EntityKind;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub mod car;
pub mod order;
pub mod user;

/// Declared type of a filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Text,
    Integer,
    Decimal,
    Date,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
        }
    }
}

/// Equality lookup request built per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRequest<'a> {
    pub entity: EntityKind,
    pub attribute_key: &'a str,
    pub raw_value: &'a str,
}

/// Ascending full-collection sort request built per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRequest<'a> {
    pub entity: EntityKind,
    pub attribute_key: &'a str,
}

/// Typed repository query bound to one attribute.
///
/// The variant fixes both the declared type and the coercion applied to the
/// raw value before the query runs.
pub enum FilterQuery<R: ?Sized, E> {
    Text(fn(&R, &str) -> RepoResult<Vec<E>>),
    Integer(fn(&R, i32) -> RepoResult<Vec<E>>),
    Decimal(fn(&R, f64) -> RepoResult<Vec<E>>),
    Date(fn(&R, NaiveDate) -> RepoResult<Vec<E>>),
}

impl<R: ?Sized, E> FilterQuery<R, E> {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Text(_) => AttributeType::Text,
            Self::Integer(_) => AttributeType::Integer,
            Self::Decimal(_) => AttributeType::Decimal,
            Self::Date(_) => AttributeType::Date,
        }
    }
}

/// One row of an entity's filter table.
pub struct FilterBinding<R: ?Sized, E> {
    pub key: &'static str,
    pub query: FilterQuery<R, E>,
}

impl<R: ?Sized, E> FilterBinding<R, E> {
    pub fn new(key: &'static str, query: FilterQuery<R, E>) -> Self {
        Self { key, query }
    }
}

/// One row of an entity's sort table.
pub struct SortBinding<R: ?Sized, E> {
    pub key: &'static str,
    pub query: fn(&R) -> RepoResult<Vec<E>>,
}

impl<R: ?Sized, E> SortBinding<R, E> {
    pub fn new(key: &'static str, query: fn(&R) -> RepoResult<Vec<E>>) -> Self {
        Self { key, query }
    }
}

/// Filter/sort dispatcher for one entity kind.
///
/// Holds no repository; callers pass the repository per call so the same
/// table serves any `R` implementing the entity's repository trait.
pub struct QueryDispatcher<R: ?Sized, E> {
    entity: EntityKind,
    filters: Vec<FilterBinding<R, E>>,
    sorts: Vec<SortBinding<R, E>>,
}

impl<R: ?Sized, E> QueryDispatcher<R, E> {
    pub fn new(
        entity: EntityKind,
        filters: Vec<FilterBinding<R, E>>,
        sorts: Vec<SortBinding<R, E>>,
    ) -> Self {
        Self {
            entity,
            filters,
            sorts,
        }
    }

    /// Supported filter keys in table order.
    pub fn filter_keys(&self) -> Vec<&'static str> {
        self.filters.iter().map(|binding| binding.key).collect()
    }

    /// Supported sort keys in table order. Empty when the entity has none.
    pub fn sort_keys(&self) -> Vec<&'static str> {
        self.sorts.iter().map(|binding| binding.key).collect()
    }

    /// Runs the equality lookup bound to `attribute_key`.
    ///
    /// # Errors
    /// - `UnsupportedAttribute` when the key is not in the filter table.
    /// - `InvalidValue` when `raw_value` fails the attribute's coercion.
    /// - `Storage` when the repository query fails.
    pub fn filter(&self, repo: &R, attribute_key: &str, raw_value: &str) -> DomainResult<Vec<E>> {
        self.execute_filter(
            repo,
            FilterRequest {
                entity: self.entity,
                attribute_key,
                raw_value,
            },
        )
    }

    /// Runs the ascending sort bound to `attribute_key`.
    ///
    /// # Errors
    /// - `UnsupportedAttribute` when the key is not in the sort table.
    /// - `Storage` when the repository query fails.
    pub fn sort(&self, repo: &R, attribute_key: &str) -> DomainResult<Vec<E>> {
        self.execute_sort(
            repo,
            SortRequest {
                entity: self.entity,
                attribute_key,
            },
        )
    }

    fn execute_filter(&self, repo: &R, request: FilterRequest<'_>) -> DomainResult<Vec<E>> {
        let binding = self
            .filters
            .iter()
            .find(|binding| binding.key == request.attribute_key)
            .ok_or_else(|| unsupported(request.entity, request.attribute_key))?;

        debug!(
            "event=query_dispatch module=query status=resolved entity={} kind=filter key={} type={}",
            request.entity,
            binding.key,
            binding.query.attribute_type().as_str()
        );

        let key = request.attribute_key;
        let raw = request.raw_value;
        let rows = match &binding.query {
            FilterQuery::Text(query) => query(repo, raw)?,
            FilterQuery::Integer(query) => query(repo, coerce_integer(key, raw)?)?,
            FilterQuery::Decimal(query) => query(repo, coerce_decimal(key, raw)?)?,
            FilterQuery::Date(query) => query(repo, coerce_date(key, raw)?)?,
        };
        Ok(rows)
    }

    fn execute_sort(&self, repo: &R, request: SortRequest<'_>) -> DomainResult<Vec<E>> {
        let binding = self
            .sorts
            .iter()
            .find(|binding| binding.key == request.attribute_key)
            .ok_or_else(|| unsupported(request.entity, request.attribute_key))?;

        debug!(
            "event=query_dispatch module=query status=resolved entity={} kind=sort key={}",
            request.entity, binding.key
        );

        Ok((binding.query)(repo)?)
    }
}

fn unsupported(entity: EntityKind, key: &str) -> DomainError {
    DomainError::UnsupportedAttribute {
        entity,
        key: key.to_string(),
    }
}

fn invalid(key: &str, raw: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidValue {
        key: key.to_string(),
        raw: raw.to_string(),
        reason: reason.into(),
    }
}

/// Parses a whole-number attribute value. No surrounding whitespace allowed.
pub fn coerce_integer(key: &str, raw: &str) -> DomainResult<i32> {
    raw.parse::<i32>()
        .map_err(|err| invalid(key, raw, format!("expected integer: {err}")))
}

/// Parses a decimal attribute value; surrounding whitespace is ignored and
/// non-finite values (`NaN`, `inf`) are rejected.
pub fn coerce_decimal(key: &str, raw: &str) -> DomainResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| invalid(key, raw, format!("expected decimal number: {err}")))?;
    if !value.is_finite() {
        return Err(invalid(key, raw, "expected finite decimal number"));
    }
    Ok(value)
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// Fields must be zero-padded with no sign or surrounding whitespace; the
/// value has to round-trip through the same format.
pub fn coerce_date(key: &str, raw: &str) -> DomainResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|err| invalid(key, raw, format!("expected ISO-8601 date YYYY-MM-DD: {err}")))?;
    if date.format(DATE_FORMAT).to_string() != raw {
        return Err(invalid(key, raw, "expected ISO-8601 date YYYY-MM-DD"));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::{coerce_date, coerce_decimal, coerce_integer};
    use crate::error::DomainError;
    use chrono::NaiveDate;

    #[test]
    fn integer_coercion_is_strict() {
        assert_eq!(coerce_integer("age", "33").unwrap(), 33);
        assert!(coerce_integer("age", " 33").is_err());
        assert!(coerce_integer("age", "33.0").is_err());
    }

    #[test]
    fn decimal_coercion_trims_and_rejects_non_finite() {
        assert_eq!(coerce_decimal("price", " 19500.80 ").unwrap(), 19500.80);
        assert_eq!(coerce_decimal("price", "25000").unwrap(), 25000.0);
        assert!(coerce_decimal("price", "NaN").is_err());
        assert!(coerce_decimal("price", "inf").is_err());
    }

    #[test]
    fn date_coercion_accepts_iso_calendar_dates_only() {
        assert_eq!(
            coerce_date("date", "2024-08-12").unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 12).unwrap()
        );
        assert!(coerce_date("date", "12.08.2024").is_err());
        assert!(coerce_date("date", "2024-02-30").is_err());
        for loose in ["2024-8-12", "2024-08-2", "+2024-08-12", " 2024-08-12", "2024-08-12 "] {
            assert!(coerce_date("date", loose).is_err(), "accepted `{loose}`");
        }
    }

    #[test]
    fn coercion_errors_cite_key_and_raw_value() {
        match coerce_decimal("price", "not-a-number").unwrap_err() {
            DomainError::InvalidValue { key, raw, .. } => {
                assert_eq!(key, "price");
                assert_eq!(raw, "not-a-number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

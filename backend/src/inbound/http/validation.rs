//! Field validation for request bodies and query strings.
//!
//! Parsers return a [`FieldResult`] per field; [`CollectViolations`] folds a
//! tuple of them into either the parsed values or one `invalid_request`
//! error listing every violation in field order.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::domain::{Error, InvalidChoiceError, NonEmptyText};

/// Machine-readable violation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViolationCode {
    MissingField,
    NullNotAllowed,
    EmptyText,
    InvalidChoice,
    InvalidTimestamp,
    MalformedJson,
}

impl ViolationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::NullNotAllowed => "null_not_allowed",
            Self::EmptyText => "empty_text",
            Self::InvalidChoice => "invalid_choice",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::MalformedJson => "malformed_json",
        }
    }
}

/// Newtype wrapper for wire field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldViolation {
    field: FieldName,
    code: ViolationCode,
    message: String,
}

impl FieldViolation {
    pub(crate) fn new(field: FieldName, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "field": self.field.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
        })
    }
}

pub(crate) type FieldResult<T> = Result<T, FieldViolation>;

/// Wrap violations in the API error shape.
pub(crate) fn validation_error(violations: Vec<FieldViolation>) -> Error {
    let errors: Vec<Value> = violations.iter().map(FieldViolation::to_json).collect();
    Error::invalid_request("Validation error").with_details(json!({ "errors": errors }))
}

pub(crate) fn required<T>(field: FieldName, value: Option<T>) -> FieldResult<T> {
    value.ok_or_else(|| {
        FieldViolation::new(
            field,
            ViolationCode::MissingField,
            format!("{} is required", field.as_str()),
        )
    })
}

pub(crate) fn non_empty(field: FieldName, value: String) -> FieldResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|_| {
        FieldViolation::new(
            field,
            ViolationCode::EmptyText,
            format!("{} must not be empty", field.as_str()),
        )
    })
}

pub(crate) fn choice<T>(field: FieldName, value: &str) -> FieldResult<T>
where
    T: FromStr<Err = InvalidChoiceError>,
{
    value.parse().map_err(|err: InvalidChoiceError| {
        FieldViolation::new(
            field,
            ViolationCode::InvalidChoice,
            format!("{}: {err}", field.as_str()),
        )
    })
}

fn invalid_timestamp(field: FieldName, value: &str) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationCode::InvalidTimestamp,
        format!("{} must be an ISO-8601 timestamp, got '{value}'", field.as_str()),
    )
}

/// RFC 3339 timestamp, normalised to UTC.
pub(crate) fn timestamp(field: FieldName, value: &str) -> FieldResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp(field, value))
}

/// RFC 3339 timestamp or a plain `YYYY-MM-DD` date at midnight UTC.
pub(crate) fn timestamp_or_date(field: FieldName, value: &str) -> FieldResult<DateTime<Utc>> {
    timestamp(field, value).or_else(|_| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| invalid_timestamp(field, value))
    })
}

/// Parse a value only when present.
pub(crate) fn optional<S, T>(
    value: Option<S>,
    parse: impl FnOnce(S) -> FieldResult<T>,
) -> FieldResult<Option<T>> {
    value.map(parse).transpose()
}

/// Reject an explicit `null` for a field that may only be omitted.
pub(crate) fn not_null<T>(field: FieldName, value: Option<Option<T>>) -> FieldResult<Option<T>> {
    match value {
        Some(None) => Err(FieldViolation::new(
            field,
            ViolationCode::NullNotAllowed,
            format!("{} must not be null", field.as_str()),
        )),
        Some(Some(inner)) => Ok(Some(inner)),
        None => Ok(None),
    }
}

/// Deserialize a field that distinguishes absent (`None`) from explicit
/// `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fold per-field results into parsed values or one validation error.
pub(crate) trait CollectViolations {
    type Output;

    fn collect_violations(self) -> Result<Self::Output, Error>;
}

macro_rules! impl_collect_violations {
    ($($value:ident: $ty:ident),+) => {
        impl<$($ty),+> CollectViolations for ($(FieldResult<$ty>,)+) {
            type Output = ($($ty,)+);

            fn collect_violations(self) -> Result<Self::Output, Error> {
                let ($($value,)+) = self;
                let mut violations = Vec::new();
                $(
                    let $value = $value.map_err(|violation| violations.push(violation)).ok();
                )+
                match ($($value,)+) {
                    ($(Some($value),)+) => Ok(($($value,)+)),
                    _ => Err(validation_error(violations)),
                }
            }
        }
    };
}

impl_collect_violations!(a: A);
impl_collect_violations!(a: A, b: B);
impl_collect_violations!(a: A, b: B, c: C);
impl_collect_violations!(a: A, b: B, c: C, d: D);
impl_collect_violations!(a: A, b: B, c: C, d: D, e: E);
impl_collect_violations!(a: A, b: B, c: C, d: D, e: E, f: F);

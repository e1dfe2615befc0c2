//! Loose accessors over raw JSON records.
//!
//! The public endpoints are inconsistent about types (numbers arrive as
//! floats, fields go missing between sessions), so every accessor falls back
//! to the zero value instead of failing the whole collection.

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::domain::timestamp;
use crate::FetchError;

pub(crate) type Record = Map<String, Value>;

/// How an endpoint wraps its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Envelope {
    /// `{"data": [...]}`, with a bare array accepted as a fallback.
    Wrapped,
    /// `[...]`
    Bare,
}

/// Split a response body into its row objects.
///
/// A `null` row becomes an empty record; any other non-object row fails the
/// whole payload.
pub(crate) fn decode_records(body: &str, envelope: Envelope) -> Result<Vec<Record>, FetchError> {
    let value: Value = serde_json::from_str(body)?;

    let rows = match (envelope, value) {
        (_, Value::Array(rows)) => rows,
        (Envelope::Wrapped, Value::Object(mut object)) => match object.remove("data") {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => return Err(FetchError::parse("no data in response")),
            Some(other) => {
                return Err(FetchError::parse(format!(
                    "expected an array under 'data', found {}",
                    kind_of(&other)
                )))
            }
        },
        (_, other) => {
            return Err(FetchError::parse(format!(
                "expected an array of records, found {}",
                kind_of(&other)
            )))
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(record) => Ok(record),
            Value::Null => Ok(Record::new()),
            other => Err(FetchError::parse(format!(
                "row {index} is not an object, found {}",
                kind_of(&other)
            ))),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn string(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

pub(crate) fn float(record: &Record, key: &str) -> f64 {
    record.get(key).and_then(Value::as_f64).unwrap_or_default()
}

/// Integer field; floats are truncated toward zero.
pub(crate) fn integer(record: &Record, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64))
            .unwrap_or_default(),
        _ => 0,
    }
}

pub(crate) fn date(record: &Record, key: &str) -> Option<OffsetDateTime> {
    record
        .get(key)
        .and_then(Value::as_str)
        .and_then(timestamp::parse_date)
}

pub(crate) fn trade_time(record: &Record, key: &str) -> OffsetDateTime {
    timestamp::parse_trade_time(&string(record, key))
}

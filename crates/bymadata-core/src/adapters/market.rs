use std::collections::HashMap;

use serde_json::{json, Value};

use super::payload::{self, Envelope};
use crate::{FetchError, Index, MarketSummary};

/// Body sent to the endpoints that take no filters.
pub(crate) fn empty_payload() -> Value {
    json!({ "Content-Type": "application/json" })
}

/// Index rows. Descriptions found in `dictionary` are replaced by their translation.
pub(crate) fn parse_indices(
    body: &str,
    dictionary: &HashMap<String, String>,
) -> Result<Vec<Index>, FetchError> {
    Ok(payload::decode_records(body, Envelope::Wrapped)?
        .iter()
        .map(|row| {
            let description = payload::string(row, "description");
            Index {
                description: dictionary.get(&description).cloned().unwrap_or(description),
                symbol: payload::string(row, "symbol"),
                last: payload::float(row, "price"),
                change: payload::float(row, "variation"),
                high: payload::float(row, "highValue"),
                low: payload::float(row, "minValue"),
                previous_close: payload::float(row, "previousClosingPrice"),
            }
        })
        .collect())
}

pub(crate) fn parse_market_summary(body: &str) -> Result<Vec<MarketSummary>, FetchError> {
    Ok(payload::decode_records(body, Envelope::Wrapped)?
        .iter()
        .map(|row| MarketSummary {
            symbol: payload::string(row, "symbol"),
            asset_type: payload::string(row, "assetType"),
            parent_key: payload::string(row, "parentKey"),
            total_negotiated: payload::float(row, "totalNegotiated"),
            volume: payload::integer(row, "volume"),
            operations: payload::integer(row, "operations"),
        })
        .collect())
}

/// `market-time` answer. Valid JSON of an unexpected shape counts as a working day.
pub(crate) fn parse_working_day(body: &str) -> Result<bool, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(match value {
        Value::Object(object) => match object.get("isWorkingDay") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(_) => true,
        },
        Value::Null => false,
        _ => true,
    })
}

/// Flat string table from `es.json`. Non-string values are dropped.
pub(crate) fn parse_dictionary(body: &str) -> Result<HashMap<String, String>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Object(object) => Ok(object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect()),
        _ => Err(FetchError::parse("dictionary is not a JSON object")),
    }
}

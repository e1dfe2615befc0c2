//! Exchange announcements and issuer financial statements.

use serde_json::{json, Value};

use super::payload::{self, Envelope};
use crate::{FetchError, IncomeStatement, News};

pub(crate) fn statements_payload(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "Content-Type": "application/json",
    })
}

/// `download_url` maps an attachment id to its public link.
pub(crate) fn parse_news(
    body: &str,
    download_url: impl Fn(&str) -> String,
) -> Result<Vec<News>, FetchError> {
    Ok(payload::decode_records(body, Envelope::Wrapped)?
        .iter()
        .map(|row| News {
            date: payload::date(row, "fecha"),
            title: payload::string(row, "emisor"),
            description: payload::string(row, "referencia"),
            download_url: download_url(&payload::string(row, "descarga")),
        })
        .collect())
}

pub(crate) fn parse_income_statements(
    body: &str,
    download_url: impl Fn(&str) -> String,
) -> Result<Vec<IncomeStatement>, FetchError> {
    Ok(payload::decode_records(body, Envelope::Wrapped)?
        .iter()
        .map(|row| IncomeStatement {
            symbol: payload::string(row, "symbol"),
            period: payload::string(row, "periodo"),
            period_type: payload::string(row, "tipoPeriodo"),
            closing_date: payload::string(row, "fechaCierre"),
            file_url: download_url(&payload::string(row, "balancesArchivo")),
        })
        .collect())
}

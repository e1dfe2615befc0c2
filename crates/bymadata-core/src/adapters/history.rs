use serde::Deserialize;

use crate::{FetchError, HistoryRequest, Ohlcv};

pub(crate) const ENDPOINT: &str = "chart/historical-series/history";

/// The charting service only knows the 24-hour settlement board.
const BOARD_SUFFIX: &str = " 24HS";

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<f64>,
    #[serde(default)]
    h: Vec<f64>,
    #[serde(default)]
    l: Vec<f64>,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    v: Vec<i64>,
}

pub(crate) fn history_query(request: &HistoryRequest) -> String {
    let symbol = format!("{}{BOARD_SUFFIX}", request.symbol);
    format!(
        "symbol={}&resolution={}&from={}&to={}",
        urlencoding::encode(&symbol),
        request.resolution.as_str(),
        request.from.unix_timestamp(),
        request.to.unix_timestamp()
    )
}

/// `None` when the service answers with a non-`ok` status.
pub(crate) fn parse_history(body: &str) -> Result<Option<Ohlcv>, FetchError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(format!("failed to parse history response: {e}")))?;

    if response.s != "ok" {
        return Ok(None);
    }

    Ok(Some(Ohlcv {
        time: response.t,
        open: response.o,
        high: response.h,
        low: response.l,
        close: response.c,
        volume: response.v,
    }))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::Resolution;

    #[test]
    fn query_targets_the_24hs_board() {
        let request = HistoryRequest::new(
            "GGAL",
            Resolution::Weekly,
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2024-02-01 00:00 UTC),
        )
        .expect("valid request");

        assert_eq!(
            history_query(&request),
            "symbol=GGAL%2024HS&resolution=W&from=1704067200&to=1706745600"
        );
    }

    #[test]
    fn parses_ok_series() {
        let body = r#"{"s":"ok","t":[1704067200,1704153600],"o":[10.0,11.0],"h":[12.0,12.5],"l":[9.5,10.5],"c":[11.0,12.0],"v":[1000,1500]}"#;
        let series = parse_history(body)
            .expect("valid payload")
            .expect("series present");

        assert_eq!(series.len(), 2);
        assert_eq!(series.close, vec![11.0, 12.0]);
        assert_eq!(series.volume, vec![1000, 1500]);
    }

    #[test]
    fn no_data_status_yields_none() {
        assert!(parse_history(r#"{"s":"no_data"}"#)
            .expect("valid payload")
            .is_none());
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(parse_history("{}").is_err());
    }
}

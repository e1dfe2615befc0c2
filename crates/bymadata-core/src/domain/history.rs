use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ClientError;

/// Bar resolution accepted by the charting endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

impl Resolution {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "D",
            Self::Weekly => "W",
            Self::Monthly => "M",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "D" => Ok(Self::Daily),
            "W" => Ok(Self::Weekly),
            "M" => Ok(Self::Monthly),
            other => Err(ClientError::InvalidInput(format!(
                "invalid resolution '{other}', expected one of D, W, M"
            ))),
        }
    }
}

/// Request for a historical price series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: String,
    pub resolution: Resolution,
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
}

impl HistoryRequest {
    pub fn new(
        symbol: impl Into<String>,
        resolution: Resolution,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Self, ClientError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ClientError::InvalidInput(String::from(
                "history request requires a symbol",
            )));
        }
        if from > to {
            return Err(ClientError::InvalidInput(String::from(
                "history range start must not be after its end",
            )));
        }

        Ok(Self {
            symbol,
            resolution,
            from,
            to,
        })
    }
}

/// Column-oriented OHLCV series as returned by the charting endpoint.
/// `time` holds Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    pub time: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<i64>,
}

/// One row of an [`Ohlcv`] series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Ohlcv {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Zip the columns into row records. Fails when the columns disagree in length.
    pub fn to_bars(&self) -> Result<Vec<HistoricalBar>, ClientError> {
        let len = self.time.len();
        let lengths = [
            self.open.len(),
            self.high.len(),
            self.low.len(),
            self.close.len(),
            self.volume.len(),
        ];
        if lengths.iter().any(|other| *other != len) {
            return Err(ClientError::InconsistentSeries(format!(
                "time={len}, open={}, high={}, low={}, close={}, volume={}",
                lengths[0], lengths[1], lengths[2], lengths[3], lengths[4]
            )));
        }

        Ok((0..len)
            .map(|i| HistoricalBar {
                time: self.time[i],
                open: self.open[i],
                high: self.high[i],
                low: self.low[i],
                close: self.close[i],
                volume: self.volume[i],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn converts_columns_into_rows() {
        let series = Ohlcv {
            time: vec![1_700_000_000, 1_700_086_400],
            open: vec![10.0, 11.0],
            high: vec![12.0, 13.0],
            low: vec![9.0, 10.5],
            close: vec![11.0, 12.5],
            volume: vec![100, 200],
        };

        let bars = series.to_bars().expect("columns are aligned");
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].time, 1_700_086_400);
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, 200);
    }

    #[test]
    fn rejects_misaligned_columns() {
        let series = Ohlcv {
            time: vec![1, 2],
            open: vec![1.0],
            high: vec![1.0, 2.0],
            low: vec![1.0, 2.0],
            close: vec![1.0, 2.0],
            volume: vec![1, 2],
        };

        assert!(matches!(
            series.to_bars(),
            Err(ClientError::InconsistentSeries(_))
        ));
    }

    #[test]
    fn request_rejects_inverted_range() {
        let err = HistoryRequest::new(
            "GGAL",
            Resolution::Daily,
            datetime!(2024-02-01 00:00 UTC),
            datetime!(2024-01-01 00:00 UTC),
        )
        .expect_err("must fail");
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn parses_resolution_case_insensitively() {
        assert_eq!("w".parse::<Resolution>().expect("valid"), Resolution::Weekly);
        assert!("H".parse::<Resolution>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Instruments that are identified by a ticker symbol within their collection.
pub trait Listed {
    fn symbol(&self) -> &str;
}

/// Equity quote from one of the stock boards (blue chips, CEDEARs, general equity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub symbol: String,
    pub settlement: String,
    pub bid_size: i64,
    pub bid: f64,
    pub ask: f64,
    pub ask_size: i64,
    pub last: f64,
    pub close: f64,
    pub change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub turnover: f64,
    pub volume: i64,
    pub operations: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub group: String,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            settlement: String::new(),
            bid_size: 0,
            bid: 0.0,
            ask: 0.0,
            ask_size: 0,
            last: 0.0,
            close: 0.0,
            change: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            previous_close: 0.0,
            turnover: 0.0,
            volume: 0,
            operations: 0,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            group: String::new(),
        }
    }
}

impl Listed for Security {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Fixed-income quote: the equity quote fields plus the maturity date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    #[serde(flatten)]
    pub quote: Security,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub expiration: Option<OffsetDateTime>,
}

impl Listed for Bond {
    fn symbol(&self) -> &str {
        &self.quote.symbol
    }
}

/// Listed options contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub symbol: String,
    pub bid_size: i64,
    pub bid: f64,
    pub ask: f64,
    pub ask_size: i64,
    pub last: f64,
    pub close: f64,
    pub change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub turnover: f64,
    pub volume: i64,
    pub operations: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub underlying_asset: String,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub expiration: Option<OffsetDateTime>,
}

impl Default for OptionContract {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            bid_size: 0,
            bid: 0.0,
            ask: 0.0,
            ask_size: 0,
            last: 0.0,
            close: 0.0,
            change: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            previous_close: 0.0,
            turnover: 0.0,
            volume: 0,
            operations: 0,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            underlying_asset: String::new(),
            expiration: None,
        }
    }
}

impl Listed for OptionContract {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Index futures contract. Prices, turnover and volume are already scaled
/// by the exchange's contract multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureContract {
    pub symbol: String,
    pub bid_size: i64,
    pub bid: f64,
    pub ask: f64,
    pub ask_size: i64,
    pub last: f64,
    pub close: f64,
    pub change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub turnover: f64,
    pub volume: i64,
    pub operations: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub expiration: Option<OffsetDateTime>,
    pub open_interest: i64,
}

impl Default for FutureContract {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            bid_size: 0,
            bid: 0.0,
            ask: 0.0,
            ask_size: 0,
            last: 0.0,
            close: 0.0,
            change: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            previous_close: 0.0,
            turnover: 0.0,
            volume: 0,
            operations: 0,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            expiration: None,
            open_interest: 0,
        }
    }
}

impl Listed for FutureContract {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Market index level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub description: String,
    pub symbol: String,
    pub last: f64,
    pub change: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
}

impl Listed for Index {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Traded totals for one asset type in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub symbol: String,
    pub asset_type: String,
    pub parent_key: String,
    pub total_negotiated: f64,
    pub volume: i64,
    pub operations: i64,
}

/// Regulatory announcement published by the exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct News {
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub date: Option<OffsetDateTime>,
    pub title: String,
    pub description: String,
    pub download_url: String,
}

/// Financial statement filing for one issuer and period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub symbol: String,
    pub period: String,
    pub period_type: String,
    pub closing_date: String,
    pub file_url: String,
}

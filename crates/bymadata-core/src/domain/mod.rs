//! # Domain Models
//!
//! Typed records for the instruments published by the exchange.
//!
//! Records are plain values: they are built once by the endpoint adapters
//! and never mutated afterwards. Missing or mistyped payload fields become
//! zero values rather than errors.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Security`] | Equity quote (blue chips, CEDEARs, general equity) |
//! | [`Bond`] | Fixed-income quote with maturity |
//! | [`OptionContract`] | Listed option |
//! | [`FutureContract`] | Index future (scaled prices) |
//! | [`Index`] | Market index level |
//! | [`MarketSummary`] | Session totals per asset type |
//! | [`News`] | Exchange announcement |
//! | [`IncomeStatement`] | Financial statement filing |
//! | [`Ohlcv`] | Historical price series |

mod history;
mod models;
pub mod timestamp;

pub use history::{HistoricalBar, HistoryRequest, Ohlcv, Resolution};
pub use models::{
    Bond, FutureContract, IncomeStatement, Index, Listed, MarketSummary, News, OptionContract,
    Security,
};

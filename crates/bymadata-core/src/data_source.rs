//! Market data source contract and fetch error taxonomy.
//!
//! [`MarketDataSource`] is the collection-fetcher seam: one method per bulk
//! endpoint, each returning the whole collection. The production
//! implementation is [`BymaSource`](crate::BymaSource); tests plug in
//! in-memory doubles.
//!
//! | Category | Method | Entity |
//! |----------|--------|--------|
//! | `bluechips`, `cedears`, `galpones` | [`securities`](MarketDataSource::securities) | [`Security`] |
//! | `bonds`, `short_term_bonds`, `corporate_bonds` | [`bonds`](MarketDataSource::bonds) | [`Bond`] |
//! | `options` | [`options`](MarketDataSource::options) | [`OptionContract`] |
//! | `futures` | [`futures`](MarketDataSource::futures) | [`FutureContract`] |
//! | `indices` | [`indices`](MarketDataSource::indices) | [`Index`] |
//! | `market_summary` | [`market_summary`](MarketDataSource::market_summary) | [`MarketSummary`] |
//! | `news` | [`news`](MarketDataSource::news) | [`News`] |
//! | `income_statements` | [`income_statements`](MarketDataSource::income_statements) | [`IncomeStatement`] |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    Bond, ClientError, FutureContract, HistoryRequest, IncomeStatement, Index, MarketSummary, News,
    Ohlcv, OptionContract, Security,
};

/// Bulk collection kinds. Each owns one cache slot, except
/// `IncomeStatements` which owns one slot per ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bluechips,
    Cedears,
    Galpones,
    Bonds,
    ShortTermBonds,
    CorporateBonds,
    Options,
    Futures,
    Indices,
    MarketSummary,
    News,
    IncomeStatements,
}

impl Category {
    pub const ALL: [Self; 12] = [
        Self::Bluechips,
        Self::Cedears,
        Self::Galpones,
        Self::Bonds,
        Self::ShortTermBonds,
        Self::CorporateBonds,
        Self::Options,
        Self::Futures,
        Self::Indices,
        Self::MarketSummary,
        Self::News,
        Self::IncomeStatements,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bluechips => "bluechips",
            Self::Cedears => "cedears",
            Self::Galpones => "galpones",
            Self::Bonds => "bonds",
            Self::ShortTermBonds => "short_term_bonds",
            Self::CorporateBonds => "corporate_bonds",
            Self::Options => "options",
            Self::Futures => "futures",
            Self::Indices => "indices",
            Self::MarketSummary => "market_summary",
            Self::News => "news",
            Self::IncomeStatements => "income_statements",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ClientError::InvalidInput(format!("unknown category '{value}'")))
    }
}

/// Equity boards served by [`MarketDataSource::securities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityBoard {
    Bluechips,
    Cedears,
    Galpones,
}

impl From<SecurityBoard> for Category {
    fn from(board: SecurityBoard) -> Self {
        match board {
            SecurityBoard::Bluechips => Self::Bluechips,
            SecurityBoard::Cedears => Self::Cedears,
            SecurityBoard::Galpones => Self::Galpones,
        }
    }
}

/// Fixed-income boards served by [`MarketDataSource::bonds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondBoard {
    Government,
    ShortTerm,
    Corporate,
}

impl From<BondBoard> for Category {
    fn from(board: BondBoard) -> Self {
        match board {
            BondBoard::Government => Self::Bonds,
            BondBoard::ShortTerm => Self::ShortTermBonds,
            BondBoard::Corporate => Self::CorporateBonds,
        }
    }
}

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Unavailable,
    RateLimited,
    Unauthorized,
    Http,
    Parse,
    Internal,
}

/// Failure raised below the cached accessor: transport, HTTP status or payload parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl FetchError {
    fn with_kind(kind: FetchErrorKind, message: impl Into<String>, status: Option<u16>) -> Self {
        let retryable = match kind {
            FetchErrorKind::Timeout | FetchErrorKind::Unavailable | FetchErrorKind::RateLimited => {
                true
            }
            FetchErrorKind::Http => status.is_some_and(|code| code >= 500),
            FetchErrorKind::Unauthorized | FetchErrorKind::Parse | FetchErrorKind::Internal => {
                false
            }
        };
        Self {
            kind,
            message: message.into(),
            status,
            retryable,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::Timeout, message, None)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::Unavailable, message, None)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::RateLimited, message, None)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::Unauthorized, message, None)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::Parse, message, None)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(FetchErrorKind::Internal, message, None)
    }

    /// Classify a non-2xx status code.
    pub fn from_status(status: u16) -> Self {
        let kind = match status {
            401 => FetchErrorKind::Unauthorized,
            429 => FetchErrorKind::RateLimited,
            500 | 502 | 503 => FetchErrorKind::Unavailable,
            408 => FetchErrorKind::Timeout,
            _ => FetchErrorKind::Http,
        };
        Self::with_kind(kind, format!("HTTP error {status}"), Some(status))
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Unavailable => "fetch.unavailable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Unauthorized => "fetch.unauthorized",
            FetchErrorKind::Http => "fetch.http",
            FetchErrorKind::Parse => "fetch.parse",
            FetchErrorKind::Internal => "fetch.internal",
        }
    }

    /// Prefix the message with the endpoint or category that failed.
    pub fn context(mut self, context: impl Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("invalid response: {error}"))
    }
}

/// Boxed future returned by every [`MarketDataSource`] method.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Collection fetcher contract.
///
/// Each call performs exactly one logical fetch of a whole collection; caching
/// is layered on top by [`CachedCollections`](crate::CachedCollections).
/// Implementations must be `Send + Sync` as a single source is shared by every
/// clone of the client.
pub trait MarketDataSource: Send + Sync {
    fn securities<'a>(&'a self, board: SecurityBoard) -> SourceFuture<'a, Vec<Security>>;

    fn bonds<'a>(&'a self, board: BondBoard) -> SourceFuture<'a, Vec<Bond>>;

    fn options<'a>(&'a self) -> SourceFuture<'a, Vec<OptionContract>>;

    /// Index futures, prices already scaled.
    fn futures<'a>(&'a self) -> SourceFuture<'a, Vec<FutureContract>>;

    fn indices<'a>(&'a self) -> SourceFuture<'a, Vec<Index>>;

    fn market_summary<'a>(&'a self) -> SourceFuture<'a, Vec<MarketSummary>>;

    fn news<'a>(&'a self) -> SourceFuture<'a, Vec<News>>;

    /// Financial statement filings for one issuer.
    fn income_statements<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<IncomeStatement>>;

    fn is_working_day<'a>(&'a self) -> SourceFuture<'a, bool>;

    /// Historical series, `None` when the charting service reports no data.
    fn history<'a>(&'a self, request: HistoryRequest) -> SourceFuture<'a, Option<Ohlcv>>;
}

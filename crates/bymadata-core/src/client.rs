use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::warn;
use time::{Duration, OffsetDateTime};

use crate::accessor::CachedCollections;
use crate::cache::{CacheEntryInfo, CacheStore};
use crate::data_source::{BondBoard, MarketDataSource, SecurityBoard};
use crate::http_client::HttpClient;
use crate::lookup;
use crate::{
    Bond, BymaSource, ClientConfig, ClientError, FutureContract, HistoryRequest, IncomeStatement,
    Index, MarketSummary, News, Ohlcv, OptionContract, Resolution, Security,
};

/// Entry point for the library.
///
/// Bulk getters return shared snapshots of whole collections, served from the
/// cache while fresh. Single-symbol lookups, batch lookups and search are
/// answered from those same collections, so they never cost more requests
/// than the collections they read. Cloning is cheap and clones share one cache.
///
/// ```rust,no_run
/// use bymadata_core::{BymaClient, ClientConfig};
///
/// # async fn run() -> Result<(), bymadata_core::ClientError> {
/// let client = BymaClient::connect(ClientConfig::default()).await;
/// let ggal = client.security("GGAL").await?;
/// println!("{} last {}", ggal.symbol, ggal.last);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BymaClient {
    collections: CachedCollections,
    config: ClientConfig,
}

impl Default for BymaClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl BymaClient {
    /// Client over the live API without the session bootstrap.
    pub fn new(config: ClientConfig) -> Self {
        let source = BymaSource::new(&config);
        Self::with_source(Arc::new(source), config)
    }

    /// Client over the live API. The session bootstrap is attempted once;
    /// a failure is logged and the client is returned anyway.
    pub async fn connect(config: ClientConfig) -> Self {
        let source = BymaSource::new(&config);
        if let Err(error) = source.bootstrap().await {
            warn!("session bootstrap failed: {error}");
        }
        Self::with_source(Arc::new(source), config)
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        let source = BymaSource::with_http_client(http, &config);
        Self::with_source(Arc::new(source), config)
    }

    /// Client over any [`MarketDataSource`]; only the cache settings of `config` apply.
    pub fn with_source(source: Arc<dyn MarketDataSource>, config: ClientConfig) -> Self {
        let cache = if config.enable_cache {
            CacheStore::new(config.cache_ttl)
        } else {
            CacheStore::disabled()
        };
        Self {
            collections: CachedCollections::new(source, cache),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn bluechips(&self) -> Result<Arc<[Security]>, ClientError> {
        Ok(self.collections.securities(SecurityBoard::Bluechips).await?)
    }

    pub async fn cedears(&self) -> Result<Arc<[Security]>, ClientError> {
        Ok(self.collections.securities(SecurityBoard::Cedears).await?)
    }

    /// General equity panel.
    pub async fn galpones(&self) -> Result<Arc<[Security]>, ClientError> {
        Ok(self.collections.securities(SecurityBoard::Galpones).await?)
    }

    pub async fn bonds(&self) -> Result<Arc<[Bond]>, ClientError> {
        Ok(self.collections.bonds(BondBoard::Government).await?)
    }

    pub async fn short_term_bonds(&self) -> Result<Arc<[Bond]>, ClientError> {
        Ok(self.collections.bonds(BondBoard::ShortTerm).await?)
    }

    pub async fn corporate_bonds(&self) -> Result<Arc<[Bond]>, ClientError> {
        Ok(self.collections.bonds(BondBoard::Corporate).await?)
    }

    pub async fn options(&self) -> Result<Arc<[OptionContract]>, ClientError> {
        Ok(self.collections.options().await?)
    }

    pub async fn futures(&self) -> Result<Arc<[FutureContract]>, ClientError> {
        Ok(self.collections.futures().await?)
    }

    pub async fn indices(&self) -> Result<Arc<[Index]>, ClientError> {
        Ok(self.collections.indices().await?)
    }

    pub async fn market_summary(&self) -> Result<Arc<[MarketSummary]>, ClientError> {
        Ok(self.collections.market_summary().await?)
    }

    pub async fn news(&self) -> Result<Arc<[News]>, ClientError> {
        Ok(self.collections.news().await?)
    }

    pub async fn income_statements(
        &self,
        ticker: &str,
    ) -> Result<Arc<[IncomeStatement]>, ClientError> {
        Ok(self.collections.income_statements(ticker).await?)
    }

    pub async fn bluechip(&self, symbol: &str) -> Result<Security, ClientError> {
        let items = self.bluechips().await?;
        found("bluechip", symbol, lookup::find_in(&items, symbol))
    }

    pub async fn cedear(&self, symbol: &str) -> Result<Security, ClientError> {
        let items = self.cedears().await?;
        found("cedear", symbol, lookup::find_in(&items, symbol))
    }

    pub async fn galpone(&self, symbol: &str) -> Result<Security, ClientError> {
        let items = self.galpones().await?;
        found("galpone", symbol, lookup::find_in(&items, symbol))
    }

    pub async fn option(&self, symbol: &str) -> Result<OptionContract, ClientError> {
        let items = self.options().await?;
        found("option", symbol, lookup::find_in(&items, symbol))
    }

    pub async fn future(&self, symbol: &str) -> Result<FutureContract, ClientError> {
        let items = self.futures().await?;
        found("future", symbol, lookup::find_in(&items, symbol))
    }

    pub async fn index(&self, symbol: &str) -> Result<Index, ClientError> {
        let items = self.indices().await?;
        found("index", symbol, lookup::find_in(&items, symbol))
    }

    /// Any equity board, searched bluechips, then cedears, then galpones.
    pub async fn security(&self, symbol: &str) -> Result<Security, ClientError> {
        let (bluechips, cedears, galpones) = self.equity_boards().await?;
        found(
            "security",
            symbol,
            lookup::find_first(&[&bluechips[..], &cedears[..], &galpones[..]], symbol),
        )
    }

    /// Any bond board, searched government, then short-term, then corporate.
    pub async fn bond(&self, symbol: &str) -> Result<Bond, ClientError> {
        let (government, short_term, corporate) = tokio::try_join!(
            self.collections.bonds(BondBoard::Government),
            self.collections.bonds(BondBoard::ShortTerm),
            self.collections.bonds(BondBoard::Corporate),
        )?;
        found(
            "bond",
            symbol,
            lookup::find_first(&[&government[..], &short_term[..], &corporate[..]], symbol),
        )
    }

    /// Resolve several equity symbols at once. Unknown symbols are omitted.
    pub async fn multiple_securities<S: AsRef<str>>(
        &self,
        symbols: &[S],
    ) -> Result<HashMap<String, Security>, ClientError> {
        let (bluechips, cedears, galpones) = self.equity_boards().await?;
        Ok(lookup::batch_find(
            &[&bluechips[..], &cedears[..], &galpones[..]],
            symbols,
        ))
    }

    /// Equities whose symbol contains `text`, ignoring case.
    pub async fn search_securities(&self, text: &str) -> Result<Vec<Security>, ClientError> {
        let (bluechips, cedears, galpones) = self.equity_boards().await?;
        Ok(lookup::search(
            &[&bluechips[..], &cedears[..], &galpones[..]],
            text,
        ))
    }

    async fn equity_boards(
        &self,
    ) -> Result<(Arc<[Security]>, Arc<[Security]>, Arc<[Security]>), ClientError> {
        Ok(tokio::try_join!(
            self.collections.securities(SecurityBoard::Bluechips),
            self.collections.securities(SecurityBoard::Cedears),
            self.collections.securities(SecurityBoard::Galpones),
        )?)
    }

    /// Historical series; never cached.
    pub async fn history(
        &self,
        symbol: &str,
        resolution: Resolution,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Ohlcv, ClientError> {
        let request = HistoryRequest::new(symbol, resolution, from, to)?;
        self.collections
            .source()
            .history(request)
            .await?
            .ok_or_else(|| ClientError::not_found("history", symbol))
    }

    /// Daily bars covering the last `days` days up to now.
    pub async fn history_last_days(&self, symbol: &str, days: u32) -> Result<Ohlcv, ClientError> {
        let to = OffsetDateTime::now_utc();
        let from = to - Duration::days(i64::from(days));
        self.history(symbol, Resolution::Daily, from, to).await
    }

    /// Whether the market opens today; never cached.
    pub async fn is_working_day(&self) -> Result<bool, ClientError> {
        Ok(self.collections.source().is_working_day().await?)
    }

    pub fn cache_info(&self) -> BTreeMap<String, CacheEntryInfo> {
        self.collections.cache().info()
    }

    pub fn clear_cache(&self) {
        self.collections.cache().clear();
    }
}

fn found<T: Clone>(entity: &'static str, symbol: &str, hit: Option<&T>) -> Result<T, ClientError> {
    hit.cloned()
        .ok_or_else(|| ClientError::not_found(entity, symbol))
}

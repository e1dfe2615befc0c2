//! Live adapter for the exchange's public market data API.

mod filings;
mod history;
mod market;
mod payload;
mod quotes;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use crate::data_source::{BondBoard, MarketDataSource, SecurityBoard, SourceFuture};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::retry::RetryConfig;
use crate::transport::Transport;
use crate::{
    Bond, ClientConfig, FetchError, FutureContract, HistoryRequest, IncomeStatement, Index,
    MarketSummary, News, Ohlcv, OptionContract, Security,
};

const DASHBOARD_PATH: &str = "/#/dashboard";
const DICTIONARY_PATH: &str = "/assets/api/langs/es.json";

/// [`MarketDataSource`] backed by the public HTTP API.
///
/// Every call is a single POST (or GET for history) through [`Transport`],
/// which owns retries. Index descriptions are translated with the
/// dictionary loaded by [`bootstrap`](Self::bootstrap).
#[derive(Debug, Clone)]
pub struct BymaSource {
    transport: Transport,
    dictionary: Arc<RwLock<HashMap<String, String>>>,
}

impl BymaSource {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        let retry = RetryConfig::exponential(config.retry_attempts);
        Self::with_transport(Transport::new(
            http,
            config.base_url.as_str(),
            config.timeout,
            retry,
        ))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self {
            transport,
            dictionary: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Open a browser-like session and load the description dictionary.
    ///
    /// A failed dashboard visit is returned; a missing or malformed
    /// dictionary only leaves descriptions untranslated.
    pub async fn bootstrap(&self) -> Result<(), FetchError> {
        self.transport
            .get_site(DASHBOARD_PATH)
            .await
            .map_err(|e| e.context("failed to establish session"))?;

        match self.load_dictionary().await {
            Ok(dictionary) => {
                debug!("loaded {} dictionary entries", dictionary.len());
                *self
                    .dictionary
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = dictionary;
            }
            Err(error) => warn!("dictionary unavailable, descriptions stay untranslated: {error}"),
        }
        Ok(())
    }

    async fn load_dictionary(&self) -> Result<HashMap<String, String>, FetchError> {
        let body = self.transport.get_site(DICTIONARY_PATH).await?;
        market::parse_dictionary(&body)
    }

    async fn fetch_securities(&self, board: SecurityBoard) -> Result<Vec<Security>, FetchError> {
        let (endpoint, envelope) = quotes::security_endpoint(board);
        let body = self
            .transport
            .post_json(endpoint, &quotes::settlement_payload())
            .await?;
        quotes::parse_securities(&body, envelope).map_err(|e| e.context(endpoint))
    }

    async fn fetch_bonds(&self, board: BondBoard) -> Result<Vec<Bond>, FetchError> {
        let (endpoint, envelope) = quotes::bond_endpoint(board);
        let body = self
            .transport
            .post_json(endpoint, &quotes::settlement_payload())
            .await?;
        quotes::parse_bonds(&body, envelope).map_err(|e| e.context(endpoint))
    }

    async fn post_plain(&self, endpoint: &str) -> Result<String, FetchError> {
        self.transport
            .post_json(endpoint, &market::empty_payload())
            .await
    }
}

impl MarketDataSource for BymaSource {
    fn securities<'a>(&'a self, board: SecurityBoard) -> SourceFuture<'a, Vec<Security>> {
        Box::pin(self.fetch_securities(board))
    }

    fn bonds<'a>(&'a self, board: BondBoard) -> SourceFuture<'a, Vec<Bond>> {
        Box::pin(self.fetch_bonds(board))
    }

    fn options<'a>(&'a self) -> SourceFuture<'a, Vec<OptionContract>> {
        Box::pin(async move {
            let body = self.post_plain("options").await?;
            quotes::parse_options(&body).map_err(|e| e.context("options"))
        })
    }

    fn futures<'a>(&'a self) -> SourceFuture<'a, Vec<FutureContract>> {
        Box::pin(async move {
            let body = self
                .transport
                .post_json("index-future", &quotes::futures_payload())
                .await?;
            quotes::parse_futures(&body).map_err(|e| e.context("index-future"))
        })
    }

    fn indices<'a>(&'a self) -> SourceFuture<'a, Vec<Index>> {
        Box::pin(async move {
            let body = self.post_plain("index-price").await?;
            let dictionary = self
                .dictionary
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            market::parse_indices(&body, &dictionary).map_err(|e| e.context("index-price"))
        })
    }

    fn market_summary<'a>(&'a self) -> SourceFuture<'a, Vec<MarketSummary>> {
        Box::pin(async move {
            let body = self.post_plain("total-negotiated").await?;
            market::parse_market_summary(&body).map_err(|e| e.context("total-negotiated"))
        })
    }

    fn news<'a>(&'a self) -> SourceFuture<'a, Vec<News>> {
        Box::pin(async move {
            let body = self.post_plain("bnown/byma-ads").await?;
            filings::parse_news(&body, |file| self.transport.download_url(file))
                .map_err(|e| e.context("bnown/byma-ads"))
        })
    }

    fn income_statements<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<IncomeStatement>> {
        const ENDPOINT: &str = "bnown/seriesHistoricas/balances";
        Box::pin(async move {
            let body = self
                .transport
                .post_json(ENDPOINT, &filings::statements_payload(symbol))
                .await?;
            filings::parse_income_statements(&body, |file| self.transport.download_url(file))
                .map_err(|e| e.context(ENDPOINT))
        })
    }

    fn is_working_day<'a>(&'a self) -> SourceFuture<'a, bool> {
        Box::pin(async move {
            let body = self.post_plain("market-time").await?;
            market::parse_working_day(&body).map_err(|e| e.context("market-time"))
        })
    }

    fn history<'a>(&'a self, request: HistoryRequest) -> SourceFuture<'a, Option<Ohlcv>> {
        Box::pin(async move {
            let query = history::history_query(&request);
            let body = self.transport.get_api(history::ENDPOINT, &query).await?;
            history::parse_history(&body).map_err(|e| e.context(history::ENDPOINT))
        })
    }
}

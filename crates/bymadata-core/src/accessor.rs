//! Cache-first access to whole collections.

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};

use crate::cache::{CacheStore, Cacheable, SlotKey};
use crate::data_source::{BondBoard, MarketDataSource, SecurityBoard};
use crate::{
    Bond, Category, FetchError, FutureContract, IncomeStatement, Index, MarketSummary, News,
    OptionContract, Security,
};

/// Pairs a [`MarketDataSource`] with a [`CacheStore`].
///
/// This is the only place that calls the source for collection data. A fresh
/// slot is returned without touching the source; a miss fetches once and
/// stores the result; a failed fetch is returned as-is and nothing is stored.
/// Concurrent misses for the same slot are not collapsed: each one fetches and
/// the last write wins.
#[derive(Clone)]
pub struct CachedCollections {
    source: Arc<dyn MarketDataSource>,
    cache: CacheStore,
}

impl std::fmt::Debug for CachedCollections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCollections")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CachedCollections {
    pub fn new(source: Arc<dyn MarketDataSource>, cache: CacheStore) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn source(&self) -> &Arc<dyn MarketDataSource> {
        &self.source
    }

    pub async fn securities(&self, board: SecurityBoard) -> Result<Arc<[Security]>, FetchError> {
        self.load(SlotKey::Collection(board.into()), || {
            self.source.securities(board)
        })
        .await
    }

    pub async fn bonds(&self, board: BondBoard) -> Result<Arc<[Bond]>, FetchError> {
        self.load(SlotKey::Collection(board.into()), || self.source.bonds(board))
            .await
    }

    pub async fn options(&self) -> Result<Arc<[OptionContract]>, FetchError> {
        self.load(SlotKey::Collection(Category::Options), || {
            self.source.options()
        })
        .await
    }

    pub async fn futures(&self) -> Result<Arc<[FutureContract]>, FetchError> {
        self.load(SlotKey::Collection(Category::Futures), || {
            self.source.futures()
        })
        .await
    }

    pub async fn indices(&self) -> Result<Arc<[Index]>, FetchError> {
        self.load(SlotKey::Collection(Category::Indices), || {
            self.source.indices()
        })
        .await
    }

    pub async fn market_summary(&self) -> Result<Arc<[MarketSummary]>, FetchError> {
        self.load(SlotKey::Collection(Category::MarketSummary), || {
            self.source.market_summary()
        })
        .await
    }

    pub async fn news(&self) -> Result<Arc<[News]>, FetchError> {
        self.load(SlotKey::Collection(Category::News), || self.source.news())
            .await
    }

    /// Filings for one ticker, cached per exact ticker string.
    pub async fn income_statements(
        &self,
        symbol: &str,
    ) -> Result<Arc<[IncomeStatement]>, FetchError> {
        let key = SlotKey::Keyed {
            category: Category::IncomeStatements,
            subkey: symbol.to_owned(),
        };
        self.load(key, || self.source.income_statements(symbol))
            .await
    }

    async fn load<T, F, Fut>(&self, key: SlotKey, fetch: F) -> Result<Arc<[T]>, FetchError>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, FetchError>>,
    {
        if let Some(hit) = self.cache.get_slot::<T>(&key) {
            debug!("cache hit for {key} ({} records)", hit.len());
            return Ok(hit);
        }

        debug!("cache miss for {key}, fetching");
        match fetch().await {
            Ok(items) => {
                let items: Arc<[T]> = Arc::from(items);
                self.cache
                    .set_slot(key, T::into_slot(Arc::clone(&items)));
                Ok(items)
            }
            Err(error) => {
                warn!("fetch for {key} failed: {error}");
                Err(error)
            }
        }
    }
}

//! Time-bounded in-memory cache of whole collections.
//!
//! One slot per [`Category`], plus a keyed family of slots for per-ticker
//! collections. A slot is fresh while `elapsed < ttl`; stale and absent slots
//! are both reported as a miss. Slots hold `Arc<[T]>` snapshots, so readers
//! share the stored data without copying and can never write through it.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use crate::{
    Bond, Category, FutureContract, IncomeStatement, Index, MarketSummary, News, OptionContract,
    Security,
};

/// Freshness window shared by every slot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Address of a cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Collection(Category),
    Keyed { category: Category, subkey: String },
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection(category) => f.write_str(category.as_str()),
            Self::Keyed { category, subkey } => write!(f, "{category}:{subkey}"),
        }
    }
}

/// Type-erased slot payload.
#[derive(Debug, Clone)]
pub enum SlotData {
    Securities(Arc<[Security]>),
    Bonds(Arc<[Bond]>),
    Options(Arc<[OptionContract]>),
    Futures(Arc<[FutureContract]>),
    Indices(Arc<[Index]>),
    MarketSummary(Arc<[MarketSummary]>),
    News(Arc<[News]>),
    IncomeStatements(Arc<[IncomeStatement]>),
}

impl SlotData {
    pub fn len(&self) -> usize {
        match self {
            Self::Securities(items) => items.len(),
            Self::Bonds(items) => items.len(),
            Self::Options(items) => items.len(),
            Self::Futures(items) => items.len(),
            Self::Indices(items) => items.len(),
            Self::MarketSummary(items) => items.len(),
            Self::News(items) => items.len(),
            Self::IncomeStatements(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entities that can live in a cache slot.
pub trait Cacheable: Sized {
    fn into_slot(items: Arc<[Self]>) -> SlotData;
    fn from_slot(slot: &SlotData) -> Option<Arc<[Self]>>;
}

macro_rules! cacheable {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Cacheable for $ty {
                fn into_slot(items: Arc<[Self]>) -> SlotData {
                    SlotData::$variant(items)
                }

                fn from_slot(slot: &SlotData) -> Option<Arc<[Self]>> {
                    match slot {
                        SlotData::$variant(items) => Some(Arc::clone(items)),
                        _ => None,
                    }
                }
            }
        )+
    };
}

cacheable! {
    Security => Securities,
    Bond => Bonds,
    OptionContract => Options,
    FutureContract => Futures,
    Index => Indices,
    MarketSummary => MarketSummary,
    News => News,
    IncomeStatement => IncomeStatements,
}

/// Diagnostic view of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheEntryInfo {
    pub count: usize,
    #[serde(rename = "age_ms", serialize_with = "serialize_millis")]
    pub age: Duration,
    pub fresh: bool,
}

fn serialize_millis<S: Serializer>(age: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(age.as_millis()).unwrap_or(u64::MAX))
}

#[derive(Debug)]
struct Slot {
    data: SlotData,
    captured_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    slots: HashMap<SlotKey, Slot>,
    ttl: Duration,
}

impl CacheInner {
    fn is_fresh(&self, slot: &Slot, now: Instant) -> bool {
        now.saturating_duration_since(slot.captured_at) < self.ttl
    }
}

/// Thread-safe collection cache. Clones share the same slot table.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<RwLock<CacheInner>>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                slots: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Cache with the five minute freshness window.
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Cache that never stores anything: every lookup is a miss.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_disabled(&self) -> bool {
        self.ttl().is_zero()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).ttl
    }

    /// Fresh snapshot for `category`, or `None` when absent or stale.
    pub fn get<T: Cacheable>(&self, category: Category) -> Option<Arc<[T]>> {
        self.get_slot(&SlotKey::Collection(category))
    }

    /// Replace the slot for `category` with `data`, stamped now.
    pub fn set<T: Cacheable>(&self, category: Category, data: Vec<T>) {
        self.set_slot(SlotKey::Collection(category), T::into_slot(Arc::from(data)));
    }

    /// Keyed variant of [`get`](Self::get). `subkey` matches exactly.
    pub fn get_keyed<T: Cacheable>(&self, category: Category, subkey: &str) -> Option<Arc<[T]>> {
        self.get_slot(&SlotKey::Keyed {
            category,
            subkey: subkey.to_owned(),
        })
    }

    pub fn set_keyed<T: Cacheable>(
        &self,
        category: Category,
        subkey: impl Into<String>,
        data: Vec<T>,
    ) {
        self.set_slot(
            SlotKey::Keyed {
                category,
                subkey: subkey.into(),
            },
            T::into_slot(Arc::from(data)),
        );
    }

    pub fn get_slot<T: Cacheable>(&self, key: &SlotKey) -> Option<Arc<[T]>> {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let slot = store.slots.get(key)?;
        if !store.is_fresh(slot, Instant::now()) {
            return None;
        }
        T::from_slot(&slot.data)
    }

    pub fn set_slot(&self, key: SlotKey, data: SlotData) {
        let mut store = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if store.ttl.is_zero() {
            return;
        }
        store.slots.insert(
            key,
            Slot {
                data,
                captured_at: Instant::now(),
            },
        );
    }

    /// Drop every slot, keyed ones included.
    pub fn clear(&self) {
        let mut store = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        store.slots.clear();
    }

    /// Snapshot of every stored slot, stale ones included, keyed by slot label.
    pub fn info(&self) -> BTreeMap<String, CacheEntryInfo> {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        store
            .slots
            .iter()
            .map(|(key, slot)| {
                (
                    key.to_string(),
                    CacheEntryInfo {
                        count: slot.data.len(),
                        age: now.saturating_duration_since(slot.captured_at),
                        fresh: store.is_fresh(slot, now),
                    },
                )
            })
            .collect()
    }

    /// Number of stored slots, stale ones included.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use super::*;

    fn security(symbol: &str) -> Security {
        Security {
            symbol: symbol.to_owned(),
            ..Security::default()
        }
    }

    #[test]
    fn test_cache_store_basic_operations() {
        let cache = CacheStore::new(Duration::from_secs(60));

        assert!(cache.get::<Security>(Category::Bluechips).is_none());

        cache.set(Category::Bluechips, vec![security("GGAL")]);
        let hit = cache
            .get::<Security>(Category::Bluechips)
            .expect("fresh slot");
        assert_eq!(hit[0].symbol, "GGAL");

        cache.set(Category::Bluechips, vec![security("YPFD"), security("PAMP")]);
        let hit = cache
            .get::<Security>(Category::Bluechips)
            .expect("fresh slot");
        assert_eq!(hit.len(), 2);
        assert_eq!(hit[0].symbol, "YPFD");
    }

    #[test]
    fn test_cache_expiration() {
        let cache = CacheStore::new(Duration::from_millis(100));

        cache.set(Category::Cedears, vec![security("AAPL")]);
        assert!(cache.get::<Security>(Category::Cedears).is_some());

        sleep(Duration::from_millis(150));

        assert!(cache.get::<Security>(Category::Cedears).is_none());
        let info = cache.info();
        assert!(!info["cedears"].fresh);
        assert!(info["cedears"].age >= Duration::from_millis(100));
    }

    #[test]
    fn test_cache_slots_are_independent() {
        let cache = CacheStore::new(Duration::from_secs(60));

        cache.set(Category::Bluechips, vec![security("GGAL")]);

        assert!(cache.get::<Security>(Category::Galpones).is_none());
        assert!(cache.get::<Bond>(Category::Bluechips).is_none());
    }

    #[test]
    fn test_cache_keyed_slots() {
        let cache = CacheStore::new(Duration::from_secs(60));
        let statement = IncomeStatement {
            symbol: String::from("GGAL"),
            ..IncomeStatement::default()
        };

        cache.set_keyed(Category::IncomeStatements, "GGAL", vec![statement]);

        assert!(cache
            .get_keyed::<IncomeStatement>(Category::IncomeStatements, "GGAL")
            .is_some());
        assert!(cache
            .get_keyed::<IncomeStatement>(Category::IncomeStatements, "ggal")
            .is_none());
        assert!(cache
            .get::<IncomeStatement>(Category::IncomeStatements)
            .is_none());
        assert!(cache.info().contains_key("income_statements:GGAL"));
    }

    #[test]
    fn test_cache_clear_all() {
        let cache = CacheStore::new(Duration::from_secs(60));

        cache.set(Category::Bluechips, vec![security("GGAL")]);
        cache.set_keyed(
            Category::IncomeStatements,
            "YPFD",
            Vec::<IncomeStatement>::new(),
        );
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get::<Security>(Category::Bluechips).is_none());
        assert!(cache
            .get_keyed::<IncomeStatement>(Category::IncomeStatements, "YPFD")
            .is_none());

        cache.clear();
        assert!(cache.info().is_empty());
    }

    #[test]
    fn test_cache_disabled() {
        let cache = CacheStore::disabled();

        assert!(cache.is_disabled());

        cache.set(Category::Bluechips, vec![security("GGAL")]);
        assert!(cache.get::<Security>(Category::Bluechips).is_none());
        assert!(cache.info().is_empty());
    }

    #[test]
    fn test_cache_info_reports_count_and_age() {
        let cache = CacheStore::new(Duration::from_secs(60));

        cache.set(Category::Bluechips, vec![security("GGAL"), security("YPFD")]);

        let info = cache.info();
        assert_eq!(info.len(), 1);
        assert_eq!(info["bluechips"].count, 2);
        assert!(info["bluechips"].fresh);

        let json = serde_json::to_value(info["bluechips"]).expect("serializable");
        assert_eq!(json["count"], 2);
        assert!(json["age_ms"].is_u64());
    }

    #[test]
    fn test_cache_survives_poisoned_lock() {
        let cache = CacheStore::new(Duration::from_secs(60));
        let poisoner = cache.clone();

        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().expect("first writer");
            panic!("poison the cache lock");
        })
        .join();

        cache.set(Category::News, Vec::<News>::new());
        assert!(cache.get::<News>(Category::News).is_some());
    }
}

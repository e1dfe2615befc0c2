//! Shared doubles for the behavior suites.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use bymadata_core::{
    Bond, BondBoard, Category, FetchError, FutureContract, HistoryRequest, HttpClient, HttpError,
    HttpRequest, HttpResponse, IncomeStatement, Index, MarketDataSource, MarketSummary, News,
    Ohlcv, OptionContract, Security, SecurityBoard, SourceFuture,
};

/// In-memory [`MarketDataSource`] that counts fetches per category and can
/// be told to fail any of them. A non-zero `latency` delays every collection
/// answer, which keeps concurrent misses in flight together.
#[derive(Default)]
pub struct FixtureSource {
    pub bluechips: Vec<Security>,
    pub cedears: Vec<Security>,
    pub galpones: Vec<Security>,
    pub bonds: Vec<Bond>,
    pub short_term_bonds: Vec<Bond>,
    pub corporate_bonds: Vec<Bond>,
    pub options: Vec<OptionContract>,
    pub futures: Vec<FutureContract>,
    pub indices: Vec<Index>,
    pub market_summary: Vec<MarketSummary>,
    pub news: Vec<News>,
    pub statements: HashMap<String, Vec<IncomeStatement>>,
    pub working_day: bool,
    pub history: Option<Ohlcv>,
    pub latency: Duration,
    pub failures: Mutex<HashMap<Category, FetchError>>,
    pub calls: Mutex<HashMap<Category, usize>>,
    pub uncached_calls: Mutex<usize>,
}

impl FixtureSource {
    pub fn fail(&self, category: Category, error: FetchError) {
        self.failures
            .lock()
            .expect("lock")
            .insert(category, error);
    }

    pub fn recover(&self, category: Category) {
        self.failures.lock().expect("lock").remove(&category);
    }

    pub fn calls(&self, category: Category) -> usize {
        self.calls
            .lock()
            .expect("lock")
            .get(&category)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("lock").values().sum()
    }

    /// History and working-day requests.
    pub fn uncached_calls(&self) -> usize {
        *self.uncached_calls.lock().expect("lock")
    }

    fn respond<T: Clone + Send + 'static>(
        &self,
        category: Category,
        data: &[T],
    ) -> SourceFuture<'_, Vec<T>> {
        *self
            .calls
            .lock()
            .expect("lock")
            .entry(category)
            .or_insert(0) += 1;
        let result = match self.failures.lock().expect("lock").get(&category) {
            Some(error) => Err(error.clone()),
            None => Ok(data.to_vec()),
        };
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }

    fn record_uncached(&self) {
        *self.uncached_calls.lock().expect("lock") += 1;
    }
}

impl MarketDataSource for FixtureSource {
    fn securities<'a>(&'a self, board: SecurityBoard) -> SourceFuture<'a, Vec<Security>> {
        let data = match board {
            SecurityBoard::Bluechips => &self.bluechips,
            SecurityBoard::Cedears => &self.cedears,
            SecurityBoard::Galpones => &self.galpones,
        };
        self.respond(board.into(), data)
    }

    fn bonds<'a>(&'a self, board: BondBoard) -> SourceFuture<'a, Vec<Bond>> {
        let data = match board {
            BondBoard::Government => &self.bonds,
            BondBoard::ShortTerm => &self.short_term_bonds,
            BondBoard::Corporate => &self.corporate_bonds,
        };
        self.respond(board.into(), data)
    }

    fn options<'a>(&'a self) -> SourceFuture<'a, Vec<OptionContract>> {
        self.respond(Category::Options, &self.options)
    }

    fn futures<'a>(&'a self) -> SourceFuture<'a, Vec<FutureContract>> {
        self.respond(Category::Futures, &self.futures)
    }

    fn indices<'a>(&'a self) -> SourceFuture<'a, Vec<Index>> {
        self.respond(Category::Indices, &self.indices)
    }

    fn market_summary<'a>(&'a self) -> SourceFuture<'a, Vec<MarketSummary>> {
        self.respond(Category::MarketSummary, &self.market_summary)
    }

    fn news<'a>(&'a self) -> SourceFuture<'a, Vec<News>> {
        self.respond(Category::News, &self.news)
    }

    fn income_statements<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<IncomeStatement>> {
        let data = self.statements.get(symbol).cloned().unwrap_or_default();
        self.respond(Category::IncomeStatements, &data)
    }

    fn is_working_day<'a>(&'a self) -> SourceFuture<'a, bool> {
        self.record_uncached();
        let open = self.working_day;
        Box::pin(async move { Ok(open) })
    }

    fn history<'a>(&'a self, _request: HistoryRequest) -> SourceFuture<'a, Option<Ohlcv>> {
        self.record_uncached();
        let series = self.history.clone();
        Box::pin(async move { Ok(series) })
    }
}

pub fn security(symbol: &str, last: f64) -> Security {
    Security {
        symbol: symbol.to_owned(),
        last,
        ..Security::default()
    }
}

pub fn bond(symbol: &str, last: f64) -> Bond {
    Bond {
        quote: security(symbol, last),
        expiration: None,
    }
}

/// HTTP double answering by URL fragment and recording every request.
/// Unrouted URLs answer 404.
pub struct RoutedHttp {
    routes: Vec<(String, HttpResponse)>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl RoutedHttp {
    pub fn new(routes: &[(&str, HttpResponse)]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(fragment, response)| ((*fragment).to_owned(), response.clone()))
                .collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().expect("lock").clone()
    }

    pub fn requests_to(&self, fragment: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.contains(fragment))
            .collect()
    }
}

impl HttpClient for RoutedHttp {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| HttpResponse::with_status(404, ""));
        self.seen.lock().expect("lock").push(request);
        Box::pin(async move { Ok(response) })
    }
}

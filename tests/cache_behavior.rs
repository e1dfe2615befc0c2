//! Behavior-driven tests for the collection cache.
//!
//! These tests verify WHEN the client goes back to the network: fresh
//! collections are reused, stale or cleared ones are refetched, and failures
//! never leave anything behind.

use std::sync::Arc;
use std::time::Duration;

use bymadata_core::{
    BymaClient, Category, ClientConfig, ClientError, FetchError, FetchErrorKind, IncomeStatement,
    Ohlcv, Resolution,
};
use bymadata_tests::{security, FixtureSource};
use time::macros::datetime;

fn client_over(source: &Arc<FixtureSource>, config: ClientConfig) -> BymaClient {
    BymaClient::with_source(source.clone(), config)
}

fn cedear_source() -> Arc<FixtureSource> {
    let mut aapl = security("AAPL", 150.50);
    aapl.change = 2.5;
    aapl.volume = 1_000_000;

    Arc::new(FixtureSource {
        cedears: vec![aapl, security("MSFT", 410.0)],
        ..FixtureSource::default()
    })
}

// =============================================================================
// Cache: Freshness
// =============================================================================

#[tokio::test]
async fn when_collection_is_fresh_system_answers_lookups_without_refetching() {
    // Given: A client whose cedear board holds AAPL
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default());

    // When: AAPL is looked up twice within the freshness window
    let first = client.cedear("AAPL").await.expect("AAPL is listed");
    let second = client.cedear("AAPL").await.expect("AAPL is listed");

    // Then: The board was fetched once and both answers carry the same quote
    assert_eq!(source.calls(Category::Cedears), 1);
    assert_eq!(first, second);
    assert_eq!(first.last, 150.50);
    assert_eq!(first.change, 2.5);
    assert_eq!(first.volume, 1_000_000);
}

#[tokio::test]
async fn when_bulk_getter_repeats_system_returns_the_same_snapshot() {
    // Given: A client with a populated cedear board
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default());

    // When: The whole board is requested twice
    let first = client.cedears().await.expect("fetch succeeds");
    let second = client.cedears().await.expect("cache hit");

    // Then: Both calls share one allocation
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.calls(Category::Cedears), 1);
}

#[tokio::test]
async fn when_freshness_window_elapses_system_refetches() {
    // Given: A client with a very short freshness window
    let source = cedear_source();
    let config = ClientConfig::default().with_cache_ttl(Duration::from_millis(30));
    let client = client_over(&source, config);
    client.cedears().await.expect("fetch succeeds");

    // When: The window passes and the board is requested again
    tokio::time::sleep(Duration::from_millis(60)).await;
    client.cedears().await.expect("fetch succeeds");

    // Then: The source was hit a second time
    assert_eq!(source.calls(Category::Cedears), 2);
}

#[tokio::test]
async fn when_stale_entry_exists_cache_info_reports_it_as_not_fresh() {
    // Given: A cached board whose window has passed
    let source = cedear_source();
    let config = ClientConfig::default().with_cache_ttl(Duration::from_millis(20));
    let client = client_over(&source, config);
    client.cedears().await.expect("fetch succeeds");
    tokio::time::sleep(Duration::from_millis(40)).await;

    // When: The cache is inspected
    let info = client.cache_info();

    // Then: The slot is listed with its size and flagged stale
    let entry = info.get("cedears").expect("slot listed");
    assert_eq!(entry.count, 2);
    assert!(!entry.fresh);
    assert!(entry.age >= Duration::from_millis(20));
}

// =============================================================================
// Cache: Invalidation
// =============================================================================

#[tokio::test]
async fn when_cache_is_cleared_system_refetches_on_next_access() {
    // Given: A warmed cedear board
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default());
    client.cedear("AAPL").await.expect("AAPL is listed");

    // When: The cache is cleared and AAPL looked up again
    client.clear_cache();
    let again = client.cedear("AAPL").await.expect("AAPL is listed");

    // Then: The board was fetched twice
    assert_eq!(source.calls(Category::Cedears), 2);
    assert_eq!(again.last, 150.50);
}

#[tokio::test]
async fn when_cache_is_cleared_twice_system_behaves_as_once() {
    // Given: A warmed client
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default());
    client.cedears().await.expect("fetch succeeds");

    // When: Clear runs twice in a row
    client.clear_cache();
    client.clear_cache();

    // Then: The cache is empty and the next read fetches exactly once
    assert!(client.cache_info().is_empty());
    client.cedears().await.expect("fetch succeeds");
    assert_eq!(source.calls(Category::Cedears), 2);
}

#[tokio::test]
async fn when_clients_are_cloned_system_shares_one_cache() {
    // Given: A client and its clone
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default());
    let clone = client.clone();

    // When: One warms the board and the other reads it
    client.cedears().await.expect("fetch succeeds");
    clone.cedear("MSFT").await.expect("MSFT is listed");

    // Then: A single fetch served both
    assert_eq!(source.calls(Category::Cedears), 1);
}

// =============================================================================
// Cache: Failures
// =============================================================================

#[tokio::test]
async fn when_fetch_fails_system_propagates_the_error_unchanged() {
    // Given: A source whose bluechip board is unavailable
    let source = Arc::new(FixtureSource::default());
    let failure = FetchError::unavailable("leading-equity: HTTP error 503");
    source.fail(Category::Bluechips, failure.clone());
    let client = client_over(&source, ClientConfig::default());

    // When: GGAL is looked up on that board
    let error = client.bluechip("GGAL").await.expect_err("fetch fails");

    // Then: The lookup surfaces the source error untouched and nothing was cached
    assert_eq!(error, ClientError::Fetch(failure));
    assert_eq!(
        error.as_fetch().map(FetchError::kind),
        Some(FetchErrorKind::Unavailable)
    );
    assert!(!client.cache_info().contains_key("bluechips"));
}

#[tokio::test]
async fn when_source_recovers_system_fetches_again_after_a_failure() {
    // Given: A failed first attempt
    let source = cedear_source();
    source.fail(Category::Cedears, FetchError::timeout("cedears timed out"));
    let client = client_over(&source, ClientConfig::default());
    client.cedears().await.expect_err("fetch fails");

    // When: The source recovers
    source.recover(Category::Cedears);
    let board = client.cedears().await.expect("fetch succeeds");

    // Then: The retry reached the source and its result is now cached
    assert_eq!(board.len(), 2);
    assert_eq!(source.calls(Category::Cedears), 2);
    assert!(client.cache_info()["cedears"].fresh);
}

// =============================================================================
// Cache: Configuration
// =============================================================================

#[tokio::test]
async fn when_cache_is_disabled_every_call_reaches_the_source() {
    // Given: A client with caching turned off
    let source = cedear_source();
    let client = client_over(&source, ClientConfig::default().with_cache(false));

    // When: The same board is read twice
    client.cedears().await.expect("fetch succeeds");
    client.cedear("AAPL").await.expect("AAPL is listed");

    // Then: Both reads fetched and nothing is retained
    assert_eq!(source.calls(Category::Cedears), 2);
    assert!(client.cache_info().is_empty());
}

#[tokio::test]
async fn when_statements_are_requested_per_ticker_system_caches_each_ticker_separately() {
    // Given: Filings for two issuers
    let filing = |symbol: &str, period: &str| IncomeStatement {
        symbol: symbol.to_owned(),
        period: period.to_owned(),
        ..IncomeStatement::default()
    };
    let source = Arc::new(FixtureSource {
        statements: [
            (String::from("GGAL"), vec![filing("GGAL", "2023"), filing("GGAL", "2022")]),
            (String::from("YPFD"), vec![filing("YPFD", "2023")]),
        ]
        .into_iter()
        .collect(),
        ..FixtureSource::default()
    });
    let client = client_over(&source, ClientConfig::default());

    // When: GGAL, YPFD and GGAL again are requested
    let ggal = client.income_statements("GGAL").await.expect("fetch succeeds");
    let ypfd = client.income_statements("YPFD").await.expect("fetch succeeds");
    client.income_statements("GGAL").await.expect("cache hit");

    // Then: Each ticker was fetched once and owns its own slot
    assert_eq!(ggal.len(), 2);
    assert_eq!(ypfd.len(), 1);
    assert_eq!(source.calls(Category::IncomeStatements), 2);

    let info = client.cache_info();
    assert_eq!(info["income_statements:GGAL"].count, 2);
    assert_eq!(info["income_statements:YPFD"].count, 1);
}

#[tokio::test]
async fn when_history_or_working_day_repeat_system_never_caches_them() {
    // Given: A source with a one-bar series and an open market
    let source = Arc::new(FixtureSource {
        working_day: true,
        history: Some(Ohlcv {
            time: vec![1_704_067_200],
            open: vec![100.0],
            high: vec![110.0],
            low: vec![95.0],
            close: vec![105.0],
            volume: vec![1_000],
        }),
        ..FixtureSource::default()
    });
    let client = client_over(&source, ClientConfig::default());
    let from = datetime!(2024-01-01 00:00 UTC);
    let to = datetime!(2024-01-31 00:00 UTC);

    // When: Each is requested twice
    for _ in 0..2 {
        assert!(client.is_working_day().await.expect("source answers"));
        client
            .history("GGAL", Resolution::Daily, from, to)
            .await
            .expect("series exists");
    }

    // Then: Every request reached the source and the cache stayed empty
    assert_eq!(source.uncached_calls(), 4);
    assert!(client.cache_info().is_empty());
}

//! # bymadata-core
//!
//! Typed client for the public market data API of Bolsas y Mercados
//! Argentinos (BYMA).
//!
//! ## Overview
//!
//! - **Domain models** for equities, bonds, options, futures, indices,
//!   session totals, announcements and financial statements
//! - **Endpoint adapters** that turn loosely typed JSON into those models
//! - **Collection cache** with a five minute freshness window
//! - **Lookups** (single symbol, batch, substring search) derived from the
//!   cached collections without extra requests
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`accessor`] | Cache-first collection access |
//! | [`adapters`] | Live HTTP adapter ([`BymaSource`]) |
//! | [`cache`] | Time-bounded collection cache |
//! | [`client`] | [`BymaClient`] facade |
//! | [`config`] | Client settings |
//! | [`data_source`] | Source contract and fetch errors |
//! | [`domain`] | Domain models |
//! | [`error`] | Client error type |
//! | [`http_client`] | HTTP client abstraction |
//! | [`lookup`] | Symbol lookups over collections |
//! | [`retry`] | Retry and backoff policy |
//! | [`transport`] | URL building, headers, retries |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bymadata_core::{BymaClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BymaClient::connect(ClientConfig::default()).await;
//!
//!     let bluechips = client.bluechips().await?;
//!     println!("{} blue chips", bluechips.len());
//!
//!     // Served from the cache: no new request.
//!     let ggal = client.bluechip("GGAL").await?;
//!     println!("GGAL {}", ggal.last);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use bymadata_core::{ClientError, FetchErrorKind};
//!
//! fn describe(error: &ClientError) -> &'static str {
//!     match error {
//!         ClientError::NotFound { .. } => "no such symbol",
//!         ClientError::Fetch(fetch) if fetch.kind() == FetchErrorKind::RateLimited => "slow down",
//!         ClientError::Fetch(_) => "upstream failure",
//!         _ => "bad request",
//!     }
//! }
//! ```

pub mod accessor;
pub mod adapters;
pub mod cache;
pub mod client;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod lookup;
pub mod retry;
pub mod transport;

pub use accessor::CachedCollections;
pub use adapters::BymaSource;
pub use cache::{CacheEntryInfo, CacheStore, DEFAULT_TTL};
pub use client::BymaClient;
pub use config::ClientConfig;
pub use data_source::{
    BondBoard, Category, FetchError, FetchErrorKind, MarketDataSource, SecurityBoard, SourceFuture,
};
pub use domain::*;
pub use error::ClientError;
pub use http_client::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use retry::{Backoff, RetryConfig};

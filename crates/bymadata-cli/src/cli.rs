//! CLI argument definitions for bymadata.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `collection` | Print a whole collection (bluechips, bonds, news, ...) |
//! | `security` | Find an equity on any board |
//! | `lookup` | Find a symbol on one specific board |
//! | `batch` | Resolve several equity symbols at once |
//! | `search` | Substring search over equity symbols |
//! | `statements` | Financial statements for one issuer |
//! | `history` | Historical OHLCV series |
//! | `working-day` | Whether the market opens today |
//! | `cache-info` | Warm the cache and print its slots |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--no-cache` | `false` | Disable the collection cache |
//! | `--timeout-secs` | `30` | Per-request timeout |
//!
//! # Examples
//!
//! ```bash
//! bymadata collection bluechips --pretty
//! bymadata security GGAL
//! bymadata lookup bond AL30
//! bymadata batch GGAL YPFD AAPL
//! bymadata history GGAL --days 30
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Query the BYMA public market data API from the terminal.
///
/// Output is JSON on stdout. Set RUST_LOG=debug to see requests and cache
/// decisions on stderr.
#[derive(Debug, Parser)]
#[command(name = "bymadata", author, version, about = "BYMA market data CLI")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Fetch every collection from the network, bypassing the cache.
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    /// Per-request timeout in seconds (overrides BYMADATA_TIMEOUT_SECS).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a whole collection.
    ///
    ///   bymadata collection bluechips
    ///   bymadata collection short-term-bonds --pretty
    Collection(CollectionArgs),

    /// Find an equity on the bluechip, CEDEAR or general boards (in that order).
    Security(SymbolArgs),

    /// Find a symbol on one specific board.
    ///
    ///   bymadata lookup cedear AAPL
    ///   bymadata lookup future DLR/MAY24
    Lookup(LookupArgs),

    /// Resolve several equity symbols at once; unknown symbols are omitted.
    Batch(BatchArgs),

    /// Equities whose symbol contains the text, ignoring case.
    Search(SearchArgs),

    /// Financial statement filings for one issuer.
    Statements(SymbolArgs),

    /// Historical OHLCV series.
    ///
    ///   bymadata history GGAL --days 90 --resolution W
    History(HistoryArgs),

    /// Whether the market opens today.
    WorkingDay,

    /// Fetch the given collections, then print the cache slots.
    CacheInfo(CacheInfoArgs),
}

#[derive(Debug, Args)]
pub struct CollectionArgs {
    /// Collection name, e.g. bluechips, cedears, galpones, bonds,
    /// short-term-bonds, corporate-bonds, options, futures, indices,
    /// market-summary, news.
    pub category: String,
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    pub symbol: String,
}

/// Boards addressable by `lookup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKind {
    Bluechip,
    Cedear,
    Galpone,
    /// Any bond board.
    Bond,
    Option,
    Future,
    Index,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(value_enum)]
    pub kind: LookupKind,
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to look for; empty matches every symbol.
    pub text: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub symbol: String,

    /// Days back from now.
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Bar resolution: D, W or M.
    #[arg(long, default_value = "D")]
    pub resolution: String,
}

#[derive(Debug, Args)]
pub struct CacheInfoArgs {
    /// Collections to fetch before reporting.
    #[arg(default_values_t = [
        String::from("bluechips"),
        String::from("cedears"),
        String::from("galpones"),
    ])]
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bymadata", "security", "GGAL", "--pretty", "--no-cache"])
            .expect("valid arguments");

        assert!(cli.pretty);
        assert!(cli.no_cache);
        assert!(matches!(cli.command, Command::Security(SymbolArgs { ref symbol }) if symbol == "GGAL"));
    }

    #[test]
    fn cache_info_defaults_to_equity_boards() {
        let cli = Cli::try_parse_from(["bymadata", "cache-info"]).expect("valid arguments");
        match cli.command {
            Command::CacheInfo(args) => assert_eq!(args.categories.len(), 3),
            other => panic!("unexpected command {other:?}"),
        }
    }
}

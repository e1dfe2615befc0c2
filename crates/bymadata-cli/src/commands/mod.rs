mod cache_info;
mod collection;
mod history;
mod lookup;

use std::time::Duration;

use bymadata_core::{BymaClient, ClientConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let client = BymaClient::connect(client_config(cli)).await;

    match &cli.command {
        Command::Collection(args) => collection::run(args, &client).await,
        Command::Statements(args) => collection::statements(args, &client).await,
        Command::Security(args) => lookup::security(args, &client).await,
        Command::Lookup(args) => lookup::run(args, &client).await,
        Command::Batch(args) => lookup::batch(args, &client).await,
        Command::Search(args) => lookup::search(args, &client).await,
        Command::History(args) => history::run(args, &client).await,
        Command::WorkingDay => history::working_day(&client).await,
        Command::CacheInfo(args) => cache_info::run(args, &client).await,
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if cli.no_cache {
        config = config.with_cache(false);
    }
    config
}

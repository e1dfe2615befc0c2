use std::collections::BTreeMap;

use bymadata_core::BymaClient;
use serde_json::Value;

use crate::cli::{BatchArgs, LookupArgs, LookupKind, SearchArgs, SymbolArgs};
use crate::error::CliError;

pub async fn security(args: &SymbolArgs, client: &BymaClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.security(&args.symbol).await?)?)
}

pub async fn run(args: &LookupArgs, client: &BymaClient) -> Result<Value, CliError> {
    let symbol = args.symbol.as_str();
    let value = match args.kind {
        LookupKind::Bluechip => serde_json::to_value(client.bluechip(symbol).await?)?,
        LookupKind::Cedear => serde_json::to_value(client.cedear(symbol).await?)?,
        LookupKind::Galpone => serde_json::to_value(client.galpone(symbol).await?)?,
        LookupKind::Bond => serde_json::to_value(client.bond(symbol).await?)?,
        LookupKind::Option => serde_json::to_value(client.option(symbol).await?)?,
        LookupKind::Future => serde_json::to_value(client.future(symbol).await?)?,
        LookupKind::Index => serde_json::to_value(client.index(symbol).await?)?,
    };
    Ok(value)
}

pub async fn batch(args: &BatchArgs, client: &BymaClient) -> Result<Value, CliError> {
    let found: BTreeMap<_, _> = client
        .multiple_securities(&args.symbols)
        .await?
        .into_iter()
        .collect();
    Ok(serde_json::to_value(found)?)
}

pub async fn search(args: &SearchArgs, client: &BymaClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.search_securities(&args.text).await?)?)
}

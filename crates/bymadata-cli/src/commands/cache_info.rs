use bymadata_core::{BymaClient, Category};
use log::info;
use serde_json::Value;

use crate::cli::CacheInfoArgs;
use crate::error::CliError;

use super::collection;

pub async fn run(args: &CacheInfoArgs, client: &BymaClient) -> Result<Value, CliError> {
    for name in &args.categories {
        let category: Category = name.parse()?;
        collection::fetch(category, client).await?;
        info!("warmed {category}");
    }
    Ok(serde_json::to_value(client.cache_info())?)
}

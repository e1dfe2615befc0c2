use bymadata_core::{BymaClient, Category};
use serde_json::Value;

use crate::cli::{CollectionArgs, SymbolArgs};
use crate::error::CliError;

pub async fn run(args: &CollectionArgs, client: &BymaClient) -> Result<Value, CliError> {
    let category: Category = args.category.parse()?;
    fetch(category, client).await
}

pub async fn statements(args: &SymbolArgs, client: &BymaClient) -> Result<Value, CliError> {
    let items = client.income_statements(&args.symbol).await?;
    Ok(serde_json::to_value(&items[..])?)
}

pub(super) async fn fetch(category: Category, client: &BymaClient) -> Result<Value, CliError> {
    let value = match category {
        Category::Bluechips => serde_json::to_value(&client.bluechips().await?[..])?,
        Category::Cedears => serde_json::to_value(&client.cedears().await?[..])?,
        Category::Galpones => serde_json::to_value(&client.galpones().await?[..])?,
        Category::Bonds => serde_json::to_value(&client.bonds().await?[..])?,
        Category::ShortTermBonds => serde_json::to_value(&client.short_term_bonds().await?[..])?,
        Category::CorporateBonds => serde_json::to_value(&client.corporate_bonds().await?[..])?,
        Category::Options => serde_json::to_value(&client.options().await?[..])?,
        Category::Futures => serde_json::to_value(&client.futures().await?[..])?,
        Category::Indices => serde_json::to_value(&client.indices().await?[..])?,
        Category::MarketSummary => serde_json::to_value(&client.market_summary().await?[..])?,
        Category::News => serde_json::to_value(&client.news().await?[..])?,
        Category::IncomeStatements => {
            return Err(CliError::Usage(String::from(
                "income statements are per issuer; use `bymadata statements <TICKER>`",
            )))
        }
    };
    Ok(value)
}

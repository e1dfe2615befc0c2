use bymadata_core::{BymaClient, Resolution};
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(args: &HistoryArgs, client: &BymaClient) -> Result<Value, CliError> {
    let resolution: Resolution = args.resolution.parse()?;
    let to = OffsetDateTime::now_utc();
    let from = to - Duration::days(i64::from(args.days));

    let series = client.history(&args.symbol, resolution, from, to).await?;
    let bars = series.to_bars()?;

    Ok(json!({
        "symbol": args.symbol,
        "resolution": resolution,
        "bars": bars,
    }))
}

pub async fn working_day(client: &BymaClient) -> Result<Value, CliError> {
    let open = client.is_working_day().await?;
    Ok(json!({ "working_day": open }))
}

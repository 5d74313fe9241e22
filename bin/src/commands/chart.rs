//! Chart command implementation.

use crate::display::{Format, num, print_json};
use anyhow::{Context, Result};
use chrono::DateTime;
use gecko_lib::prelude::*;

/// Show the price, market cap and volume series of a coin.
pub(crate) async fn show_chart(
    client: &GeckoClient,
    id: &str,
    vs: &str,
    days: &str,
    format: Format,
) -> Result<()> {
    let chart = client
        .coins_id_market_chart(id, vs, days)
        .await
        .with_context(|| format!("Failed to fetch market chart for {id}"))?;

    if let Format::Json = format {
        return print_json(&chart);
    }

    if chart.prices.is_empty() {
        println!("No data points.");
        return Ok(());
    }

    println!("{:<20} {:>14} {:>14} {:>14}", "TIME (UTC)", "PRICE", "MARKET CAP", "VOLUME");
    println!("{}", "-".repeat(65));

    for (i, [ts, price]) in chart.prices.iter().enumerate() {
        let time = DateTime::from_timestamp_millis(*ts as i64)
            .map_or_else(|| ts.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "{:<20} {:>14} {:>14} {:>14}",
            time,
            num(Some(*price)),
            num(chart.market_caps.get(i).map(|p| p[1])),
            num(chart.total_volumes.get(i).map(|p| p[1])),
        );
    }

    if let Some((at, price)) = chart.latest_price() {
        println!(
            "\nLatest: {} {} at {}",
            num(Some(price)),
            vs.to_uppercase(),
            at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("Points: {}", chart.prices.len());
    Ok(())
}

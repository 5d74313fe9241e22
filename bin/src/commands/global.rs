//! Global command implementation.

use crate::display::{Format, format_number, num, pct, print_json};
use anyhow::{Context, Result};
use gecko_lib::prelude::*;

/// Show market-wide metrics.
pub(crate) async fn show_global(client: &GeckoClient, format: Format) -> Result<()> {
    let global: Global = client.global().await.context("Failed to fetch global data")?;

    if let Format::Json = format {
        return print_json(&global);
    }

    println!("Active cryptocurrencies: {}", global.active_cryptocurrencies);
    println!("Markets:                 {}", global.markets);
    println!("Total market cap (USD):  {}", num(global.total_market_cap.get("usd").copied()));
    println!("Total volume (USD):      {}", num(global.total_volume.get("usd").copied()));
    println!(
        "Market cap change 24h:   {}",
        pct(global.market_cap_change_percentage_24h_usd)
    );

    let mut dominance: Vec<_> = global.market_cap_percentage.iter().collect();
    dominance.sort_by(|a, b| b.1.total_cmp(a.1));
    if !dominance.is_empty() {
        println!("\nDominance:");
        for (symbol, share) in dominance.iter().take(5) {
            println!("  {:<6} {:>6}%", symbol.to_uppercase(), format_number(**share));
        }
    }

    if let Some(updated) = global.updated() {
        println!("\nUpdated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}

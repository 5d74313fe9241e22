//! Coin command implementation.

use crate::display::{Format, num, pct, print_json};
use anyhow::{Context, Result};
use gecko_lib::CurrencyMap;
use gecko_lib::prelude::*;

/// Show details of a single coin, with market data quoted in `vs`.
pub(crate) async fn show_coin(
    client: &GeckoClient,
    id: &str,
    vs: &str,
    format: Format,
) -> Result<()> {
    let coin = client
        .coins_id(id, CoinsIdParams::market_only())
        .await
        .with_context(|| format!("Failed to fetch coin: {id}"))?;

    if let Format::Json = format {
        return print_json(&coin);
    }

    let vs = vs.to_lowercase();
    println!("Coin:     {} ({})", coin.name, coin.symbol.to_uppercase());
    println!("ID:       {}", coin.id);
    if let Some(rank) = coin.market_cap_rank {
        println!("Rank:     #{rank}");
    }
    if let Some(genesis) = coin.genesis_date {
        println!("Genesis:  {}", genesis.format("%Y-%m-%d"));
    }
    if let Some(algo) = coin.hashing_algorithm.as_deref() {
        println!("Hashing:  {algo}");
    }
    if !coin.categories.is_empty() {
        println!("Categories: {}", coin.categories.join(", "));
    }

    let Some(market) = coin.market_data else {
        return Ok(());
    };

    let quote = |map: &CurrencyMap| map.get(&vs).copied();
    println!("\nMarket ({}):", vs.to_uppercase());
    println!("  Price:        {}", num(quote(&market.current_price)));
    println!("  Market cap:   {}", num(quote(&market.market_cap)));
    println!("  Volume 24h:   {}", num(quote(&market.total_volume)));
    println!("  High/Low 24h: {} / {}", num(quote(&market.high_24h)), num(quote(&market.low_24h)));
    println!("  ATH / ATL:    {} / {}", num(quote(&market.ath)), num(quote(&market.atl)));
    println!("  Change 24h:   {}", pct(market.price_change_percentage_24h));
    println!("  Change 7d:    {}", pct(market.price_change_percentage_7d));
    println!("  Change 30d:   {}", pct(market.price_change_percentage_30d));
    println!("  Supply:       {} / {}", num(market.circulating_supply), num(market.max_supply));
    if let Some(updated) = market.last_updated {
        println!("  Updated:      {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}

//! Price command implementation.
//!
//! A single id/currency pair goes through the single price lookup so that a
//! missing quote is reported as an error rather than an empty table.

use crate::display::{Format, format_number, print_json};
use anyhow::{Context, Result};
use gecko_lib::prelude::*;

/// Show prices of `ids` quoted in each of `vs`.
pub(crate) async fn price(
    client: &GeckoClient,
    ids: &[String],
    vs: &[String],
    format: Format,
) -> Result<()> {
    if let ([id], [currency]) = (ids, vs) {
        let price = client
            .simple_single_price(id, currency)
            .await
            .with_context(|| format!("Failed to fetch {id} price"))?;
        return match format {
            Format::Json => print_json(&price),
            Format::Table => {
                println!("{} {}", format_number(price.market_price), price.currency.to_uppercase());
                Ok(())
            }
        };
    }

    let prices = client
        .simple_price(ids, vs)
        .await
        .context("Failed to fetch prices")?;

    if let Format::Json = format {
        return print_json(&prices);
    }

    println!("{:<20} {:<8} {:>16}", "ID", "CURRENCY", "PRICE");
    println!("{}", "-".repeat(46));

    let mut rows: Vec<_> = prices
        .iter()
        .flat_map(|(id, quotes)| quotes.iter().map(move |(cur, price)| (id, cur, *price)))
        .collect();
    rows.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    for (id, currency, price) in &rows {
        println!("{:<20} {:<8} {:>16}", id, currency, format_number(*price));
    }

    let missing: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !prices.contains_key(*id))
        .collect();
    if !missing.is_empty() {
        println!("\nNo data for: {}", missing.join(", "));
    }
    Ok(())
}

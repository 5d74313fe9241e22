//! Categories command implementation.

use crate::display::{Format, num, pct, print_json, truncate};
use anyhow::{Context, Result};
use gecko_lib::prelude::*;

/// List coin categories sorted by `order`.
pub(crate) async fn list_categories(
    client: &GeckoClient,
    order: CategoryOrder,
    format: Format,
) -> Result<()> {
    let categories = client
        .coins_categories(order)
        .await
        .context("Failed to fetch categories")?;

    if let Format::Json = format {
        return print_json(&categories);
    }

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!("{:<32} {:>12} {:>10} {:>12}", "NAME", "MARKET CAP", "24H", "VOLUME");
    println!("{}", "-".repeat(69));

    for category in &categories {
        println!(
            "{:<32} {:>12} {:>10} {:>12}",
            truncate(&category.name, 32),
            num(category.market_cap),
            pct(category.market_cap_change_24h),
            num(category.volume_24h),
        );
    }

    println!("\nTotal: {} categories", categories.len());
    Ok(())
}

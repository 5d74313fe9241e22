//! Rates command implementation.

use crate::display::{Format, format_number, print_json};
use anyhow::{Context, Result};
use gecko_lib::prelude::*;

/// Show BTC exchange rates, grouped by kind.
pub(crate) async fn show_rates(client: &GeckoClient, format: Format) -> Result<()> {
    let rates = client
        .exchange_rates()
        .await
        .context("Failed to fetch exchange rates")?;

    if let Format::Json = format {
        return print_json(&rates);
    }

    let mut rows: Vec<_> = rates.iter().collect();
    rows.sort_by(|a, b| (&a.1.kind, a.0).cmp(&(&b.1.kind, b.0)));

    println!("{:<8} {:<24} {:>18} {:<10}", "KEY", "NAME", "1 BTC =", "TYPE");
    println!("{}", "-".repeat(63));
    for (key, rate) in &rows {
        println!(
            "{:<8} {:<24} {:>18} {:<10}",
            key,
            rate.name,
            format!("{} {}", format_number(rate.value), rate.unit),
            rate.kind
        );
    }

    println!("\nTotal: {} rates", rows.len());
    Ok(())
}

//! Markets command implementation.
//!
//! Pages are fetched concurrently through one shared client, at most
//! `concurrency` at a time. Request hooks count started requests and track
//! how many are in flight; Ctrl-C cancels every outstanding page.

use crate::display::{Format, num, pct, print_json, truncate};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use gecko_lib::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Parse a sort order, warning when the value is not recognized.
pub(crate) fn parse_order(s: &str) -> MarketOrder {
    s.parse().unwrap_or_else(|e| {
        warn!("{e}; using {}", MarketOrder::default());
        MarketOrder::default()
    })
}

/// Request counters updated from the client hooks.
#[derive(Debug, Default)]
struct RequestStats {
    started: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

fn instrumented(config: ClientConfig, stats: &Arc<RequestStats>) -> ClientConfig {
    let on_start = Arc::clone(stats);
    let on_end = Arc::clone(stats);
    config
        .with_start_hook(move || {
            let n = on_start.started.fetch_add(1, Ordering::Relaxed) + 1;
            let active = on_start.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
            on_start.peak.fetch_max(active, Ordering::Relaxed);
            debug!(request = n, in_flight = active, "request started");
        })
        .with_end_hook(move || {
            let active = on_end.in_flight.fetch_sub(1, Ordering::Relaxed) - 1;
            debug!(in_flight = active, "request finished");
        })
}

/// Fetch pages `1..=pages` with at most `concurrency` requests in flight.
/// Rows come back in page order.
async fn fetch_pages(
    client: &GeckoClient,
    params: &CoinsMarketsParams,
    pages: u32,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Result<Vec<CoinsMarketItem>> {
    let pages: Vec<Vec<CoinsMarketItem>> = stream::iter(1..=pages.max(1))
        .map(|page| {
            let params = params.clone().with_page(page);
            async move {
                client
                    .coins_markets(&params, cancel)
                    .await
                    .with_context(|| format!("Failed to fetch page {page}"))
            }
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;
    Ok(pages.into_iter().flatten().collect())
}

/// Fetch `pages` pages of the market listing and print them in rank order.
pub(crate) async fn markets(
    config: ClientConfig,
    params: CoinsMarketsParams,
    pages: u32,
    concurrency: usize,
    format: Format,
) -> Result<()> {
    let stats = Arc::new(RequestStats::default());
    let client =
        GeckoClient::new(instrumented(config, &stats)).context("Failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling outstanding pages");
                cancel.cancel();
            }
        })
    };

    let result = fetch_pages(&client, &params, pages, concurrency, &cancel).await;
    interrupt.abort();

    let coins = result?;
    info!(
        requests = stats.started.load(Ordering::Relaxed),
        peak_in_flight = stats.peak.load(Ordering::Relaxed),
        coins = coins.len(),
        per_page = params.effective_per_page(),
        "markets fetched"
    );

    match format {
        Format::Json => print_json(&coins),
        Format::Table => {
            print_table(&coins, &params.price_change_percentage);
            Ok(())
        }
    }
}

fn print_table(coins: &[CoinsMarketItem], windows: &[PriceChangeWindow]) {
    if coins.is_empty() {
        println!("No coins found.");
        return;
    }

    print!(
        "{:>5} {:<8} {:<20} {:>14} {:>12} {:>10}",
        "RANK", "SYMBOL", "NAME", "PRICE", "MARKET CAP", "24H"
    );
    for window in windows {
        print!(" {:>10}", window.as_str().to_uppercase());
    }
    println!();
    println!("{}", "-".repeat(74 + 11 * windows.len()));

    for coin in coins {
        print!(
            "{:>5} {:<8} {:<20} {:>14} {:>12} {:>10}",
            coin.market_cap_rank
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            truncate(&coin.symbol.to_uppercase(), 8),
            truncate(&coin.name, 20),
            num(coin.current_price),
            num(coin.market_cap),
            pct(coin.price_change_percentage_24h),
        );
        for window in windows {
            print!(" {:>10}", pct(coin.price_change(*window)));
        }
        println!();
    }

    println!("\nTotal: {} coins", coins.len());
}

//! gecko CLI - query the CoinGecko v3 API from the terminal.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use gecko_lib::prelude::*;
use gecko_lib::url::BASE_URL;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "gecko")]
#[command(about = "Query the CoinGecko v3 API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: Format,

    /// API base URL
    #[arg(long, default_value = BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60", global = true)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Ping,

    /// Show simple prices
    Price {
        /// Coin ids (e.g., bitcoin, ethereum)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Quote currencies
        #[arg(long, value_delimiter = ',', default_value = "usd")]
        vs: Vec<String>,
    },

    /// List coins by market data, fetching pages concurrently
    Markets {
        /// Quote currency
        #[arg(long, default_value = "usd")]
        vs: String,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Maximum concurrent page requests
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Rows per page (1-250; anything else means 100)
        #[arg(long, default_value = "100", allow_negative_numbers = true)]
        per_page: i32,

        /// Sort order (unrecognized values fall back to market_cap_desc)
        #[arg(long, default_value = "market_cap_desc")]
        order: String,

        /// Restrict to these coin ids
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,

        /// Include the 7 day sparkline
        #[arg(long)]
        sparkline: bool,

        /// Extra price change windows (1h, 24h, 7d, 14d, 30d, 200d, 1y)
        #[arg(long, value_delimiter = ',')]
        change: Vec<PriceChangeWindow>,
    },

    /// Show coin details
    Coin {
        /// Coin id
        id: String,

        /// Quote currency for market data
        #[arg(long, default_value = "usd")]
        vs: String,
    },

    /// Show historical market chart
    Chart {
        /// Coin id
        id: String,

        /// Quote currency
        #[arg(long, default_value = "usd")]
        vs: String,

        /// Number of days (or "max")
        #[arg(long, default_value = "1")]
        days: String,
    },

    /// List coin categories
    Categories {
        /// Sort order
        #[arg(long, default_value = "market_cap_desc")]
        order: CategoryOrder,
    },

    /// Show global market data
    Global,

    /// Show BTC exchange rates
    Rates,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = ClientConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    }
    .with_base_url(cli.base_url);

    match command {
        Commands::Ping => commands::ping::ping(&connect(config)?, cli.format).await,
        Commands::Price { ids, vs } => {
            commands::price::price(&connect(config)?, &ids, &vs, cli.format).await
        }
        Commands::Markets {
            vs,
            pages,
            concurrency,
            per_page,
            order,
            ids,
            sparkline,
            change,
        } => {
            let params = CoinsMarketsParams::new(vs)
                .with_ids(ids)
                .with_order(commands::markets::parse_order(&order))
                .with_per_page(per_page)
                .with_sparkline(sparkline)
                .with_price_change(&change);
            // Markets installs its own hooks before building the client
            commands::markets::markets(config, params, pages, concurrency, cli.format).await
        }
        Commands::Coin { id, vs } => {
            commands::coin::show_coin(&connect(config)?, &id, &vs, cli.format).await
        }
        Commands::Chart { id, vs, days } => {
            commands::chart::show_chart(&connect(config)?, &id, &vs, &days, cli.format).await
        }
        Commands::Categories { order } => {
            commands::categories::list_categories(&connect(config)?, order, cli.format).await
        }
        Commands::Global => commands::global::show_global(&connect(config)?, cli.format).await,
        Commands::Rates => commands::rates::show_rates(&connect(config)?, cli.format).await,
    }
}

fn connect(config: ClientConfig) -> Result<GeckoClient> {
    GeckoClient::new(config).context("Failed to build HTTP client")
}

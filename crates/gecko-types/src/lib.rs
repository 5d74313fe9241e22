//! Response and query types for the geckoscope CoinGecko client.
//!
//! This crate holds the data side of the client:
//!
//! - [`CoinsMarketItem`] - One row of the paginated market listing
//! - [`CoinsId`], [`CoinsIdTickers`], [`CoinsIdHistory`], [`CoinsIdMarketChart`] - Per-coin data
//! - [`Global`], [`ExchangeRates`], [`CoinCategory`] - Market-wide data
//! - [`MarketOrder`], [`CategoryOrder`], [`PriceChangeWindow`] - Query parameters

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geckoscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coin;
mod global;
mod market;
mod order;

pub use coin::{
    ChartPoint, CoinMarketData, CoinsId, CoinsIdHistory, CoinsIdMarketChart, CoinsIdTickers,
    CoinsListItem, CurrencyMap, HistoryMarketData, Image, Ticker, TickerMarket,
};
pub use global::{
    CoinCategory, EventCountryItem, EventsCountries, EventsTypes, ExchangeRate, ExchangeRates,
    ExchangeRatesResponse, Global, GlobalResponse, Ping, SimplePrices, SimpleSinglePrice,
};
pub use market::{CoinsMarketItem, Roi, Sparkline};
pub use order::{CategoryOrder, MarketOrder, PriceChangeWindow, QueryValueError};

//! Market-wide endpoints: ping, simple prices, events, exchange rates,
//! global metrics and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::CurrencyMap;

/// Response of `/ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping {
    /// Server greeting.
    pub gecko_says: String,
}

/// Response of `/simple/price`: coin id → quote currency → price.
pub type SimplePrices = HashMap<String, CurrencyMap>;

/// A single price looked up through `/simple/price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSinglePrice {
    /// Coin id.
    pub id: String,
    /// Quote currency.
    pub currency: String,
    /// Price.
    pub market_price: f64,
}

/// Country with listed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCountryItem {
    /// Country name.
    pub country: Option<String>,
    /// ISO country code.
    pub code: String,
}

/// Response envelope of `/events/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsCountries {
    /// Countries.
    #[serde(default)]
    pub data: Vec<EventCountryItem>,
}

/// Response of `/events/types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsTypes {
    /// Event type names.
    #[serde(default)]
    pub data: Vec<String>,
    /// Number of types.
    pub count: u32,
}

/// A BTC exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Currency name.
    pub name: String,
    /// Currency unit symbol.
    pub unit: String,
    /// Value of one BTC in this currency.
    pub value: f64,
    /// `crypto`, `fiat` or `commodity`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// BTC exchange rates keyed by currency code.
pub type ExchangeRates = HashMap<String, ExchangeRate>;

/// Response envelope of `/exchange_rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRatesResponse {
    /// Rates.
    pub rates: ExchangeRates,
}

/// Market-wide metrics from `/global`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Global {
    /// Tracked coins.
    pub active_cryptocurrencies: u64,
    /// Upcoming ICOs.
    #[serde(default)]
    pub upcoming_icos: u64,
    /// Ongoing ICOs.
    #[serde(default)]
    pub ongoing_icos: u64,
    /// Ended ICOs.
    #[serde(default)]
    pub ended_icos: u64,
    /// Tracked exchanges.
    pub markets: u64,
    /// Total market cap per quote currency.
    #[serde(default)]
    pub total_market_cap: CurrencyMap,
    /// Total 24h volume per quote currency.
    #[serde(default)]
    pub total_volume: CurrencyMap,
    /// Dominance per coin symbol, in percent.
    #[serde(default)]
    pub market_cap_percentage: CurrencyMap,
    /// 24h change of total USD market cap, in percent.
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    /// Unix timestamp of the snapshot, in seconds.
    pub updated_at: i64,
}

impl Global {
    /// Returns the snapshot time.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.updated_at, 0)
    }
}

/// Response envelope of `/global`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalResponse {
    /// Metrics.
    pub data: Global,
}

/// Coin category with aggregate market data, from `/coins/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinCategory {
    /// Category id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Combined market cap.
    pub market_cap: Option<f64>,
    /// 24h market cap change, in percent.
    pub market_cap_change_24h: Option<f64>,
    /// Short description.
    pub content: Option<String>,
    /// Logo URLs of the three largest coins.
    #[serde(default)]
    pub top_3_coins: Vec<String>,
    /// Combined 24h volume.
    pub volume_24h: Option<f64>,
    /// Last upstream refresh.
    pub updated_at: Option<DateTime<Utc>>,
}

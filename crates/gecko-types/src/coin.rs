//! Per-coin endpoints: the coin list, detail, tickers, history and charts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Values keyed by quote currency (`usd`, `eur`, `btc`, ...).
pub type CurrencyMap = HashMap<String, f64>;

/// Entry of `/coins/list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinsListItem {
    /// CoinGecko coin id.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
}

/// Logo URLs at the sizes CoinGecko serves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Image {
    /// Thumbnail.
    pub thumb: Option<String>,
    /// Small.
    pub small: Option<String>,
    /// Large; absent on historical snapshots.
    pub large: Option<String>,
}

/// Response of `/coins/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsId {
    /// CoinGecko coin id.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Platform the asset is issued on, for tokens.
    pub asset_platform_id: Option<String>,
    /// Target block time.
    pub block_time_in_minutes: Option<f64>,
    /// Proof-of-work algorithm, if any.
    pub hashing_algorithm: Option<String>,
    /// Category names.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Localized names; only present when localization was requested.
    pub localization: Option<HashMap<String, String>>,
    /// Localized descriptions.
    #[serde(default)]
    pub description: HashMap<String, String>,
    /// Project links (homepage, explorers, repositories ...).
    pub links: Option<serde_json::Value>,
    /// Logos.
    pub image: Option<Image>,
    /// Country of origin.
    pub country_origin: Option<String>,
    /// Genesis date.
    pub genesis_date: Option<NaiveDate>,
    /// Rank by market cap.
    pub market_cap_rank: Option<u32>,
    /// Market data; only present when requested.
    pub market_data: Option<CoinMarketData>,
    /// Community statistics; only present when requested.
    pub community_data: Option<serde_json::Value>,
    /// Repository statistics; only present when requested.
    pub developer_data: Option<serde_json::Value>,
    /// Exchange tickers; only present when requested.
    pub tickers: Option<Vec<Ticker>>,
    /// Last upstream refresh.
    pub last_updated: Option<DateTime<Utc>>,
}

/// `market_data` block of a coin detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinMarketData {
    /// Price per quote currency.
    #[serde(default)]
    pub current_price: CurrencyMap,
    /// All-time high per quote currency.
    #[serde(default)]
    pub ath: CurrencyMap,
    /// All-time low per quote currency.
    #[serde(default)]
    pub atl: CurrencyMap,
    /// Market cap per quote currency.
    #[serde(default)]
    pub market_cap: CurrencyMap,
    /// Rank by market cap.
    pub market_cap_rank: Option<u32>,
    /// 24h volume per quote currency.
    #[serde(default)]
    pub total_volume: CurrencyMap,
    /// 24h high per quote currency.
    #[serde(default)]
    pub high_24h: CurrencyMap,
    /// 24h low per quote currency.
    #[serde(default)]
    pub low_24h: CurrencyMap,
    /// Relative 24h change, in percent.
    pub price_change_percentage_24h: Option<f64>,
    /// Relative 7d change, in percent.
    pub price_change_percentage_7d: Option<f64>,
    /// Relative 30d change, in percent.
    pub price_change_percentage_30d: Option<f64>,
    /// Relative 1y change, in percent.
    pub price_change_percentage_1y: Option<f64>,
    /// Coins in circulation.
    pub circulating_supply: Option<f64>,
    /// Total minted supply.
    pub total_supply: Option<f64>,
    /// Hard supply cap.
    pub max_supply: Option<f64>,
    /// Seven day sparkline, when requested.
    pub sparkline_7d: Option<crate::Sparkline>,
    /// Last upstream refresh.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Exchange listed on a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMarket {
    /// Exchange name.
    pub name: String,
    /// Exchange id.
    pub identifier: String,
    /// Whether the exchange runs trading incentives.
    #[serde(default)]
    pub has_trading_incentive: bool,
}

/// One exchange pair quoting a coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Base asset symbol.
    pub base: String,
    /// Quote asset symbol.
    pub target: String,
    /// Exchange.
    pub market: TickerMarket,
    /// Last traded price in the quote asset.
    pub last: Option<f64>,
    /// 24h volume in the base asset.
    pub volume: Option<f64>,
    /// Last price converted to `btc`, `eth`, `usd`.
    #[serde(default)]
    pub converted_last: CurrencyMap,
    /// Volume converted to `btc`, `eth`, `usd`.
    #[serde(default)]
    pub converted_volume: CurrencyMap,
    /// Trust score colour (`green`, `yellow`, `red`).
    pub trust_score: Option<String>,
    /// Bid/ask spread in percent.
    pub bid_ask_spread_percentage: Option<f64>,
    /// Upstream timestamp.
    pub timestamp: Option<DateTime<Utc>>,
    /// Time of the last trade.
    pub last_traded_at: Option<DateTime<Utc>>,
    /// Whether the price is an outlier.
    #[serde(default)]
    pub is_anomaly: bool,
    /// Whether the ticker stopped updating.
    #[serde(default)]
    pub is_stale: bool,
    /// Exchange trade page.
    pub trade_url: Option<String>,
    /// CoinGecko id of the base asset.
    pub coin_id: Option<String>,
    /// CoinGecko id of the quote asset.
    pub target_coin_id: Option<String>,
}

/// Response of `/coins/{id}/tickers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsIdTickers {
    /// Coin display name.
    pub name: String,
    /// Tickers on this page.
    #[serde(default)]
    pub tickers: Vec<Ticker>,
}

/// `market_data` block of a historical snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryMarketData {
    /// Price per quote currency.
    #[serde(default)]
    pub current_price: CurrencyMap,
    /// Market cap per quote currency.
    #[serde(default)]
    pub market_cap: CurrencyMap,
    /// Volume per quote currency.
    #[serde(default)]
    pub total_volume: CurrencyMap,
}

/// Response of `/coins/{id}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsIdHistory {
    /// CoinGecko coin id.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Localized names.
    pub localization: Option<HashMap<String, String>>,
    /// Logos.
    pub image: Option<Image>,
    /// Market snapshot; absent for dates before the coin was tracked.
    pub market_data: Option<HistoryMarketData>,
    /// Community statistics.
    pub community_data: Option<serde_json::Value>,
    /// Repository statistics.
    pub developer_data: Option<serde_json::Value>,
    /// Public interest statistics.
    pub public_interest_stats: Option<serde_json::Value>,
}

/// `[timestamp_ms, value]` sample of a market chart.
pub type ChartPoint = [f64; 2];

/// Response of `/coins/{id}/market_chart`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinsIdMarketChart {
    /// Price samples.
    #[serde(default)]
    pub prices: Vec<ChartPoint>,
    /// Market cap samples.
    #[serde(default)]
    pub market_caps: Vec<ChartPoint>,
    /// Volume samples.
    #[serde(default)]
    pub total_volumes: Vec<ChartPoint>,
}

impl CoinsIdMarketChart {
    /// Returns the most recent price sample with its timestamp.
    #[must_use]
    pub fn latest_price(&self) -> Option<(DateTime<Utc>, f64)> {
        let [ts, price] = *self.prices.last()?;
        DateTime::from_timestamp_millis(ts as i64).map(|at| (at, price))
    }
}

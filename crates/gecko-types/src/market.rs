//! Rows of the paginated `/coins/markets` listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One coin in a market listing page.
///
/// Everything except the identity columns is optional: thinly traded coins
/// routinely come back with `null` prices and supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsMarketItem {
    /// CoinGecko coin id (e.g. `bitcoin`).
    pub id: String,
    /// Ticker symbol (e.g. `btc`).
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Logo URL.
    pub image: Option<String>,
    /// Price in the requested currency.
    pub current_price: Option<f64>,
    /// Market capitalisation.
    pub market_cap: Option<f64>,
    /// Rank by market cap.
    pub market_cap_rank: Option<u32>,
    /// Market cap at maximum supply.
    pub fully_diluted_valuation: Option<f64>,
    /// 24h traded volume.
    pub total_volume: Option<f64>,
    /// 24h high.
    pub high_24h: Option<f64>,
    /// 24h low.
    pub low_24h: Option<f64>,
    /// Absolute 24h price change.
    pub price_change_24h: Option<f64>,
    /// Relative 24h price change, in percent.
    pub price_change_percentage_24h: Option<f64>,
    /// Absolute 24h market cap change.
    pub market_cap_change_24h: Option<f64>,
    /// Relative 24h market cap change, in percent.
    pub market_cap_change_percentage_24h: Option<f64>,
    /// Coins in circulation.
    pub circulating_supply: Option<f64>,
    /// Total minted supply.
    pub total_supply: Option<f64>,
    /// Hard supply cap, if any.
    pub max_supply: Option<f64>,
    /// All-time high price.
    pub ath: Option<f64>,
    /// Distance from the all-time high, in percent.
    pub ath_change_percentage: Option<f64>,
    /// When the all-time high was set.
    pub ath_date: Option<DateTime<Utc>>,
    /// All-time low price.
    pub atl: Option<f64>,
    /// Distance from the all-time low, in percent.
    pub atl_change_percentage: Option<f64>,
    /// When the all-time low was set.
    pub atl_date: Option<DateTime<Utc>>,
    /// Return on investment since the ICO, when known.
    pub roi: Option<Roi>,
    /// Last upstream refresh.
    pub last_updated: Option<DateTime<Utc>>,
    /// Seven day price sparkline, present when requested.
    pub sparkline_in_7d: Option<Sparkline>,
    /// 1h change, present when the `1h` window is requested.
    pub price_change_percentage_1h_in_currency: Option<f64>,
    /// 24h change, present when the `24h` window is requested.
    pub price_change_percentage_24h_in_currency: Option<f64>,
    /// 7d change, present when the `7d` window is requested.
    pub price_change_percentage_7d_in_currency: Option<f64>,
    /// 14d change, present when the `14d` window is requested.
    pub price_change_percentage_14d_in_currency: Option<f64>,
    /// 30d change, present when the `30d` window is requested.
    pub price_change_percentage_30d_in_currency: Option<f64>,
    /// 200d change, present when the `200d` window is requested.
    pub price_change_percentage_200d_in_currency: Option<f64>,
    /// 1y change, present when the `1y` window is requested.
    pub price_change_percentage_1y_in_currency: Option<f64>,
}

impl CoinsMarketItem {
    /// Returns the price change for a requested window, if it was returned.
    #[must_use]
    pub const fn price_change(&self, window: crate::PriceChangeWindow) -> Option<f64> {
        use crate::PriceChangeWindow as W;
        match window {
            W::Hour1 => self.price_change_percentage_1h_in_currency,
            W::Hour24 => self.price_change_percentage_24h_in_currency,
            W::Day7 => self.price_change_percentage_7d_in_currency,
            W::Day14 => self.price_change_percentage_14d_in_currency,
            W::Day30 => self.price_change_percentage_30d_in_currency,
            W::Day200 => self.price_change_percentage_200d_in_currency,
            W::Year1 => self.price_change_percentage_1y_in_currency,
        }
    }
}

/// Return on investment block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    /// Multiple of the initial price.
    pub times: f64,
    /// Currency the ROI is quoted in.
    pub currency: String,
    /// ROI in percent.
    pub percentage: f64,
}

/// Price sparkline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sparkline {
    /// Hourly prices, oldest first.
    #[serde(default)]
    pub price: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceChangeWindow;

    #[test]
    fn test_market_item_minimal() {
        let item: CoinsMarketItem =
            serde_json::from_str(r#"{"id":"bitcoin","symbol":"btc","name":"Bitcoin"}"#).unwrap();
        assert_eq!(item.id, "bitcoin");
        assert!(item.current_price.is_none());
        assert!(item.sparkline_in_7d.is_none());
    }

    #[test]
    fn test_market_item_full_row() {
        let json = r#"{
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
            "current_price": 3120.55,
            "market_cap": 375000000000,
            "market_cap_rank": 2,
            "total_volume": 14500000000.5,
            "ath": 4878.26,
            "ath_date": "2021-11-10T14:24:19.604Z",
            "roi": {"times": 71.2, "currency": "btc", "percentage": 7120.0},
            "last_updated": "2024-03-01T12:00:00.000Z",
            "sparkline_in_7d": {"price": [3000.0, 3050.5, 3120.55]},
            "price_change_percentage_7d_in_currency": 4.25,
            "some_future_field": true
        }"#;
        let item: CoinsMarketItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.market_cap_rank, Some(2));
        assert_eq!(item.sparkline_in_7d.as_ref().unwrap().price.len(), 3);
        assert_eq!(item.roi.as_ref().unwrap().currency, "btc");
        assert!(item.ath_date.is_some());
        assert_eq!(item.price_change(PriceChangeWindow::Day7), Some(4.25));
        assert_eq!(item.price_change(PriceChangeWindow::Hour1), None);
    }

    #[test]
    fn test_market_item_null_columns() {
        let json = r#"{"id":"x","symbol":"x","name":"X","current_price":null,"roi":null,"ath_date":null}"#;
        let item: CoinsMarketItem = serde_json::from_str(json).unwrap();
        assert!(item.current_price.is_none());
        assert!(item.roi.is_none());
    }
}

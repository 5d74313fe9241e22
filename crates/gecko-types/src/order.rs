//! Sort orders and window selectors accepted as query parameters.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown query value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct QueryValueError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl QueryValueError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Sort order for the `/coins/markets` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketOrder {
    /// Largest market cap first.
    #[default]
    MarketCapDesc,
    /// Smallest market cap first.
    MarketCapAsc,
    /// Highest CoinGecko score first.
    GeckoDesc,
    /// Lowest CoinGecko score first.
    GeckoAsc,
    /// Highest 24h volume first.
    VolumeDesc,
    /// Lowest 24h volume first.
    VolumeAsc,
    /// Coin id, descending.
    IdDesc,
    /// Coin id, ascending.
    IdAsc,
}

impl MarketOrder {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarketCapDesc => "market_cap_desc",
            Self::MarketCapAsc => "market_cap_asc",
            Self::GeckoDesc => "gecko_desc",
            Self::GeckoAsc => "gecko_asc",
            Self::VolumeDesc => "volume_desc",
            Self::VolumeAsc => "volume_asc",
            Self::IdDesc => "id_desc",
            Self::IdAsc => "id_asc",
        }
    }

    /// Returns all orders.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MarketCapDesc,
            Self::MarketCapAsc,
            Self::GeckoDesc,
            Self::GeckoAsc,
            Self::VolumeDesc,
            Self::VolumeAsc,
            Self::IdDesc,
            Self::IdAsc,
        ]
    }

    /// Parses an order, falling back to [`MarketOrder::MarketCapDesc`] for
    /// empty or unrecognized input.
    ///
    /// ```
    /// use gecko_types::MarketOrder;
    ///
    /// assert_eq!(MarketOrder::parse_or_default("volume_asc"), MarketOrder::VolumeAsc);
    /// assert_eq!(MarketOrder::parse_or_default("sideways"), MarketOrder::MarketCapDesc);
    /// assert_eq!(MarketOrder::parse_or_default(""), MarketOrder::MarketCapDesc);
    /// ```
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for MarketOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketOrder {
    type Err = QueryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|order| order.as_str() == lower)
            .ok_or_else(|| {
                QueryValueError::new(
                    "market order",
                    s,
                    "market_cap_desc, market_cap_asc, gecko_desc, gecko_asc, volume_desc, volume_asc, id_desc, id_asc",
                )
            })
    }
}

/// Sort order for the `/coins/categories` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Largest market cap first.
    #[default]
    MarketCapDesc,
    /// Smallest market cap first.
    MarketCapAsc,
    /// Name, descending.
    NameDesc,
    /// Name, ascending.
    NameAsc,
    /// Largest 24h market cap change first.
    #[serde(rename = "market_cap_change_24h_desc")]
    MarketCapChange24hDesc,
    /// Smallest 24h market cap change first.
    #[serde(rename = "market_cap_change_24h_asc")]
    MarketCapChange24hAsc,
}

impl CategoryOrder {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarketCapDesc => "market_cap_desc",
            Self::MarketCapAsc => "market_cap_asc",
            Self::NameDesc => "name_desc",
            Self::NameAsc => "name_asc",
            Self::MarketCapChange24hDesc => "market_cap_change_24h_desc",
            Self::MarketCapChange24hAsc => "market_cap_change_24h_asc",
        }
    }

    /// Returns all orders.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MarketCapDesc,
            Self::MarketCapAsc,
            Self::NameDesc,
            Self::NameAsc,
            Self::MarketCapChange24hDesc,
            Self::MarketCapChange24hAsc,
        ]
    }
}

impl std::fmt::Display for CategoryOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryOrder {
    type Err = QueryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|order| order.as_str() == lower)
            .ok_or_else(|| {
                QueryValueError::new(
                    "category order",
                    s,
                    "market_cap_desc, market_cap_asc, name_desc, name_asc, market_cap_change_24h_desc, market_cap_change_24h_asc",
                )
            })
    }
}

/// Time window for the `price_change_percentage` columns of a market listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceChangeWindow {
    /// One hour.
    #[serde(rename = "1h")]
    Hour1,
    /// 24 hours.
    #[serde(rename = "24h")]
    Hour24,
    /// Seven days.
    #[serde(rename = "7d")]
    Day7,
    /// 14 days.
    #[serde(rename = "14d")]
    Day14,
    /// 30 days.
    #[serde(rename = "30d")]
    Day30,
    /// 200 days.
    #[serde(rename = "200d")]
    Day200,
    /// One year.
    #[serde(rename = "1y")]
    Year1,
}

impl PriceChangeWindow {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1h",
            Self::Hour24 => "24h",
            Self::Day7 => "7d",
            Self::Day14 => "14d",
            Self::Day30 => "30d",
            Self::Day200 => "200d",
            Self::Year1 => "1y",
        }
    }

    /// Returns all windows, shortest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hour1,
            Self::Hour24,
            Self::Day7,
            Self::Day14,
            Self::Day30,
            Self::Day200,
            Self::Year1,
        ]
    }
}

impl std::fmt::Display for PriceChangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceChangeWindow {
    type Err = QueryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|window| window.as_str() == lower)
            .ok_or_else(|| {
                QueryValueError::new("price change window", s, "1h, 24h, 7d, 14d, 30d, 200d, 1y")
            })
    }
}

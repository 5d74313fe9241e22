//! Benchmark fixtures for geckoscope.

use bytes::Bytes;
use futures::stream::{self, Iter};
use serde_json::json;
use std::convert::Infallible;

/// Stream type fed to the decoder in benchmarks.
pub type ChunkStream = Iter<std::vec::IntoIter<Result<Bytes, Infallible>>>;

/// Build a `/coins/markets` page with `rows` fully populated rows.
pub fn market_page(rows: usize) -> String {
    let rows: Vec<_> = (1..=rows)
        .map(|rank| {
            json!({
                "id": format!("coin-{rank}"),
                "symbol": format!("c{rank}"),
                "name": format!("Coin {rank}"),
                "image": format!("https://assets.coingecko.com/coins/images/{rank}/large/coin.png"),
                "current_price": 1000.0 / rank as f64,
                "market_cap": 1.0e12 / rank as f64,
                "market_cap_rank": rank,
                "fully_diluted_valuation": null,
                "total_volume": 3.2e9 / rank as f64,
                "high_24h": 1010.0 / rank as f64,
                "low_24h": 990.0 / rank as f64,
                "price_change_24h": -1.25,
                "price_change_percentage_24h": -0.125,
                "market_cap_change_24h": -1.1e8,
                "market_cap_change_percentage_24h": -0.11,
                "circulating_supply": 19_600_000.0,
                "total_supply": 21_000_000.0,
                "max_supply": 21_000_000.0,
                "ath": 73_738.0,
                "ath_change_percentage": -12.5,
                "ath_date": "2024-03-14T07:10:36.635Z",
                "atl": 67.81,
                "atl_change_percentage": 94_000.0,
                "atl_date": "2013-07-06T00:00:00.000Z",
                "roi": null,
                "last_updated": "2024-04-01T12:00:00.000Z",
                "price_change_percentage_7d_in_currency": 3.5
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}

/// Split `body` into a stream of chunks of `size` bytes.
pub fn chunked(body: &str, size: usize) -> ChunkStream {
    let chunks: Vec<_> = body
        .as_bytes()
        .chunks(size.max(1))
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    stream::iter(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_page_shape() {
        let page: Vec<serde_json::Value> = serde_json::from_str(&market_page(3)).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[2]["id"], "coin-3");
    }
}

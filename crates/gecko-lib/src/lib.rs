//! CoinGecko v3 client library.
//!
//! This is a facade crate that re-exports the geckoscope workspace crates for
//! convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use gecko_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeckoClient::with_defaults()?;
//!     let params = CoinsMarketsParams::new("usd").with_per_page(250);
//!
//!     let page = client.coins_markets(&params, &CancellationToken::new()).await?;
//!     for coin in &page {
//!         println!("{} {:?}", coin.symbol, coin.current_price);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geckoscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export response and parameter types
pub use gecko_types::*;

// Re-export the client and endpoints
#[cfg(feature = "fetch")]
pub use gecko_fetch::{
    ByteStream, CancellationToken, ClientConfig, CoinsIdParams, CoinsMarketsParams,
    DEFAULT_PER_PAGE, DecodeError, GeckoClient, GeckoError, Hook, HttpError, MAX_PER_PAGE,
    SyntaxError, decode_array, url,
};

/// Prelude module for convenient imports.
///
/// ```
/// use gecko_lib::prelude::*;
/// ```
pub mod prelude {
    pub use gecko_types::{
        CategoryOrder, CoinsId, CoinsMarketItem, Global, MarketOrder, PriceChangeWindow,
        SimpleSinglePrice,
    };

    #[cfg(feature = "fetch")]
    pub use gecko_fetch::{
        CancellationToken, ClientConfig, CoinsIdParams, CoinsMarketsParams, GeckoClient,
        GeckoError, Result,
    };
}

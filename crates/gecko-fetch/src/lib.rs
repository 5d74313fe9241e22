//! HTTP client, streaming decoder and endpoints for the CoinGecko v3 API.
//!
//! This crate provides the request pipeline:
//!
//! - [`url`] - Base URL, endpoint paths and query strings
//! - [`GeckoClient`] - HTTP client with instrumentation hooks and cancellable streaming
//! - [`decode_array`] - Incremental decoding of a streamed JSON array
//! - Endpoint methods on [`GeckoClient`], such as [`GeckoClient::coins_markets`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geckoscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod decode;
mod error;
pub mod url;

pub use api::{CoinsIdParams, CoinsMarketsParams, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use client::{ByteStream, ClientConfig, GeckoClient, Hook, HttpError};
pub use decode::{DecodeError, SyntaxError, decode_array};
pub use error::{GeckoError, Result};
pub use tokio_util::sync::CancellationToken;

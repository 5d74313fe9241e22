//! Top-level error type for endpoint calls.

use thiserror::Error;

use crate::{DecodeError, HttpError};

/// Result type alias for endpoint calls.
pub type Result<T> = std::result::Result<T, GeckoError>;

/// Errors returned by [`GeckoClient`](crate::GeckoClient) endpoint methods.
#[derive(Error, Debug)]
pub enum GeckoError {
    /// A required parameter was empty. Raised before any network activity.
    #[error("{0} is required")]
    Validation(&'static str),

    /// The request failed or the server returned an error status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// `/simple/price` returned no quote for the requested pair.
    #[error("No {currency} price for {id}")]
    PriceNotFound {
        /// Coin id.
        id: String,
        /// Quote currency.
        currency: String,
    },
}

impl GeckoError {
    /// Returns true for errors caused by caller input rather than the
    /// network or the server.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Fails with [`GeckoError::Validation`] if `value` is empty or blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeckoError::Validation(field));
    }
    Ok(())
}

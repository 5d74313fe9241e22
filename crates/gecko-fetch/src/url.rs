//! CoinGecko URL and query construction.

use reqwest::Url;

use crate::HttpError;

/// Base URL of the public CoinGecko v3 API.
pub const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Appends path segments to a base URL.
///
/// Each segment is percent-encoded on its own, so a segment containing `/`,
/// `?` or `#` cannot change which endpoint is addressed.
///
/// # Example
///
/// ```
/// use gecko_fetch::url::endpoint_url;
///
/// let url = endpoint_url("https://api.coingecko.com/api/v3/", &["coins", "markets"]).unwrap();
/// assert_eq!(url.as_str(), "https://api.coingecko.com/api/v3/coins/markets");
/// ```
///
/// # Errors
///
/// Returns [`HttpError::InvalidUrl`] if `base` is not an absolute
/// hierarchical URL.
pub fn endpoint_url<S: AsRef<str>>(base: &str, segments: &[S]) -> Result<Url, HttpError> {
    let invalid = |reason: String| HttpError::InvalidUrl {
        url: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Splits a fixed endpoint path such as `/coins/markets` into segments.
#[must_use]
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Segments of a per-coin endpoint: `coins`, the id, then `suffix`.
#[must_use]
pub fn coin_segments<'a>(id: &'a str, suffix: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec!["coins", id.trim()];
    segments.extend_from_slice(suffix);
    segments
}

/// Ordered query string pairs.
///
/// Values are stored unencoded; percent-encoding happens when the pairs are
/// attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a key/value pair.
    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Appends a boolean as `true`/`false`.
    pub fn push_flag(&mut self, key: &'static str, value: bool) -> &mut Self {
        self.push(key, value)
    }

    /// Appends a comma separated list; nothing is appended for an empty list.
    pub fn push_list<S: AsRef<str>>(&mut self, key: &'static str, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",");
            self.pairs.push((key, joined));
        }
        self
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no pairs were added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

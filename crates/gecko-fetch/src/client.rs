//! HTTP client and request executor.

use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::url::{BASE_URL, Query, endpoint_url, path_segments};

/// Zero-argument callback fired around every request.
pub type Hook = Arc<dyn Fn() + Send + Sync>;

/// Live response body of a streaming request.
pub type ByteStream = BoxStream<'static, Result<Bytes, reqwest::Error>>;

/// Configuration for the CoinGecko client.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root that endpoint paths are appended to.
    pub base_url: String,
    /// Request timeout. Ignored when `http_client` is set.
    pub timeout: Duration,
    /// Connection timeout. Ignored when `http_client` is set.
    pub connect_timeout: Duration,
    /// User agent string. Ignored when `http_client` is set.
    pub user_agent: String,
    /// Pre-built transport to use instead of building one.
    pub http_client: Option<reqwest::Client>,
    /// Called immediately before each request is sent.
    pub start_hook: Option<Hook>,
    /// Called once each request call returns, on every exit path.
    pub end_hook: Option<Hook>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("geckoscope/{}", env!("CARGO_PKG_VERSION")),
            http_client: None,
            start_hook: None,
            end_hook: None,
        }
    }
}

impl ClientConfig {
    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Uses an existing `reqwest` client as transport.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the hook fired before each request.
    #[must_use]
    pub fn with_start_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.start_hook = Some(Arc::new(hook));
        self
    }

    /// Sets the hook fired after each request.
    #[must_use]
    pub fn with_end_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.end_hook = Some(Arc::new(hook));
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .field("start_hook", &self.start_hook.is_some())
            .field("end_hook", &self.end_hook.is_some())
            .finish()
    }
}

/// Errors raised while executing a request.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The transport failed (DNS, connect, TLS, timeout, body read ...).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A buffered request returned a status other than 200.
    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A streaming request returned a status other than 200.
    #[error("return status code is {status}")]
    StreamStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The request was cancelled before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// The base URL and path do not form a usable URL.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl HttpError {
    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::StreamStatus { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Cancelled | Self::InvalidUrl { .. } => None,
        }
    }
}

/// Fires the end hook when dropped.
struct HookGuard<'a> {
    end: Option<&'a (dyn Fn() + Send + Sync)>,
}

impl Drop for HookGuard<'_> {
    fn drop(&mut self) {
        if let Some(end) = self.end {
            end();
        }
    }
}

/// CoinGecko HTTP client.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GeckoClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl GeckoClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let client = match &config.http_client {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_nodelay(true)
                .timeout(config.timeout)
                .connect_timeout(config.connect_timeout)
                .user_agent(&config.user_agent)
                .gzip(true)
                .build()?,
        };
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, HttpError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a GET request for a fixed `path` such as `/coins/markets`
    /// under the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn request(&self, path: &str, query: &Query) -> Result<Request, HttpError> {
        self.request_segments(&path_segments(path), query)
    }

    /// Builds a GET request from path segments. Each segment is
    /// percent-encoded, so caller supplied ids stay inside their segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn request_segments(&self, segments: &[&str], query: &Query) -> Result<Request, HttpError> {
        let url = endpoint_url(&self.config.base_url, segments)?;
        let mut builder = self.client.get(url);
        if !query.is_empty() {
            builder = builder.query(query.pairs());
        }
        Ok(builder.build()?)
    }

    /// Runs the start hook and returns a guard that runs the end hook.
    fn instrument(&self) -> HookGuard<'_> {
        if let Some(start) = &self.config.start_hook {
            start();
        }
        HookGuard {
            end: self.config.end_hook.as_deref(),
        }
    }

    /// Sends a request and reads the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if sending or reading fails and
    /// [`HttpError::Status`], carrying the body, for any status other than 200.
    /// The status wins even if the error body cannot be read.
    pub async fn execute(&self, request: Request) -> Result<Bytes, HttpError> {
        let _hooks = self.instrument();
        debug!(url = %request.url(), "GET");

        let response = self.client.execute(request).await?;
        let status = response.status();

        if status != StatusCode::OK {
            // The status is the error; a body that fails to arrive only loses detail.
            let body = match response.bytes().await {
                Ok(body) => String::from_utf8_lossy(&body).into_owned(),
                Err(e) => {
                    debug!(status = status.as_u16(), error = %e, "error body unreadable");
                    String::new()
                }
            };
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response read");
        Ok(body)
    }

    /// Sends a request and returns the body as a live stream.
    ///
    /// The request races `cancel`; cancelling it aborts the request. Once the
    /// stream is returned the caller owns it, and dropping it closes the
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if sending fails,
    /// [`HttpError::Cancelled`] if `cancel` fires first, and
    /// [`HttpError::StreamStatus`] for any status other than 200. In the
    /// last case the body is drained and discarded first.
    pub async fn execute_streaming(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> Result<ByteStream, HttpError> {
        let _hooks = self.instrument();
        debug!(url = %request.url(), "GET (streaming)");

        let response = tokio::select! {
            () = cancel.cancelled() => return Err(HttpError::Cancelled),
            response = self.client.execute(request) => response?,
        };

        let status = response.status();
        if status != StatusCode::OK {
            tokio::select! {
                () = cancel.cancelled() => {}
                drained = response.bytes() => {
                    debug!(
                        status = status.as_u16(),
                        bytes = drained.map_or(0, |b| b.len()),
                        "discarded error body"
                    );
                }
            }
            return Err(HttpError::StreamStatus {
                status: status.as_u16(),
            });
        }

        debug!(status = status.as_u16(), "streaming response");
        Ok(response.bytes_stream().boxed())
    }
}

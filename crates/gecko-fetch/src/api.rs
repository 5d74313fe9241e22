//! CoinGecko v3 endpoints.
//!
//! Every method validates its required inputs before touching the network.
//! The market listing is read through [`decode_array`] straight off the
//! response stream; everything else is read in full and deserialized in one go.

use gecko_types::{
    CategoryOrder, CoinCategory, CoinsId, CoinsIdHistory, CoinsIdMarketChart, CoinsIdTickers,
    CoinsListItem, CoinsMarketItem, EventCountryItem, EventsCountries, EventsTypes, ExchangeRates,
    ExchangeRatesResponse, Global, GlobalResponse, MarketOrder, Ping, PriceChangeWindow,
    SimplePrices, SimpleSinglePrice,
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{GeckoError, Result, require};
use crate::url::{Query, coin_segments};
use crate::{DecodeError, GeckoClient, decode_array};

/// Page size used when the requested one is out of range.
pub const DEFAULT_PER_PAGE: usize = 100;

/// Largest page the market listing serves.
pub const MAX_PER_PAGE: usize = 250;

/// Parameters of the `/coins/markets` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinsMarketsParams {
    /// Quote currency (required).
    pub vs_currency: String,
    /// Restrict the listing to these coin ids.
    pub ids: Vec<String>,
    /// Sort order; `None` means [`MarketOrder::MarketCapDesc`].
    pub order: Option<MarketOrder>,
    /// Rows per page; values outside `1..=250` fall back to 100.
    pub per_page: i32,
    /// One based page number.
    pub page: u32,
    /// Include the seven day sparkline.
    pub sparkline: bool,
    /// Extra price change columns to include.
    pub price_change_percentage: Vec<PriceChangeWindow>,
}

impl CoinsMarketsParams {
    /// Creates parameters for the first page of 100 rows quoted in `vs_currency`.
    #[must_use]
    pub fn new(vs_currency: impl Into<String>) -> Self {
        Self {
            vs_currency: vs_currency.into(),
            ids: Vec::new(),
            order: None,
            per_page: DEFAULT_PER_PAGE as i32,
            page: 1,
            sparkline: false,
            price_change_percentage: Vec::new(),
        }
    }

    /// Restricts the listing to the given coin ids.
    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_order(mut self, order: MarketOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: i32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Includes the seven day sparkline.
    #[must_use]
    pub const fn with_sparkline(mut self, sparkline: bool) -> Self {
        self.sparkline = sparkline;
        self
    }

    /// Sets the extra price change windows.
    #[must_use]
    pub fn with_price_change(mut self, windows: &[PriceChangeWindow]) -> Self {
        self.price_change_percentage = windows.to_vec();
        self
    }

    /// Returns the page size that will be requested.
    #[must_use]
    pub const fn effective_per_page(&self) -> usize {
        if self.per_page <= 0 || self.per_page as usize > MAX_PER_PAGE {
            DEFAULT_PER_PAGE
        } else {
            self.per_page as usize
        }
    }

    /// Validates the parameters and builds the query string.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if `vs_currency` is empty.
    pub fn to_query(&self) -> Result<Query> {
        require("vs_currency", &self.vs_currency)?;

        let windows: Vec<&str> = self
            .price_change_percentage
            .iter()
            .map(PriceChangeWindow::as_str)
            .collect();

        let mut query = Query::new();
        query
            .push("vs_currency", &self.vs_currency)
            .push("order", self.order.unwrap_or_default())
            .push_list("ids", self.ids.as_slice())
            .push("per_page", self.effective_per_page())
            .push("page", self.page)
            .push_flag("sparkline", self.sparkline)
            .push_list("price_change_percentage", windows.as_slice());
        Ok(query)
    }
}

/// Sections to include in a `/coins/{id}` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinsIdParams {
    /// Include localized names and descriptions.
    pub localization: bool,
    /// Include exchange tickers.
    pub tickers: bool,
    /// Include market data.
    pub market_data: bool,
    /// Include community statistics.
    pub community_data: bool,
    /// Include repository statistics.
    pub developer_data: bool,
    /// Include the seven day sparkline.
    pub sparkline: bool,
}

impl Default for CoinsIdParams {
    fn default() -> Self {
        Self {
            localization: true,
            tickers: true,
            market_data: true,
            community_data: true,
            developer_data: true,
            sparkline: false,
        }
    }
}

impl CoinsIdParams {
    /// Only market data, which is what most callers want.
    #[must_use]
    pub const fn market_only() -> Self {
        Self {
            localization: false,
            tickers: false,
            market_data: true,
            community_data: false,
            developer_data: false,
            sparkline: false,
        }
    }

    fn to_query(self) -> Query {
        let mut query = Query::new();
        query
            .push_flag("localization", self.localization)
            .push_flag("tickers", self.tickers)
            .push_flag("market_data", self.market_data)
            .push_flag("community_data", self.community_data)
            .push_flag("developer_data", self.developer_data)
            .push_flag("sparkline", self.sparkline);
        query
    }
}

impl GeckoClient {
    /// Sends a buffered GET and deserializes the whole body.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], query: &Query) -> Result<T> {
        let request = self.request_segments(segments, query)?;
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body).map_err(DecodeError::Body)?)
    }

    /// `/ping`: checks that the API is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn ping(&self) -> Result<Ping> {
        self.get_json(&["ping"], &Query::new()).await
    }

    /// `/simple/price`: prices of several coins in several currencies.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if either list is empty, or an
    /// error if the request fails or the body cannot be decoded.
    pub async fn simple_price<S: AsRef<str>>(
        &self,
        ids: &[S],
        vs_currencies: &[S],
    ) -> Result<SimplePrices> {
        if ids.is_empty() {
            return Err(GeckoError::Validation("ids"));
        }
        if vs_currencies.is_empty() {
            return Err(GeckoError::Validation("vs_currencies"));
        }

        let mut query = Query::new();
        query
            .push_list("ids", ids)
            .push_list("vs_currencies", vs_currencies);
        self.get_json(&["simple", "price"], &query).await
    }

    /// Price of one coin in one currency. Both are lowercased first.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] for empty input and
    /// [`GeckoError::PriceNotFound`] if the pair is missing from the response.
    pub async fn simple_single_price(&self, id: &str, vs_currency: &str) -> Result<SimpleSinglePrice> {
        require("id", id)?;
        require("vs_currency", vs_currency)?;
        let id = id.trim().to_lowercase();
        let currency = vs_currency.trim().to_lowercase();

        let prices = self
            .simple_price(&[id.as_str()], &[currency.as_str()])
            .await?;
        let market_price = prices
            .get(&id)
            .and_then(|quotes| quotes.get(&currency))
            .copied()
            .ok_or_else(|| GeckoError::PriceNotFound {
                id: id.clone(),
                currency: currency.clone(),
            })?;

        Ok(SimpleSinglePrice {
            id,
            currency,
            market_price,
        })
    }

    /// `/simple/supported_vs_currencies`: accepted quote currencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn simple_supported_vs_currencies(&self) -> Result<Vec<String>> {
        self.get_json(&["simple", "supported_vs_currencies"], &Query::new())
            .await
    }

    /// `/coins/list`: every tracked coin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn coins_list(&self) -> Result<Vec<CoinsListItem>> {
        self.get_json(&["coins", "list"], &Query::new()).await
    }

    /// `/coins/markets`: one page of the market listing.
    ///
    /// The body is decoded element by element as it arrives. The page is
    /// atomic: if any row fails to decode, no rows are returned. `cancel`
    /// aborts the request while waiting for the response.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if `vs_currency` is empty,
    /// [`GeckoError::Http`] if the request fails or is cancelled, and
    /// [`GeckoError::Decode`] if the body is not a well-formed array of rows.
    pub async fn coins_markets(
        &self,
        params: &CoinsMarketsParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<CoinsMarketItem>> {
        let query = params.to_query()?;
        let request = self.request("/coins/markets", &query)?;
        let body = self.execute_streaming(request, cancel).await?;
        let items = decode_array(body, params.effective_per_page()).await?;
        Ok(items)
    }

    /// `/coins/{id}`: coin detail.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if `id` is empty, or an error if the
    /// request fails or the body cannot be decoded.
    pub async fn coins_id(&self, id: &str, params: CoinsIdParams) -> Result<CoinsId> {
        require("id", id)?;
        self.get_json(&coin_segments(id, &[]), &params.to_query()).await
    }

    /// `/coins/{id}/tickers`: exchange tickers. A `page` of 0 requests the
    /// server default.
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if `id` is empty, or an error if the
    /// request fails or the body cannot be decoded.
    pub async fn coins_id_tickers(&self, id: &str, page: u32) -> Result<CoinsIdTickers> {
        require("id", id)?;
        let mut query = Query::new();
        if page > 0 {
            query.push("page", page);
        }
        self.get_json(&coin_segments(id, &["tickers"]), &query).await
    }

    /// `/coins/{id}/history`: snapshot on `date` (`dd-mm-yyyy`).
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if `id` or `date` is empty, or an
    /// error if the request fails or the body cannot be decoded.
    pub async fn coins_id_history(
        &self,
        id: &str,
        date: &str,
        localization: bool,
    ) -> Result<CoinsIdHistory> {
        require("id", id)?;
        require("date", date)?;
        let mut query = Query::new();
        query
            .push("date", date)
            .push_flag("localization", localization);
        self.get_json(&coin_segments(id, &["history"]), &query).await
    }

    /// `/coins/{id}/market_chart`: price, market cap and volume series over
    /// `days` (`1`, `14`, `30`, `max` ...).
    ///
    /// # Errors
    ///
    /// Returns [`GeckoError::Validation`] if any argument is empty, or an
    /// error if the request fails or the body cannot be decoded.
    pub async fn coins_id_market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: &str,
    ) -> Result<CoinsIdMarketChart> {
        require("id", id)?;
        require("vs_currency", vs_currency)?;
        require("days", days)?;
        let mut query = Query::new();
        query.push("vs_currency", vs_currency).push("days", days);
        self.get_json(&coin_segments(id, &["market_chart"]), &query).await
    }

    /// `/coins/categories`: categories with aggregate market data.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn coins_categories(&self, order: CategoryOrder) -> Result<Vec<CoinCategory>> {
        let mut query = Query::new();
        query.push("order", order);
        self.get_json(&["coins", "categories"], &query).await
    }

    /// `/events/countries`: countries with listed events.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn events_countries(&self) -> Result<Vec<EventCountryItem>> {
        let envelope: EventsCountries = self
            .get_json(&["events", "countries"], &Query::new())
            .await?;
        Ok(envelope.data)
    }

    /// `/events/types`: event type names.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn events_types(&self) -> Result<EventsTypes> {
        self.get_json(&["events", "types"], &Query::new()).await
    }

    /// `/exchange_rates`: BTC exchange rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn exchange_rates(&self) -> Result<ExchangeRates> {
        let envelope: ExchangeRatesResponse =
            self.get_json(&["exchange_rates"], &Query::new()).await?;
        Ok(envelope.rates)
    }

    /// `/global`: market-wide metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn global(&self) -> Result<Global> {
        let envelope: GlobalResponse = self.get_json(&["global"], &Query::new()).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, HttpError, SyntaxError};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeckoClient {
        GeckoClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap()
    }

    fn market_page(prefix: &str, n: usize) -> String {
        let rows: Vec<String> = (1..=n)
            .map(|rank| {
                format!(
                    r#"{{"id":"{prefix}-{rank}","symbol":"c{rank}","name":"Coin {rank}","current_price":{rank}.5,"market_cap_rank":{rank}}}"#
                )
            })
            .collect();
        format!("[{}]", rows.join(","))
    }

    #[test]
    fn test_markets_query_defaults() {
        let query = CoinsMarketsParams::new("usd").to_query().unwrap();
        assert_eq!(query.get("vs_currency"), Some("usd"));
        assert_eq!(query.get("order"), Some("market_cap_desc"));
        assert_eq!(query.get("per_page"), Some("100"));
        assert_eq!(query.get("page"), Some("1"));
        assert_eq!(query.get("sparkline"), Some("false"));
        assert_eq!(query.get("ids"), None);
        assert_eq!(query.get("price_change_percentage"), None);
    }

    #[test]
    fn test_markets_per_page_out_of_range() {
        for per_page in [0, -5, 1000, 251] {
            let params = CoinsMarketsParams::new("usd").with_per_page(per_page);
            assert_eq!(params.effective_per_page(), DEFAULT_PER_PAGE);
            assert_eq!(params.to_query().unwrap().get("per_page"), Some("100"));
        }
        for per_page in [1, 42, 250] {
            let params = CoinsMarketsParams::new("usd").with_per_page(per_page);
            assert_eq!(params.effective_per_page(), per_page as usize);
        }
    }

    #[test]
    fn test_markets_unrecognized_order_falls_back() {
        let params = CoinsMarketsParams::new("usd").with_order(MarketOrder::parse_or_default("hot"));
        assert_eq!(params.to_query().unwrap().get("order"), Some("market_cap_desc"));

        let params = CoinsMarketsParams::new("usd").with_order(MarketOrder::VolumeDesc);
        assert_eq!(params.to_query().unwrap().get("order"), Some("volume_desc"));
    }

    #[test]
    fn test_markets_query_lists() {
        let params = CoinsMarketsParams::new("eur")
            .with_ids(["bitcoin", "ethereum"])
            .with_sparkline(true)
            .with_price_change(&[PriceChangeWindow::Hour1, PriceChangeWindow::Day7]);
        let query = params.to_query().unwrap();
        assert_eq!(query.get("ids"), Some("bitcoin,ethereum"));
        assert_eq!(query.get("sparkline"), Some("true"));
        assert_eq!(query.get("price_change_percentage"), Some("1h,7d"));
    }

    #[tokio::test]
    async fn test_markets_requires_currency_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .coins_markets(&CoinsMarketsParams::new(""), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::Validation("vs_currency")));
    }

    #[tokio::test]
    async fn test_markets_full_page_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("per_page", "250"))
            .and(query_param("page", "1"))
            .and(query_param("order", "market_cap_desc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(market_page("usd", 250), "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = CoinsMarketsParams::new("usd").with_per_page(250).with_page(1);
        let items = client_for(&server)
            .coins_markets(&params, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 250);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.id, format!("usd-{}", i + 1));
            assert_eq!(item.market_cap_rank, Some(i as u32 + 1));
        }
    }

    #[tokio::test]
    async fn test_markets_short_final_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .respond_with(ResponseTemplate::new(200).set_body_string(market_page("usd", 17)))
            .mount(&server)
            .await;

        let params = CoinsMarketsParams::new("usd").with_per_page(250).with_page(40);
        let items = client_for(&server)
            .coins_markets(&params, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(items.len(), 17);
    }

    #[tokio::test]
    async fn test_markets_concurrent_calls_share_client() {
        let server = MockServer::start().await;
        for currency in ["usd", "eur"] {
            Mock::given(method("GET"))
                .and(path("/coins/markets"))
                .and(query_param("vs_currency", currency))
                .respond_with(ResponseTemplate::new(200).set_body_string(market_page(currency, 3)))
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let cancel = CancellationToken::new();
        let usd = CoinsMarketsParams::new("usd");
        let eur = CoinsMarketsParams::new("eur");
        let (usd, eur) = tokio::join!(
            client.coins_markets(&usd, &cancel),
            client.coins_markets(&eur, &cancel),
        );

        let usd = usd.unwrap();
        let eur = eur.unwrap();
        assert!(usd.iter().all(|item| item.id.starts_with("usd-")));
        assert!(eur.iter().all(|item| item.id.starts_with("eur-")));
        assert_eq!(usd.len(), 3);
        assert_eq!(eur.len(), 3);
    }

    #[tokio::test]
    async fn test_markets_bad_row_returns_no_rows() {
        let server = MockServer::start().await;
        let body = r#"[{"id":"a","symbol":"a","name":"A"},{"id":"b","symbol":"b","name":"B"},{"id":"c","symbol":"c"},{"id":"d","symbol":"d","name":"D"}]"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .coins_markets(&CoinsMarketsParams::new("usd"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeckoError::Decode(DecodeError::Record {
                index: 2,
                source: SyntaxError::Json(_)
            })
        ));
    }

    #[tokio::test]
    async fn test_markets_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("{\"status\":{\"error_code\":429}}"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .coins_markets(&CoinsMarketsParams::new("usd"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeckoError::Http(HttpError::StreamStatus { status: 429 })
        ));
    }

    #[tokio::test]
    async fn test_markets_truncated_body() {
        let server = MockServer::start().await;
        let mut body = market_page("usd", 2);
        body.pop();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .coins_markets(&CoinsMarketsParams::new("usd"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::Decode(DecodeError::InvalidEndToken(_))));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"gecko_says":"(V3) To the Moon!"}"#),
            )
            .mount(&server)
            .await;

        let ping = client_for(&server).ping().await.unwrap();
        assert_eq!(ping.gecko_says, "(V3) To the Moon!");
    }

    #[tokio::test]
    async fn test_simple_single_price_lowercases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bitcoin":{"usd":64123.5}}"#))
            .mount(&server)
            .await;

        let price = client_for(&server)
            .simple_single_price("Bitcoin", "USD")
            .await
            .unwrap();
        assert_eq!(price.id, "bitcoin");
        assert_eq!(price.currency, "usd");
        assert!((price.market_price - 64123.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_simple_single_price_missing_pair() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .simple_single_price("notacoin", "usd")
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::PriceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_simple_price_validation() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let none: [&str; 0] = [];
        let err = client.simple_price(&none, &["usd"]).await.unwrap_err();
        assert!(matches!(err, GeckoError::Validation("ids")));
        let err = client.simple_price(&["bitcoin"], &none).await.unwrap_err();
        assert!(matches!(err, GeckoError::Validation("vs_currencies")));
    }

    #[tokio::test]
    async fn test_coins_id_flags_are_independent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin"))
            .and(query_param("localization", "false"))
            .and(query_param("sparkline", "true"))
            .and(query_param("tickers", "false"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"id":"bitcoin","symbol":"btc","name":"Bitcoin"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = CoinsIdParams {
            localization: false,
            tickers: false,
            sparkline: true,
            ..CoinsIdParams::default()
        };
        let coin = client_for(&server).coins_id("bitcoin", params).await.unwrap();
        assert_eq!(coin.symbol, "btc");
    }

    #[tokio::test]
    async fn test_coins_id_requires_id() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .coins_id("", CoinsIdParams::market_only())
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::Validation("id")));
    }

    #[tokio::test]
    async fn test_coins_id_cannot_reach_another_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/tickers"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"Bitcoin","tickers":[]}"#))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .coins_id("bitcoin/tickers", CoinsIdParams::market_only())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeckoError::Http(HttpError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_coins_id_tickers_omits_zero_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/ethereum/tickers"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"Ethereum","tickers":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let tickers = client_for(&server)
            .coins_id_tickers("ethereum", 0)
            .await
            .unwrap();
        assert_eq!(tickers.name, "Ethereum");
        assert!(tickers.tickers.is_empty());
    }

    #[tokio::test]
    async fn test_coins_id_history_requires_date() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .coins_id_history("bitcoin", "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::Validation("date")));
    }

    #[tokio::test]
    async fn test_coins_id_market_chart() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("days", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"prices":[[1709251200000,61000.0]],"market_caps":[],"total_volumes":[]}"#,
            ))
            .mount(&server)
            .await;

        let chart = client_for(&server)
            .coins_id_market_chart("bitcoin", "usd", "1")
            .await
            .unwrap();
        assert_eq!(chart.prices.len(), 1);

        let err = client_for(&server)
            .coins_id_market_chart("bitcoin", "usd", "")
            .await
            .unwrap_err();
        assert!(matches!(err, GeckoError::Validation("days")));
    }

    #[tokio::test]
    async fn test_coins_categories_sends_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/categories"))
            .and(query_param("order", "name_asc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id":"layer-1","name":"Layer 1 (L1)","market_cap":1.9e12,"top_3_coins":[]}]"#,
            ))
            .mount(&server)
            .await;

        let categories = client_for(&server)
            .coins_categories(CategoryOrder::NameAsc)
            .await
            .unwrap();
        assert_eq!(categories[0].id, "layer-1");
    }

    #[tokio::test]
    async fn test_envelopes_are_unwrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":[{"country":"Singapore","code":"SG"}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/exchange_rates"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"rates":{"btc":{"name":"Bitcoin","unit":"BTC","value":1.0,"type":"crypto"}}}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/global"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":{"active_cryptocurrencies":10,"markets":2,"updated_at":1709294400}}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let countries = client.events_countries().await.unwrap();
        assert_eq!(countries[0].code, "SG");
        let rates = client.exchange_rates().await.unwrap();
        assert_eq!(rates["btc"].kind, "crypto");
        let global = client.global().await.unwrap();
        assert_eq!(global.active_cryptocurrencies, 10);
    }

    #[tokio::test]
    async fn test_buffered_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/types"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).events_types().await.unwrap_err();
        assert!(matches!(err, GeckoError::Decode(DecodeError::Body(_))));
    }

    #[tokio::test]
    async fn test_buffered_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"coin not found"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server).coins_list().await.unwrap_err();
        match err {
            GeckoError::Http(HttpError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("coin not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

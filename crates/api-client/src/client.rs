//! HTTP transport to FoodData Central

use crate::config::{ClientConfig, TransportMode};
use crate::endpoints::FoodsApi;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// Query parameters of one provider call, in send order
pub type QueryParams = Vec<(&'static str, String)>;

/// Body posted to the proxy edge function
#[derive(Debug, Serialize)]
struct ProxyRequest<'a> {
    path: &'a str,
    params: serde_json::Map<String, serde_json::Value>,
}

/// FoodData Central client
///
/// Requests go through the Supabase proxy function unless an FDC API key
/// is configured, in which case they go straight to the provider. Either
/// way the response body is the provider's JSON.
#[derive(Clone)]
pub struct FdcClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl FdcClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("nutrisearch/", env!("CARGO_PKG_VERSION"))),
        );

        if config.mode() == TransportMode::Proxy {
            if let Some(ref key) = config.anon_key {
                let apikey = HeaderValue::from_str(key)
                    .map_err(|_| ApiError::config("anon key is not a valid header value"))?;
                let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|_| ApiError::config("anon key is not a valid header value"))?;
                default_headers.insert(APIKEY_HEADER, apikey);
                default_headers.insert(AUTHORIZATION, bearer);
            }
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Transport in use
    #[must_use]
    pub fn mode(&self) -> TransportMode {
        self.config.mode()
    }

    /// Access food search and detail endpoints
    #[must_use]
    pub fn foods(&self) -> FoodsApi {
        FoodsApi::new(self.clone())
    }

    /// Fetch a provider path and decode its JSON
    ///
    /// `path` is relative to the FDC base URL (`foods/search`, `food/123`).
    #[instrument(skip(self, params), fields(mode = ?self.mode(), request_id))]
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let request = match self.mode() {
            TransportMode::Proxy => self.proxy_request(path, params),
            TransportMode::Direct => self.direct_request(path, params),
        };

        let start = Instant::now();
        let response = request
            .header(X_REQUEST_ID, &request_id)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Provider responded"
        );

        self.handle_response(response).await
    }

    fn proxy_request(&self, path: &str, params: QueryParams) -> RequestBuilder {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();

        self.inner
            .post(self.config.proxy_url())
            .json(&ProxyRequest { path, params })
    }

    fn direct_request(&self, path: &str, params: QueryParams) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.config.fdc_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let api_key = self.config.fdc_api_key.clone().unwrap_or_default();

        self.inner
            .get(url)
            .query(&[("api_key", api_key)])
            .query(&params)
    }

    /// Map transport failures, keeping timeouts distinguishable
    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::Request(err)
        }
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.classify(e))?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let message = response
                .text()
                .await
                .ok()
                .filter(|t| !t.is_empty())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}

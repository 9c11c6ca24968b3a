//! Configuration for the FoodData Central client
//!
//! Settings are layered: built-in defaults, then the `[api]` and `[search]`
//! sections of `nutrisearch.toml`, then environment variables.

use crate::error::{ApiError, ApiResult};
use nutrisearch_core::config::{ConfigSchema, SearchTuning};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default FoodData Central REST endpoint
pub const DEFAULT_FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Default Supabase edge function base URL (local stack)
pub const DEFAULT_FUNCTIONS_URL: &str = "http://localhost:54321/functions/v1";

/// Default name of the proxy edge function
pub const DEFAULT_PROXY_FUNCTION: &str = "fdc-proxy";

const REDACTED: &str = "********";

/// How requests reach the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Through the server-side edge function holding the API key
    Proxy,
    /// Straight to FoodData Central with a local API key
    Direct,
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// FoodData Central REST base URL
    pub fdc_base_url: String,
    /// FoodData Central API key; when absent the proxy is used
    pub fdc_api_key: Option<String>,
    /// Supabase edge functions base URL
    pub functions_url: String,
    /// Supabase anonymous key sent to the proxy
    pub anon_key: Option<String>,
    /// Name of the proxy edge function
    pub proxy_function: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Search pipeline tuning
    pub tuning: SearchTuning,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let tuning = SearchTuning::default();
        Self {
            fdc_base_url: DEFAULT_FDC_BASE_URL.to_string(),
            fdc_api_key: None,
            functions_url: DEFAULT_FUNCTIONS_URL.to_string(),
            anon_key: None,
            proxy_function: DEFAULT_PROXY_FUNCTION.to_string(),
            timeout: tuning.request_timeout(),
            tuning,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables and defaults
    pub fn from_env() -> ApiResult<Self> {
        Self::from_schema(&ConfigSchema::default())
    }

    /// Create configuration from a loaded config file, then the environment
    ///
    /// Reads the following environment variables:
    /// - `FDC_API_KEY`: FoodData Central key (switches to the direct path)
    /// - `FDC_BASE_URL`: FoodData Central base URL
    /// - `SUPABASE_URL`: Supabase project URL (`/functions/v1` is appended)
    /// - `SUPABASE_ANON_KEY`: anonymous key for the proxy function
    /// - `NUTRISEARCH_PROXY_FUNCTION`: proxy function name
    /// - `NUTRISEARCH_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_schema(schema: &ConfigSchema) -> ApiResult<Self> {
        Self::from_lookup(schema, |key| env::var(key).ok())
    }

    /// Layer a config file and a variable lookup over the defaults
    pub fn from_lookup<F>(schema: &ConfigSchema, lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tuning = schema.search.clone();
        let api = &schema.api;
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let fdc_base_url = non_empty("FDC_BASE_URL")
            .or_else(|| api.fdc_base_url.clone())
            .unwrap_or_else(|| DEFAULT_FDC_BASE_URL.to_string());

        let functions_url = non_empty("SUPABASE_URL")
            .or_else(|| api.supabase_url.clone())
            .map_or_else(
                || DEFAULT_FUNCTIONS_URL.to_string(),
                |url| format!("{}/functions/v1", url.trim_end_matches('/')),
            );

        let proxy_function = non_empty("NUTRISEARCH_PROXY_FUNCTION")
            .or_else(|| api.proxy_function.clone())
            .unwrap_or_else(|| DEFAULT_PROXY_FUNCTION.to_string());

        let timeout = match non_empty("NUTRISEARCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("NUTRISEARCH_TIMEOUT_SECS is not a number: {raw}")))?,
            None => tuning.request_timeout(),
        };

        Ok(Self {
            fdc_base_url,
            fdc_api_key: non_empty("FDC_API_KEY"),
            functions_url,
            anon_key: non_empty("SUPABASE_ANON_KEY"),
            proxy_function,
            timeout,
            tuning,
        })
    }

    /// Transport chosen by this configuration
    #[must_use]
    pub fn mode(&self) -> TransportMode {
        match self.fdc_api_key.as_deref() {
            Some(key) if !key.is_empty() => TransportMode::Direct,
            _ => TransportMode::Proxy,
        }
    }

    /// Full URL of the proxy edge function
    #[must_use]
    pub fn proxy_url(&self) -> String {
        format!(
            "{}/{}",
            self.functions_url.trim_end_matches('/'),
            self.proxy_function
        )
    }

    /// Builder-style method to set the FDC base URL
    #[must_use]
    pub fn with_fdc_base_url(mut self, url: impl Into<String>) -> Self {
        self.fdc_base_url = url.into();
        self
    }

    /// Builder-style method to set the FDC API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.fdc_api_key = Some(key.into());
        self
    }

    /// Builder-style method to set the edge functions base URL
    #[must_use]
    pub fn with_functions_url(mut self, url: impl Into<String>) -> Self {
        self.functions_url = url.into();
        self
    }

    /// Builder-style method to set the anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set the proxy function name
    #[must_use]
    pub fn with_proxy_function(mut self, name: impl Into<String>) -> Self {
        self.proxy_function = name.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set search tuning
    #[must_use]
    pub fn with_tuning(mut self, tuning: SearchTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Copy with secrets masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.fdc_api_key = copy.fdc_api_key.map(|_| REDACTED.to_string());
        copy.anon_key = copy.anon_key.map(|_| REDACTED.to_string());
        copy
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        let url = match self.mode() {
            TransportMode::Direct => &self.fdc_base_url,
            TransportMode::Proxy => &self.functions_url,
        };

        if url.is_empty() {
            return Err(ApiError::config("base URL cannot be empty"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiError::config(format!(
                "base URL must start with http:// or https://: {url}"
            )));
        }

        if self.mode() == TransportMode::Proxy && self.proxy_function.trim().is_empty() {
            return Err(ApiError::config("proxy_function cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        self.tuning.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.fdc_base_url, DEFAULT_FDC_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.mode(), TransportMode::Proxy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_selects_direct_mode() {
        let config = ClientConfig::default().with_api_key("DEMO_KEY");
        assert_eq!(config.mode(), TransportMode::Direct);

        let blank = ClientConfig::default().with_api_key("");
        assert_eq!(blank.mode(), TransportMode::Proxy);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut schema = ConfigSchema::default();
        schema.api.supabase_url = Some("https://file.supabase.co".to_string());
        schema.api.proxy_function = Some("usda-proxy".to_string());

        let config = ClientConfig::from_lookup(
            &schema,
            lookup(&[
                ("SUPABASE_URL", "https://env.supabase.co/"),
                ("SUPABASE_ANON_KEY", "anon"),
                ("NUTRISEARCH_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.functions_url, "https://env.supabase.co/functions/v1");
        assert_eq!(config.proxy_url(), "https://env.supabase.co/functions/v1/usda-proxy");
        assert_eq!(config.anon_key.as_deref(), Some("anon"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.mode(), TransportMode::Proxy);
    }

    #[test]
    fn test_invalid_timeout_env() {
        let result = ClientConfig::from_lookup(
            &ConfigSchema::default(),
            lookup(&[("NUTRISEARCH_TIMEOUT_SECS", "soon")]),
        );
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let invalid = ClientConfig::default().with_functions_url("ftp://example.com");
        assert!(invalid.validate().is_err());

        let zero = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(zero.validate().is_err());

        let direct = ClientConfig::default()
            .with_api_key("k")
            .with_functions_url("");
        assert!(direct.validate().is_ok());
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let config = ClientConfig::default().with_api_key("secret").with_anon_key("anon");
        let shown = serde_json::to_string(&config.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(!shown.contains("\"anon\""));
        assert!(shown.contains(REDACTED));
    }
}

//! Food search service
//!
//! [`FoodSearchService`] owns everything a search session shares: the
//! transport, the response caches and the rate limiter. Build one per
//! process with [`FoodSearchService::new`] and hand out references.

use crate::client::FdcClient;
use crate::config::ClientConfig;
use crate::endpoints::{parse_fdc_id, SearchParams, MAX_PAGE_SIZE};
use crate::error::{ApiError, ApiResult};
use crate::transform;
use nutrisearch_core::cache::{CacheStats, TtlCache};
use nutrisearch_core::clock::{Clock, SystemClock};
use nutrisearch_core::config::SearchTuning;
use nutrisearch_core::rate_limit::MinIntervalLimiter;
use nutrisearch_search::{rank, DedupConfig, FoodCandidate, RankOptions};
use nutrisearch_telemetry::{metrics, names, Timer};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// Shortest trimmed query sent upstream
pub const MIN_QUERY_CHARS: usize = 2;

/// Why a search returned no results without raising
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoftFailure {
    /// The provider did not answer within the request timeout
    #[error("Request timeout")]
    Timeout,

    /// The provider (or proxy) answered with a non-success status
    #[error("HTTP {status}")]
    Upstream {
        /// HTTP status code
        status: u16,
    },

    /// Anything else that went wrong in the pipeline
    #[error("{0}")]
    Unexpected(String),
}

impl From<&ApiError> for SoftFailure {
    fn from(err: &ApiError) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Upstream { status }
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// How a search call ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// The provider answered; `foods` may still be empty
    #[default]
    Complete,
    /// The query was too short to send
    Skipped,
    /// The provider could not be used; `foods` is empty
    SoftFailure(SoftFailure),
}

/// One page of ranked search results
///
/// Serializes to `{foods, totalHits, currentPage, totalPages?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SearchBody")]
pub struct SearchResponse {
    /// Ranked, deduplicated results
    pub foods: Vec<FoodCandidate>,
    /// Provider hit count before filtering
    pub total_hits: u64,
    /// One-based page number
    pub current_page: u32,
    /// Pages available at the requested page size
    pub total_pages: Option<u32>,
    /// How the call ended
    pub outcome: SearchOutcome,
}

impl SearchResponse {
    /// Empty response for a query that was not sent
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            foods: Vec::new(),
            total_hits: 0,
            current_page: 1,
            total_pages: None,
            outcome: SearchOutcome::Skipped,
        }
    }

    /// Empty response carrying the reason the provider was unusable
    #[must_use]
    pub fn soft_failure(current_page: u32, failure: SoftFailure) -> Self {
        Self {
            foods: Vec::new(),
            total_hits: 0,
            current_page,
            total_pages: None,
            outcome: SearchOutcome::SoftFailure(failure),
        }
    }

    /// Error message for soft failures
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match &self.outcome {
            SearchOutcome::SoftFailure(failure) => Some(failure.to_string()),
            _ => None,
        }
    }

    /// Whether the provider answered
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome == SearchOutcome::Complete
    }

    /// Whether the empty result hides a provider problem
    #[must_use]
    pub fn is_soft_failure(&self) -> bool {
        matches!(self.outcome, SearchOutcome::SoftFailure(_))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    foods: Vec<FoodCandidate>,
    total_hits: u64,
    current_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<SearchResponse> for SearchBody {
    fn from(response: SearchResponse) -> Self {
        let error = response.error();
        Self {
            foods: response.foods,
            total_hits: response.total_hits,
            current_page: response.current_page,
            total_pages: response.total_pages,
            error,
        }
    }
}

/// Entry counts of both caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceCacheStats {
    /// Search pages
    pub search: CacheStats,
    /// Single foods
    pub details: CacheStats,
}

/// Search and detail lookups over FoodData Central
pub struct FoodSearchService {
    client: FdcClient,
    search_cache: TtlCache<SearchResponse>,
    detail_cache: TtlCache<FoodCandidate>,
    limiter: MinIntervalLimiter,
    tuning: SearchTuning,
}

impl FoodSearchService {
    /// Create a service using the system clock
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a service whose caches read time from `clock`
    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> ApiResult<Self> {
        let tuning = config.tuning.clone();
        let client = FdcClient::with_config(config)?;

        debug!(
            mode = ?client.mode(),
            cache_ttl_secs = tuning.cache_ttl_secs,
            min_interval_ms = tuning.min_request_interval_ms,
            "Food search service created"
        );

        Ok(Self {
            client,
            search_cache: TtlCache::with_clock(tuning.cache_ttl(), Arc::clone(&clock)),
            detail_cache: TtlCache::with_clock(tuning.cache_ttl(), clock),
            limiter: MinIntervalLimiter::new(tuning.min_request_interval()),
            tuning,
        })
    }

    /// Underlying transport
    #[must_use]
    pub fn client(&self) -> &FdcClient {
        &self.client
    }

    /// Search foods and return one ranked page
    ///
    /// Never fails: short queries come back [`SearchOutcome::Skipped`] and
    /// provider problems come back [`SearchOutcome::SoftFailure`], both with
    /// no foods. A `page_size` of 0 uses the configured default.
    #[instrument(skip(self))]
    pub async fn search_foods(&self, query: &str, page_size: u32, page_number: u32) -> SearchResponse {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            metrics().increment(names::SEARCH_SKIPPED);
            debug!("Query too short, not searching");
            return SearchResponse::skipped();
        }

        let page_size = match page_size {
            0 => self.tuning.default_page_size,
            n => n,
        }
        .min(MAX_PAGE_SIZE);
        let page_number = page_number.max(1);

        let key = format!("search:{}:{page_size}:{page_number}", query.to_lowercase());
        if let Some(cached) = self.search_cache.get(&key) {
            metrics().increment(names::SEARCH_CACHE_HIT);
            debug!(key = %key, "Search cache hit");
            return cached;
        }
        metrics().increment(names::SEARCH_CACHE_MISS);

        match self.fetch_ranked(query, page_size, page_number).await {
            Ok(response) => {
                self.search_cache.set(key, response.clone());
                response
            }
            Err(err) => {
                let failure = SoftFailure::from(&err);
                match failure {
                    SoftFailure::Unexpected(_) => error!(error = %err, "Search failed"),
                    _ => warn!(error = %err, "Search degraded to empty result"),
                }
                metrics().increment(names::SEARCH_SOFT_FAILURE);
                SearchResponse::soft_failure(page_number, failure)
            }
        }
    }

    async fn fetch_ranked(
        &self,
        query: &str,
        page_size: u32,
        page_number: u32,
    ) -> ApiResult<SearchResponse> {
        // Provider pages line up with caller pages so every hit is reachable
        let params = SearchParams::new(query)
            .with_page_size(page_size)
            .with_page(page_number);

        self.limiter.wait().await;
        let timer = Timer::start(names::SEARCH_LATENCY_MS);
        let page = self.client.foods().search(&params).await?;
        timer.stop();

        let candidates = transform::to_candidates(&page.foods);
        let fetched = candidates.len();
        let options = RankOptions {
            limit: page_size as usize,
            dedup: DedupConfig {
                key_words: self.tuning.dedup_key_words,
                brand_prefix_len: self.tuning.dedup_brand_prefix,
            },
        };
        let foods: Vec<FoodCandidate> = rank(candidates, query, &options)
            .into_iter()
            .map(|scored| scored.item)
            .collect();

        debug!(
            total_hits = page.total_hits,
            fetched,
            returned = foods.len(),
            "Search ranked"
        );

        let total_pages = u32::try_from(page.total_hits.div_ceil(u64::from(page_size))).ok();
        Ok(SearchResponse {
            foods,
            total_hits: page.total_hits,
            current_page: page_number,
            total_pages,
            outcome: SearchOutcome::Complete,
        })
    }

    /// Fetch one food with its full nutrient set
    ///
    /// Unlike search, failures are returned to the caller.
    #[instrument(skip(self))]
    pub async fn get_food_details(&self, external_id: &str) -> ApiResult<FoodCandidate> {
        let id = parse_fdc_id(external_id)?;
        let key = format!("food:{id}");

        if let Some(cached) = self.detail_cache.get(&key) {
            metrics().increment(names::DETAIL_CACHE_HIT);
            debug!(key = %key, "Detail cache hit");
            return Ok(cached);
        }

        self.limiter.wait().await;
        let food = self.client.foods().details(id).await.inspect_err(|err| {
            metrics().increment(names::DETAIL_FAILURE);
            warn!(error = %err, "Detail lookup failed");
        })?;

        let candidate = transform::to_candidate(&food);
        self.detail_cache.set(key, candidate.clone());
        Ok(candidate)
    }

    /// Current cache statistics
    #[must_use]
    pub fn cache_stats(&self) -> ServiceCacheStats {
        ServiceCacheStats {
            search: self.search_cache.stats(),
            details: self.detail_cache.stats(),
        }
    }

    /// Drop every cached response
    pub fn clear_caches(&self) {
        self.search_cache.clear();
        self.detail_cache.clear();
    }

    /// Release the service
    pub fn close(self) {
        let stats = self.cache_stats();
        self.clear_caches();
        debug!(
            search_hits = stats.search.hits,
            search_misses = stats.search.misses,
            detail_hits = stats.details.hits,
            "Food search service closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_soft_failure_classification() {
        let timeout = ApiError::Timeout(Duration::from_secs(15));
        assert_eq!(SoftFailure::from(&timeout), SoftFailure::Timeout);

        let upstream = ApiError::api_response(503, "Service Unavailable");
        assert_eq!(
            SoftFailure::from(&upstream),
            SoftFailure::Upstream { status: 503 }
        );

        let other = ApiError::invalid_input("bad");
        assert!(matches!(SoftFailure::from(&other), SoftFailure::Unexpected(_)));
    }

    #[test]
    fn test_error_messages() {
        let response = SearchResponse::soft_failure(2, SoftFailure::Timeout);
        assert_eq!(response.error().as_deref(), Some("Request timeout"));
        assert_eq!(response.current_page, 2);

        let response = SearchResponse::soft_failure(1, SoftFailure::Upstream { status: 502 });
        assert_eq!(response.error().as_deref(), Some("HTTP 502"));

        assert_eq!(SearchResponse::skipped().error(), None);
    }

    #[test]
    fn test_serializes_legacy_shape() {
        let json = serde_json::to_value(SearchResponse::skipped()).unwrap();
        assert_eq!(json["foods"], serde_json::json!([]));
        assert_eq!(json["totalHits"], 0);
        assert_eq!(json["currentPage"], 1);
        assert!(json.get("totalPages").is_none());
        assert!(json.get("error").is_none());
        assert!(json.get("outcome").is_none());

        let json =
            serde_json::to_value(SearchResponse::soft_failure(1, SoftFailure::Timeout)).unwrap();
        assert_eq!(json["error"], "Request timeout");
    }

    #[tokio::test]
    async fn test_short_query_skips() {
        let service = FoodSearchService::new(ClientConfig::default()).unwrap();

        for query in ["", " ", "a", "  b  "] {
            let response = service.search_foods(query, 12, 3).await;
            assert_eq!(response, SearchResponse::skipped());
        }
        assert_eq!(service.cache_stats().search.entries, 0);
    }

    #[tokio::test]
    async fn test_details_rejects_bad_id_without_network() {
        let service = FoodSearchService::new(ClientConfig::default()).unwrap();
        let result = service.get_food_details("apple").await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}

//! FoodData Central search client for nutrisearch
//!
//! This crate turns a free-text query into one page of ranked foods:
//!
//! - **Two transports**: a Supabase edge-function proxy that keeps the API key
//!   server-side, or direct calls when an FDC API key is configured
//! - **Response caching**: search pages and single foods, with a fixed TTL
//! - **Rate limiting**: a minimum interval between upstream calls
//! - **Soft failures**: search never raises; timeouts and upstream errors are
//!   reported as a named outcome next to an empty result
//! - **Request correlation**: every outbound request carries a unique ID
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrisearch_api_client::{ClientConfig, FoodSearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = FoodSearchService::new(ClientConfig::from_env()?)?;
//!
//!     let page = service.search_foods("big mac", 12, 1).await;
//!     if let Some(error) = page.error() {
//!         eprintln!("search degraded: {error}");
//!     }
//!     for food in &page.foods {
//!         println!("{} ({} kcal)", food.name, food.nutrients.calories);
//!     }
//!
//!     let apple = service.get_food_details("171688").await?;
//!     println!("{}: {:?}", apple.name, apple.category);
//!
//!     service.close();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod service;
pub mod transform;

pub use client::FdcClient;
pub use config::{ClientConfig, TransportMode};
pub use error::{ApiError, ApiResult};
pub use service::{FoodSearchService, SearchOutcome, SearchResponse, SoftFailure};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FdcClient;
    pub use crate::config::{ClientConfig, TransportMode};
    pub use crate::endpoints::{FoodsApi, SearchParams};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::service::{
        FoodSearchService, SearchOutcome, SearchResponse, ServiceCacheStats, SoftFailure,
    };
}

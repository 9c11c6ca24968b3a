//! Food search and detail endpoints
//!
//! Maps to the FoodData Central `foods/search` and `food/{fdcId}` paths,
//! reached either directly or through the proxy function.

use crate::client::{FdcClient, QueryParams};
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Record types requested from the provider, in its own spelling
pub const SEARCH_DATA_TYPES: &str = "Foundation,SR Legacy,Survey (FNDDS),Branded";

/// Largest page the provider accepts
pub const MAX_PAGE_SIZE: u32 = 200;

/// Foods API interface
#[derive(Clone)]
pub struct FoodsApi {
    client: FdcClient,
}

impl FoodsApi {
    /// Create a new foods API interface
    pub(crate) fn new(client: FdcClient) -> Self {
        Self { client }
    }

    /// Search foods by keyword
    ///
    /// GET foods/search
    pub async fn search(&self, params: &SearchParams) -> ApiResult<FdcSearchPage> {
        if params.query.trim().is_empty() {
            return Err(ApiError::invalid_input("search query cannot be empty"));
        }
        self.client.fetch("foods/search", params.to_query()).await
    }

    /// Get a single food with its full nutrient list
    ///
    /// GET food/<fdcId>
    pub async fn details(&self, fdc_id: &str) -> ApiResult<FdcFood> {
        let id = parse_fdc_id(fdc_id)?;
        self.client.fetch(&format!("food/{id}"), Vec::new()).await
    }
}

/// Accept `171705` or the candidate form `fdc_171705`
pub fn parse_fdc_id(raw: &str) -> ApiResult<&str> {
    let trimmed = raw.trim();
    let id = trimmed.strip_prefix("fdc_").unwrap_or(trimmed);
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::invalid_input(format!(
            "FDC id must be numeric: {raw:?}"
        )));
    }
    Ok(id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Parameters for a food search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    pub query: String,
    /// Results per provider page (1..=200)
    pub page_size: u32,
    /// One-based provider page
    pub page_number: u32,
}

impl SearchParams {
    /// Create params for the first page of 12
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_size: 12,
            page_number: 1,
        }
    }

    /// Set page size, clamped to what the provider accepts
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set page number
    #[must_use]
    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number.max(1);
        self
    }

    fn to_query(&self) -> QueryParams {
        vec![
            ("query", self.query.clone()),
            ("pageSize", self.page_size.to_string()),
            ("pageNumber", self.page_number.to_string()),
            ("dataType", SEARCH_DATA_TYPES.to_string()),
            ("sortBy", "dataType.keyword".to_string()),
            ("sortOrder", "asc".to_string()),
        ]
    }
}

/// One page of `foods/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FdcSearchPage {
    /// Matches across all pages
    pub total_hits: u64,
    /// Page this response holds
    pub current_page: u32,
    /// Page count, when the provider reports it
    pub total_pages: Option<u32>,
    /// Hits on this page, in provider order
    pub foods: Vec<FdcFood>,
}

/// Provider food record, shared by search hits and detail responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FdcFood {
    /// FoodData Central id
    pub fdc_id: u64,
    /// Display name
    pub description: Option<String>,
    /// Source dataset, e.g. `"SR Legacy"` or `"Branded"`
    pub data_type: Option<String>,
    /// Manufacturer (branded records)
    pub brand_owner: Option<String>,
    /// Consumer brand, used when the owner is missing
    pub brand_name: Option<String>,
    /// Ingredient statement
    pub ingredients: Option<String>,
    /// Label serving size
    pub serving_size: Option<f64>,
    /// Unit of `serving_size`
    pub serving_size_unit: Option<String>,
    /// Nutrient amounts
    pub food_nutrients: Vec<FdcNutrient>,
}

/// Nutrient entry
///
/// Search hits carry `nutrientId`/`value`; detail responses nest the id
/// under `nutrient` and put the quantity in `amount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FdcNutrient {
    /// Nutrient id (search shape)
    pub nutrient_id: Option<u32>,
    /// Quantity (search shape)
    pub value: Option<f64>,
    /// Nested description (detail shape)
    pub nutrient: Option<NutrientInfo>,
    /// Quantity (detail shape)
    pub amount: Option<f64>,
}

impl FdcNutrient {
    /// Nutrient type id in either shape
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.nutrient_id
            .or_else(|| self.nutrient.as_ref().and_then(|n| n.id))
    }

    /// Quantity in either shape
    #[must_use]
    pub fn quantity(&self) -> Option<f64> {
        self.value.or(self.amount)
    }
}

/// Nested nutrient description in detail responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientInfo {
    /// Nutrient id
    pub id: Option<u32>,
    /// Nutrient name
    pub name: Option<String>,
    /// Unit, e.g. `"g"` or `"kcal"`
    pub unit_name: Option<String>,
}

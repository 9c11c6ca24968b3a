//! Endpoint-specific API implementations
//!
//! | Module | Provider path | Description |
//! |--------|---------------|-------------|
//! | `foods` | `foods/search`, `food/{fdcId}` | Keyword search and single-food detail |

pub mod foods;

pub use foods::{
    parse_fdc_id, FdcFood, FdcNutrient, FdcSearchPage, FoodsApi, NutrientInfo, SearchParams,
    MAX_PAGE_SIZE, SEARCH_DATA_TYPES,
};

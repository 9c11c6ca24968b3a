//! Configuration loading and schema definitions
//!
//! Settings live in an optional `nutrisearch.toml`; every field has a default.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;

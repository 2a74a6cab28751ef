//! # Services Module
//!
//! Network-facing services: the catalog API client and the debounced
//! search pipeline built on top of it.

pub mod error;
pub mod query_client;
pub mod search_pipeline;

pub use error::CatalogError;
pub use query_client::{CatalogApi, QueryClient};
pub use search_pipeline::{SearchHandle, SearchPipeline, SearchResult};

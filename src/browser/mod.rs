//! # Browser Module
//!
//! MVVM implementation of the catalog browser.
//!
//! - **Models**: records, page envelopes, query and sort state
//! - **Services**: the catalog API client and the search pipeline
//! - **View Models**: the paginated list and the detail aggregator
//! - **Views**: terminal rendering
//! - **Controllers**: the input-driven event loop
//! - **Events**: input events, model change notifications, input sources

pub mod controllers;
pub mod events;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

#[cfg(test)]
pub mod testing;

// Re-export main types for convenience
pub use controllers::AppController;
pub use events::{EventSource, InputEvent, ModelEvent, ScriptedEventSource, StdinEventSource};
pub use models::{
    DetailPayload, Episode, LoadState, OneOrMany, PageEnvelope, PageInfo, QueryState, Record,
    SortDirection, SortKey, SortState, Status, StatusFilter,
};
pub use services::{CatalogApi, CatalogError, QueryClient, SearchHandle, SearchPipeline, SearchResult};
pub use view_models::{load_detail, CastState, DetailAggregator, ListViewModel, QueryChange};
pub use views::{TerminalRenderer, ViewRenderer};

//! # View Models
//!
//! State the renderer reads: the paginated, sortable result list and the
//! joined detail view for a selected record.

pub mod detail_aggregator;
pub mod list_view_model;
pub mod sorting;


pub use detail_aggregator::{load_detail, CastState, DetailAggregator, DetailMessage};
pub use list_view_model::{ListViewModel, PendingQuery, QueryChange};
pub use sorting::sort_records;

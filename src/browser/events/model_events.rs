//! # Model Events
//!
//! Events emitted when view model state changes.
//! The controller drains them after each step to decide what to redraw.

use crate::browser::models::{QueryState, SortDirection, SortKey};

/// Events emitted when view models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A list request was issued for a new query
    QueryChanged { query: QueryState },

    /// The displayed page was replaced with fresh server data
    ResultsReplaced {
        total_count: u64,
        displayed: usize,
        page_index: u32,
    },

    /// The server reported no matches (or a search failed)
    ResultsEmpty,

    /// A reply arrived for a query that has since been superseded
    StaleResponseDiscarded { generation: u64 },

    /// The displayed page was reordered
    SortApplied {
        key: SortKey,
        direction: SortDirection,
    },

    /// Detail lookups started for a record
    DetailLoading { record_id: u32 },

    /// Detail join completed
    DetailReady { record_id: u32, episodes: usize },
}

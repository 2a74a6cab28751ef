//! # List View Model
//!
//! Holds the page currently on screen: records, total count, query,
//! sort configuration and the "no results" flag.
//!
//! Every pagination or filter change goes through [`ListViewModel::apply_query`],
//! which returns a [`PendingQuery`] tagged with a generation. Replies are
//! handed back through [`ListViewModel::complete_query`]; a reply whose
//! generation has been superseded is dropped, so the screen always ends up
//! showing the most recent query.

use crate::browser::events::ModelEvent;
use crate::browser::models::{
    page_count, PageEnvelope, QueryState, Record, SortDirection, SortKey, SortState, StatusFilter,
};
use crate::browser::services::SearchResult;
use crate::browser::view_models::sorting::sort_records;
use crate::config::DEFAULT_PAGE_SIZE;

/// A user-driven change to the list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Move to a zero-based page, keeping name and status
    Page(u32),
    /// Switch the status filter; always returns to the first page
    Status(StatusFilter),
}

/// A list request the controller must issue on the view model's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub generation: u64,
    pub query: QueryState,
}

pub struct ListViewModel {
    query: QueryState,
    sort: SortState,
    records: Vec<Record>,
    total_count: u64,
    results_empty: bool,
    generation: u64,
    page_size: usize,
    pending_events: Vec<ModelEvent>,
}

impl ListViewModel {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query: QueryState::default(),
            sort: SortState::default(),
            records: Vec::new(),
            total_count: 0,
            results_empty: false,
            generation: 0,
            page_size,
            pending_events: Vec::new(),
        }
    }

    /// Start with a status filter already selected
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.query.status = status;
        self
    }

    /// Take all events emitted since the last call
    pub fn collect_pending_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: ModelEvent) {
        tracing::trace!("Model event: {:?}", event);
        self.pending_events.push(event);
    }

    // ---- state transitions ----

    /// Apply an emission of the search pipeline.
    ///
    /// The searched term becomes the name filter and pagination returns to
    /// the first page. Any pagination or filter reply still in flight is
    /// superseded. If the status filter changed after the search was
    /// dispatched, the result is not shown; the returned query re-runs the
    /// search with the current filter.
    pub fn apply_search_result(&mut self, result: SearchResult) -> Option<PendingQuery> {
        self.query.name = result.term;
        self.query.page_index = 0;
        self.generation += 1;

        if result.status != self.query.status {
            tracing::debug!(
                "Search result used status {:?} but filter is now {:?}, re-querying",
                result.status,
                self.query.status
            );
            return Some(self.issue());
        }

        self.apply_envelope(result.envelope);
        None
    }

    /// Single entry point for pagination and filter changes
    pub fn apply_query(&mut self, change: QueryChange) -> PendingQuery {
        match change {
            QueryChange::Page(page_index) => self.query.page_index = page_index,
            QueryChange::Status(status) => {
                self.query.status = status;
                self.query.page_index = 0;
            }
        }
        self.generation += 1;
        self.issue()
    }

    fn issue(&mut self) -> PendingQuery {
        let pending = PendingQuery {
            generation: self.generation,
            query: self.query.clone(),
        };
        self.emit(ModelEvent::QueryChanged {
            query: pending.query.clone(),
        });
        pending
    }

    /// Hand back the reply for a query issued by [`ListViewModel::apply_query`].
    ///
    /// Returns false when the reply was stale and therefore ignored.
    pub fn complete_query(&mut self, pending: &PendingQuery, envelope: PageEnvelope) -> bool {
        if pending.generation != self.generation {
            tracing::debug!(
                "Discarding stale list reply (generation {} != {})",
                pending.generation,
                self.generation
            );
            self.emit(ModelEvent::StaleResponseDiscarded {
                generation: pending.generation,
            });
            return false;
        }
        self.apply_envelope(envelope);
        true
    }

    /// Replace the displayed page, or only raise the empty flag for the sentinel
    fn apply_envelope(&mut self, envelope: PageEnvelope) {
        let (Some(info), Some(mut results)) = (envelope.info, envelope.results) else {
            self.results_empty = true;
            self.emit(ModelEvent::ResultsEmpty);
            return;
        };

        if results.len() > self.page_size {
            tracing::warn!(
                "Server returned {} records for a page of {}, truncating",
                results.len(),
                self.page_size
            );
            results.truncate(self.page_size);
        }

        self.results_empty = false;
        self.total_count = info.count;
        self.records = results;
        self.sort.applied = false;

        self.emit(ModelEvent::ResultsReplaced {
            total_count: self.total_count,
            displayed: self.records.len(),
            page_index: self.query.page_index,
        });
    }

    /// Reorder the displayed page. Never touches the network.
    pub fn sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = SortState {
            key,
            direction,
            applied: key != SortKey::None,
        };
        sort_records(&mut self.records, key, direction);
        tracing::debug!("Sorted {} records by {:?} {:?}", self.records.len(), key, direction);
        self.emit(ModelEvent::SortApplied { key, direction });
    }

    // ---- accessors ----

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at `index` on the displayed page. `None` while the last
    /// query reported no results, since the kept records belong to an
    /// older query.
    pub fn record(&self, index: usize) -> Option<&Record> {
        if self.results_empty {
            return None;
        }
        self.records.get(index)
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.total_count, self.page_size)
    }

    pub fn page_index(&self) -> u32 {
        self.query.page_index
    }

    /// Following page, if any. There is nothing to page through while
    /// the last query reported no results.
    pub fn next_page_index(&self) -> Option<u32> {
        if self.results_empty {
            return None;
        }
        let next = self.query.page_index.checked_add(1)?;
        (u64::from(next) < self.page_count()).then_some(next)
    }

    pub fn previous_page_index(&self) -> Option<u32> {
        if self.results_empty {
            return None;
        }
        self.query.page_index.checked_sub(1)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn results_empty(&self) -> bool {
        self.results_empty
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for ListViewModel {
    fn default() -> Self {
        Self::new()
    }
}

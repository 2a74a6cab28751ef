//! # Search Pipeline
//!
//! Turns a live stream of search terms into list results.
//!
//! ```text
//! submit("r") submit("ri") submit("rick")        submit("rick")
//!     │          │            │  ── 400ms quiet ──▶ dispatch gen=1  (dropped: unchanged)
//!     ▼          ▼            ▼                        │
//!   pending ──────────────────┘                        ▼
//!                                           list_records("rick", status, page 0)
//! ```
//!
//! - a term is dispatched only after the debounce interval passes without
//!   another submission
//! - a term equal to the previously dispatched one is dropped
//! - every dispatch bumps the generation and aborts the in-flight request;
//!   a completion from an older generation is discarded
//! - request failures become [`PageEnvelope::empty`], so the output never
//!   ends while a [`SearchHandle`] is alive

use crate::browser::models::{PageEnvelope, QueryState, StatusFilter};
use crate::browser::services::query_client::CatalogApi;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One emission of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Dispatch counter, strictly increasing across emissions
    pub generation: u64,
    pub term: String,
    pub status: StatusFilter,
    /// Page 0 for `term`, or the empty sentinel on no match / failure
    pub envelope: PageEnvelope,
}

/// Input side of a running pipeline. Dropping every clone stops it.
#[derive(Clone)]
pub struct SearchHandle {
    terms: mpsc::UnboundedSender<String>,
    status: Arc<watch::Sender<StatusFilter>>,
}

impl SearchHandle {
    /// Feed the next search term (one call per keystroke is fine)
    pub fn submit(&self, term: impl Into<String>) -> Result<()> {
        self.terms
            .send(term.into())
            .map_err(|_| anyhow::anyhow!("Search pipeline has stopped"))
    }

    /// Status filter used for subsequent dispatches
    pub fn set_status(&self, status: StatusFilter) {
        self.status.send_replace(status);
    }

    pub fn status(&self) -> StatusFilter {
        *self.status.borrow()
    }
}

/// Request outcome handed back from the request task to the pipeline loop
struct Completion {
    generation: u64,
    query: QueryState,
    envelope: PageEnvelope,
}

/// Debounced, distinct, switch-to-latest search over a [`CatalogApi`]
pub struct SearchPipeline {
    api: Arc<dyn CatalogApi>,
    debounce: Duration,
    status: watch::Receiver<StatusFilter>,
    output: mpsc::UnboundedSender<SearchResult>,
    generation: u64,
    last_term: Option<String>,
    in_flight: Option<JoinHandle<()>>,
}

impl SearchPipeline {
    /// Start the pipeline on the current tokio runtime.
    ///
    /// The term stream is seeded with an empty string, so the first
    /// emission lists everything unless another term arrives within the
    /// debounce interval.
    pub fn spawn(
        api: Arc<dyn CatalogApi>,
        debounce: Duration,
        initial_status: StatusFilter,
    ) -> (SearchHandle, mpsc::UnboundedReceiver<SearchResult>) {
        let (terms_tx, terms_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(initial_status);
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let pipeline = Self {
            api,
            debounce,
            status: status_rx,
            output: output_tx,
            generation: 0,
            last_term: None,
            in_flight: None,
        };
        tokio::spawn(pipeline.run(terms_rx));

        let handle = SearchHandle {
            terms: terms_tx,
            status: Arc::new(status_tx),
        };
        (handle, output_rx)
    }

    async fn run(mut self, mut terms: mpsc::UnboundedReceiver<String>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut pending: Option<(String, Instant)> =
            Some((String::new(), Instant::now() + self.debounce));

        loop {
            let deadline = pending.as_ref().map(|(_, at)| *at);

            tokio::select! {
                term = terms.recv() => match term {
                    Some(term) => {
                        tracing::trace!("Search term received: {:?}", term);
                        pending = Some((term, Instant::now() + self.debounce));
                    }
                    None => {
                        tracing::debug!("All search handles dropped, stopping pipeline");
                        break;
                    }
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((term, _)) = pending.take() {
                        self.dispatch(term, &done_tx);
                    }
                },
                Some(done) = done_rx.recv() => {
                    if !self.deliver(done) {
                        tracing::debug!("Search output receiver dropped, stopping pipeline");
                        break;
                    }
                }
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    /// Issue the request for a debounced term unless it repeats the last one
    fn dispatch(&mut self, term: String, done_tx: &mpsc::UnboundedSender<Completion>) {
        if self.last_term.as_deref() == Some(term.as_str()) {
            tracing::debug!("Search term unchanged, skipping: {:?}", term);
            return;
        }
        self.last_term = Some(term.clone());

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("Cancelling in-flight search (generation {})", self.generation);
            previous.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let query = QueryState::new(term, *self.status.borrow(), 0);
        tracing::debug!("Dispatching search generation {}: {:?}", generation, query);

        let api = Arc::clone(&self.api);
        let done_tx = done_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let envelope = match api.list_records(&query).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    tracing::warn!("Search for {:?} failed, showing no results: {}", query.name, e);
                    PageEnvelope::empty()
                }
            };
            // Receiver only disappears when the pipeline itself stops
            let _ = done_tx.send(Completion {
                generation,
                query,
                envelope,
            });
        }));
    }

    /// Forward a completion if it is current. Returns false once nobody listens.
    fn deliver(&mut self, done: Completion) -> bool {
        if done.generation != self.generation {
            tracing::debug!(
                "Discarding stale search result (generation {} < {})",
                done.generation,
                self.generation
            );
            return true;
        }
        self.in_flight = None;

        let result = SearchResult {
            generation: done.generation,
            term: done.query.name,
            status: done.query.status,
            envelope: done.envelope,
        };
        self.output.send(result).is_ok()
    }
}

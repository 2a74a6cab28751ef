//! # Detail Aggregator
//!
//! Builds the detail view for a selected record.
//!
//! The primary lookup joins two concurrent requests (the record itself and
//! the batch of episodes it references) and exposes nothing until both
//! have arrived. Failures are handed to the caller untouched.
//!
//! The secondary lookup fetches the characters of one episode. It runs
//! independently of the primary join, can be cancelled, and publishes its
//! progress through a `watch` channel as a [`LoadState`].

use crate::browser::events::ModelEvent;
use crate::browser::models::{resource_ids, DetailPayload, LoadState, Record};
use crate::browser::services::{CatalogApi, CatalogError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Type alias for the observable cast state
pub type CastState = LoadState<Vec<Record>>;

/// Completion of a primary detail join
#[derive(Debug)]
pub struct DetailMessage {
    pub generation: u64,
    pub record_id: u32,
    pub result: Result<DetailPayload, CatalogError>,
}

/// Fetch a record and its episodes concurrently, returning only once both completed.
///
/// Both requests run as detached tasks: dropping the returned future
/// abandons the join but lets the requests finish in the background.
pub async fn load_detail(
    api: Arc<dyn CatalogApi>,
    record: &Record,
) -> Result<DetailPayload, CatalogError> {
    let record_id = record.id;
    let episode_ids = record.episode_ids();

    let detail_api = Arc::clone(&api);
    let detail_task = tokio::spawn(async move { detail_api.get_record(record_id).await });
    let episode_task = tokio::spawn(async move { api.lookup_episodes(&episode_ids).await });

    let (record, episodes) = tokio::try_join!(settle(detail_task), settle(episode_task))?;

    // A single episode comes back as a bare object
    Ok(DetailPayload {
        record,
        episodes: episodes.into_vec(),
    })
}

async fn settle<T>(task: JoinHandle<Result<T, CatalogError>>) -> Result<T, CatalogError> {
    task.await?
}

pub struct DetailAggregator {
    api: Arc<dyn CatalogApi>,
    detail: LoadState<DetailPayload>,
    detail_generation: u64,
    messages_tx: mpsc::UnboundedSender<DetailMessage>,
    messages_rx: mpsc::UnboundedReceiver<DetailMessage>,
    cast: Arc<watch::Sender<CastState>>,
    cast_generation: Arc<AtomicU64>,
    cast_task: Option<JoinHandle<()>>,
    pending_events: Vec<ModelEvent>,
}

impl DetailAggregator {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (messages_tx, messages_rx) = mpsc::unbounded_channel();
        let (cast, _) = watch::channel(CastState::Idle);
        Self {
            api,
            detail: LoadState::Idle,
            detail_generation: 0,
            messages_tx,
            messages_rx,
            cast: Arc::new(cast),
            cast_generation: Arc::new(AtomicU64::new(0)),
            cast_task: None,
            pending_events: Vec::new(),
        }
    }

    /// Take all events emitted since the last call
    pub fn collect_pending_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ---- primary join ----

    /// Start loading the detail for `record`. Idle/Ready → Loading.
    ///
    /// Any earlier selection still loading is abandoned: its requests
    /// complete, but [`DetailAggregator::apply_detail`] ignores the result.
    /// The cast lookup belongs to the previous detail and is cancelled.
    pub fn select(&mut self, record: Record) {
        self.cancel_cast();
        self.detail_generation += 1;
        self.detail = LoadState::Loading;

        let generation = self.detail_generation;
        let record_id = record.id;
        tracing::debug!("Loading detail for record {} (generation {})", record_id, generation);
        self.pending_events
            .push(ModelEvent::DetailLoading { record_id });

        let api = Arc::clone(&self.api);
        let messages_tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let result = load_detail(api, &record).await;
            // Receiver lives as long as the aggregator
            let _ = messages_tx.send(DetailMessage {
                generation,
                record_id,
                result,
            });
        });
    }

    /// Wait for the next primary join completion (cancel-safe)
    pub async fn next_message(&mut self) -> Option<DetailMessage> {
        self.messages_rx.recv().await
    }

    /// Apply a join completion. Loading → Ready on success.
    ///
    /// Returns `Ok(false)` for a superseded selection. On failure the state
    /// goes back to Idle and the error is returned for display.
    pub fn apply_detail(&mut self, message: DetailMessage) -> Result<bool, CatalogError> {
        if message.generation != self.detail_generation {
            tracing::debug!(
                "Discarding detail for record {} (generation {} != {})",
                message.record_id,
                message.generation,
                self.detail_generation
            );
            return Ok(false);
        }

        match message.result {
            Ok(payload) => {
                self.pending_events.push(ModelEvent::DetailReady {
                    record_id: message.record_id,
                    episodes: payload.episodes.len(),
                });
                self.detail = LoadState::Ready(payload);
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Detail lookup for record {} failed: {}", message.record_id, e);
                self.detail = LoadState::Idle;
                Err(e)
            }
        }
    }

    /// Close the detail view; late results are ignored
    pub fn close(&mut self) {
        self.detail_generation += 1;
        self.detail = LoadState::Idle;
        self.cancel_cast();
    }

    pub fn detail(&self) -> &LoadState<DetailPayload> {
        &self.detail
    }

    // ---- secondary cast lookup ----

    /// Look up the characters behind `character_urls`. Any previous cast
    /// lookup is cancelled. Returns a receiver that observes the outcome.
    pub fn request_cast<S: AsRef<str>>(&mut self, character_urls: &[S]) -> watch::Receiver<CastState> {
        let ids = resource_ids(character_urls);
        let generation = self.cast_generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.cast_task.take() {
            task.abort();
        }
        self.cast.send_replace(CastState::Loading);
        tracing::debug!("Loading cast of {} characters (generation {})", ids.len(), generation);

        let api = Arc::clone(&self.api);
        let cast = Arc::clone(&self.cast);
        let current = Arc::clone(&self.cast_generation);
        self.cast_task = Some(tokio::spawn(async move {
            let outcome = match api.list_by_ids(&ids).await {
                Ok(records) => CastState::Ready(records),
                Err(e) => {
                    tracing::warn!("Cast lookup failed: {}", e);
                    CastState::Failed(e.to_string())
                }
            };
            cast.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = outcome;
                true
            });
        }));

        self.cast.subscribe()
    }

    /// Look up the cast of the n-th episode of the loaded detail.
    /// Returns `None` when no detail is ready or the index is out of range.
    pub fn request_episode_cast(&mut self, episode_index: usize) -> Option<watch::Receiver<CastState>> {
        let characters = self
            .detail
            .ready()?
            .episodes
            .get(episode_index)?
            .characters
            .clone();
        Some(self.request_cast(&characters))
    }

    /// Abort the cast lookup, if any, and return to Idle
    pub fn cancel_cast(&mut self) {
        self.cast_generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.cast_task.take() {
            task.abort();
        }
        self.cast.send_replace(CastState::Idle);
    }

    pub fn subscribe_cast(&self) -> watch::Receiver<CastState> {
        self.cast.subscribe()
    }

    pub fn cast_state(&self) -> CastState {
        self.cast.borrow().clone()
    }

    /// Name of the n-th loaded cast member, for jumping back to search
    pub fn cast_member_name(&self, index: usize) -> Option<String> {
        self.cast
            .borrow()
            .ready()
            .and_then(|cast| cast.get(index))
            .map(|record| record.name.clone())
    }
}

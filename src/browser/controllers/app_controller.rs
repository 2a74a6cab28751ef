//! # Browser Application Controller
//!
//! The controller wires user input to the view models and decides what to
//! redraw. It owns every background channel the view models feed:
//!
//! - search results from the [`SearchPipeline`]
//! - replies to pagination and filter requests
//! - detail joins and cast lookups from the [`DetailAggregator`]
//!
//! All of them are awaited in one `tokio::select!` loop next to the
//! [`EventSource`], so the terminal stays responsive while requests are
//! in flight.

use crate::browser::events::{EventSource, InputEvent, ModelEvent};
use crate::browser::models::PageEnvelope;
use crate::browser::services::{
    CatalogApi, CatalogError, QueryClient, SearchHandle, SearchPipeline, SearchResult,
};
use crate::browser::view_models::{
    CastState, DetailAggregator, DetailMessage, ListViewModel, PendingQuery, QueryChange,
};
use crate::browser::views::{TerminalRenderer, ViewRenderer};
use crate::config::AppConfig;
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const HELP: &str = "Type a name to search. Commands: :page N, :next, :prev, \
:status alive|dead|unknown|any, :sort name|episode asc|desc, :show N, :cast N, :goto N, :q";

/// Reply to a pagination or filter request
struct ListReply {
    pending: PendingQuery,
    result: Result<PageEnvelope, CatalogError>,
}

/// Whatever woke the event loop up
enum Wakeup {
    Input(Option<InputEvent>),
    Search(SearchResult),
    List(ListReply),
    Detail(DetailMessage),
    CastChanged,
    Closed,
}

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventSource, W: Write> {
    api: Arc<dyn CatalogApi>,
    search: SearchHandle,
    search_results: mpsc::UnboundedReceiver<SearchResult>,
    list: ListViewModel,
    list_replies_tx: mpsc::UnboundedSender<ListReply>,
    list_replies_rx: mpsc::UnboundedReceiver<ListReply>,
    list_task: Option<JoinHandle<()>>,
    detail: DetailAggregator,
    cast_rx: watch::Receiver<CastState>,
    renderer: TerminalRenderer<W>,
    event_source: ES,
    should_quit: bool,
}

impl<ES: EventSource, W: Write> AppController<ES, W> {
    /// Create a controller talking to the catalog at `config.base_url`.
    /// Must be called from within a tokio runtime.
    pub fn new(config: &AppConfig, event_source: ES, writer: W) -> Self {
        let api: Arc<dyn CatalogApi> = Arc::new(QueryClient::new(config.base_url.clone()));
        Self::with_api(api, config, event_source, TerminalRenderer::new(writer))
    }

    /// Create a controller over any [`CatalogApi`] (dependency injection)
    pub fn with_api(
        api: Arc<dyn CatalogApi>,
        config: &AppConfig,
        event_source: ES,
        renderer: TerminalRenderer<W>,
    ) -> Self {
        let (search, search_results) =
            SearchPipeline::spawn(Arc::clone(&api), config.debounce, config.initial_status);

        let list =
            ListViewModel::with_page_size(config.page_size).with_status(config.initial_status);

        let detail = DetailAggregator::new(Arc::clone(&api));
        let cast_rx = detail.subscribe_cast();
        let (list_replies_tx, list_replies_rx) = mpsc::unbounded_channel();

        Self {
            api,
            search,
            search_results,
            list,
            list_replies_tx,
            list_replies_rx,
            list_task: None,
            detail,
            cast_rx,
            renderer,
            event_source,
            should_quit: false,
        }
    }

    pub fn list(&self) -> &ListViewModel {
        &self.list
    }

    pub fn detail(&self) -> &DetailAggregator {
        &self.detail
    }

    pub fn search(&self) -> &SearchHandle {
        &self.search
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop until the user quits or input closes
    pub async fn run(&mut self) -> Result<()> {
        self.renderer.render_message(HELP)?;

        while !self.should_quit {
            self.step().await?;
        }

        tracing::debug!("Controller loop finished");
        Ok(())
    }

    /// Wait for one input event or background completion and handle it
    pub async fn step(&mut self) -> Result<()> {
        let wakeup = self.next_wakeup(true).await?;
        self.handle_wakeup(wakeup)
    }

    /// Like [`AppController::step`], but leaves the input untouched
    pub async fn process_background(&mut self) -> Result<()> {
        let wakeup = self.next_wakeup(false).await?;
        self.handle_wakeup(wakeup)
    }

    async fn next_wakeup(&mut self, read_input: bool) -> Result<Wakeup> {
        let wakeup = tokio::select! {
            event = self.event_source.next_event(), if read_input => Wakeup::Input(event?),
            Some(result) = self.search_results.recv() => Wakeup::Search(result),
            Some(reply) = self.list_replies_rx.recv() => Wakeup::List(reply),
            Some(message) = self.detail.next_message() => Wakeup::Detail(message),
            Ok(()) = self.cast_rx.changed() => Wakeup::CastChanged,
            else => Wakeup::Closed,
        };
        Ok(wakeup)
    }

    fn handle_wakeup(&mut self, wakeup: Wakeup) -> Result<()> {
        match wakeup {
            Wakeup::Input(Some(event)) => self.handle_input(event)?,
            Wakeup::Input(None) => {
                tracing::debug!("Input closed, quitting");
                self.should_quit = true;
            }
            Wakeup::Search(result) => self.handle_search_result(result),
            Wakeup::List(reply) => self.handle_list_reply(reply)?,
            Wakeup::Detail(message) => self.handle_detail_message(message)?,
            Wakeup::CastChanged => {
                let cast = self.cast_rx.borrow_and_update().clone();
                self.renderer.render_cast(&cast)?;
            }
            Wakeup::Closed => {
                tracing::warn!("All background channels closed, quitting");
                self.should_quit = true;
            }
        }
        self.process_model_events()
    }

    /// Apply a user input event
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        tracing::debug!("Input event: {:?}", event);

        match event {
            InputEvent::SearchTyped(term) => self.search.submit(term)?,
            InputEvent::PageRequested(page_index) => {
                let page_count = self.list.page_count();
                if self.list.results_empty() {
                    self.renderer.render_message("No results to page through")?;
                } else if page_count > 0 && u64::from(page_index) >= page_count {
                    self.renderer.render_error(&format!(
                        "Page {} does not exist ({} pages)",
                        page_index + 1,
                        page_count
                    ))?;
                } else {
                    self.change_query(QueryChange::Page(page_index));
                }
            }
            InputEvent::NextPage => match self.list.next_page_index() {
                Some(page_index) => self.change_query(QueryChange::Page(page_index)),
                None => self.renderer.render_message("Already on the last page")?,
            },
            InputEvent::PreviousPage => match self.list.previous_page_index() {
                Some(page_index) => self.change_query(QueryChange::Page(page_index)),
                None => self.renderer.render_message("Already on the first page")?,
            },
            InputEvent::StatusSelected(status) => {
                // Later searches must use the new filter too
                self.search.set_status(status);
                self.change_query(QueryChange::Status(status));
            }
            InputEvent::SortRequested { key, direction } => self.list.sort(key, direction),
            InputEvent::RecordSelected(index) => match self.list.record(index) {
                Some(record) => {
                    let record = record.clone();
                    self.detail.select(record);
                }
                None => self
                    .renderer
                    .render_error(&format!("No record {} on this page", index + 1))?,
            },
            InputEvent::CastRequested(index) => {
                if self.detail.request_episode_cast(index).is_none() {
                    self.renderer.render_error(&format!(
                        "No episode {} in the open detail",
                        index + 1
                    ))?;
                }
            }
            InputEvent::CastMemberChosen(index) => match self.detail.cast_member_name(index) {
                Some(name) => {
                    self.detail.close();
                    self.renderer
                        .render_message(&format!("Searching for \"{name}\""))?;
                    self.search.submit(name)?;
                }
                None => self
                    .renderer
                    .render_error(&format!("No cast member {} loaded", index + 1))?,
            },
            InputEvent::Invalid { input, reason } => {
                self.renderer.render_error(&format!("{reason}: {input}"))?
            }
            InputEvent::Quit => self.should_quit = true,
        }

        self.process_model_events()
    }

    /// Issue a pagination or filter change and fetch its page in the background
    fn change_query(&mut self, change: QueryChange) {
        let pending = self.list.apply_query(change);
        self.fetch_list(pending);
    }

    fn fetch_list(&mut self, pending: PendingQuery) {
        if let Some(task) = self.list_task.take() {
            task.abort();
        }

        tracing::debug!(
            "Fetching page {} for {:?} (generation {})",
            pending.query.page_index,
            pending.query,
            pending.generation
        );
        let api = Arc::clone(&self.api);
        let replies = self.list_replies_tx.clone();
        self.list_task = Some(tokio::spawn(async move {
            let result = api.list_records(&pending.query).await;
            // Receiver lives as long as the controller
            let _ = replies.send(ListReply { pending, result });
        }));
    }

    fn handle_search_result(&mut self, result: SearchResult) {
        tracing::debug!(
            "Search result for {:?} (generation {})",
            result.term,
            result.generation
        );
        // A search supersedes any page or filter request in flight
        if let Some(task) = self.list_task.take() {
            task.abort();
        }
        if let Some(requery) = self.list.apply_search_result(result) {
            self.fetch_list(requery);
        }
    }

    fn handle_list_reply(&mut self, reply: ListReply) -> Result<()> {
        let ListReply { pending, result } = reply;
        match result {
            Ok(envelope) => {
                self.list.complete_query(&pending, envelope);
            }
            Err(e) if pending.generation == self.list.generation() => {
                tracing::error!("List request failed: {}", e);
                self.renderer
                    .render_error(&format!("Could not load page {}: {}", pending.query.wire_page(), e))?;
            }
            Err(e) => tracing::debug!("Ignoring failure of superseded list request: {}", e),
        }
        Ok(())
    }

    fn handle_detail_message(&mut self, message: DetailMessage) -> Result<()> {
        let record_id = message.record_id;
        if let Err(e) = self.detail.apply_detail(message) {
            self.renderer
                .render_error(&format!("Could not load record {record_id}: {e}"))?;
        }
        Ok(())
    }

    /// Drain view model events and redraw what they touched
    fn process_model_events(&mut self) -> Result<()> {
        let redraw_list = self.list.collect_pending_events().iter().any(|event| {
            matches!(
                event,
                ModelEvent::ResultsReplaced { .. }
                    | ModelEvent::ResultsEmpty
                    | ModelEvent::SortApplied { .. }
            )
        });
        if redraw_list {
            self.renderer.render_list(&self.list)?;
        }

        for event in self.detail.collect_pending_events() {
            match event {
                ModelEvent::DetailLoading { record_id } => self
                    .renderer
                    .render_message(&format!("Loading record {record_id}..."))?,
                ModelEvent::DetailReady { .. } => {
                    if let Some(payload) = self.detail.detail().ready() {
                        self.renderer.render_detail(payload)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

//! Testing infrastructure for browser components
//!
//! Provides an in-memory [`CatalogApi`] with scriptable latency and
//! failures, so timing-sensitive behaviour can be tested against a paused
//! tokio clock instead of a live server.

use crate::browser::models::{
    Episode, OneOrMany, PageEnvelope, PageInfo, QueryState, Record, Status, StatusFilter,
};
use crate::browser::services::{CatalogApi, CatalogError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

const FAKE_PAGE_SIZE: usize = 20;

/// A request observed by [`FakeCatalog`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(QueryState),
    Get(u32),
    Characters(Vec<u32>),
    Episodes(Vec<u32>),
}

/// In-memory catalog that records every call it receives
#[derive(Default)]
pub struct FakeCatalog {
    records: Vec<Record>,
    episodes: Vec<Episode>,
    calls: Mutex<Vec<Call>>,
    finished: Mutex<Vec<Call>>,
    failing_terms: Mutex<HashSet<String>>,
    term_delays: Mutex<HashMap<String, Duration>>,
    detail_delay: Mutex<Duration>,
    episode_delay: Mutex<Duration>,
    fail_episodes: Mutex<bool>,
}

impl FakeCatalog {
    pub fn new(records: Vec<Record>, episodes: Vec<Episode>) -> Self {
        Self {
            records,
            episodes,
            ..Self::default()
        }
    }

    /// Make list requests for `term` fail with a 500
    pub fn fail_term(&self, term: &str) {
        self.failing_terms.lock().unwrap().insert(term.to_string());
    }

    pub fn delay_term(&self, term: &str, delay: Duration) {
        self.term_delays
            .lock()
            .unwrap()
            .insert(term.to_string(), delay);
    }

    pub fn delay_detail(&self, delay: Duration) {
        *self.detail_delay.lock().unwrap() = delay;
    }

    pub fn delay_episodes(&self, delay: Duration) {
        *self.episode_delay.lock().unwrap() = delay;
    }

    pub fn fail_episodes(&self) {
        *self.fail_episodes.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Detail and episode lookups that ran to completion
    pub fn finished_calls(&self) -> Vec<Call> {
        self.finished.lock().unwrap().clone()
    }

    /// Only the list requests, in the order they were issued
    pub fn list_calls(&self) -> Vec<QueryState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn matches(record: &Record, query: &QueryState) -> bool {
        let name_ok = record
            .name
            .to_lowercase()
            .contains(&query.name.to_lowercase());
        let status_ok = match query.status {
            StatusFilter::Any => true,
            StatusFilter::Alive => record.status == Status::Alive,
            StatusFilter::Dead => record.status == Status::Dead,
            StatusFilter::Unknown => record.status == Status::Unknown,
        };
        name_ok && status_ok
    }

    fn not_found(what: &str) -> CatalogError {
        CatalogError::Status {
            status: 404,
            body: format!("{{\"error\":\"{what} not found\"}}"),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_records(&self, query: &QueryState) -> Result<PageEnvelope, CatalogError> {
        self.record_call(Call::List(query.clone()));

        let delay = self.term_delays.lock().unwrap().get(&query.name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_terms.lock().unwrap().contains(&query.name) {
            return Err(CatalogError::Status {
                status: 500,
                body: "upstream exploded".to_string(),
            });
        }

        let matching: Vec<Record> = self
            .records
            .iter()
            .filter(|record| Self::matches(record, query))
            .cloned()
            .collect();
        if matching.is_empty() {
            return Ok(PageEnvelope::empty());
        }

        let count = matching.len() as u64;
        let pages = matching.len().div_ceil(FAKE_PAGE_SIZE) as u32;
        let start = query.page_index as usize * FAKE_PAGE_SIZE;
        let results: Vec<Record> = matching
            .into_iter()
            .skip(start)
            .take(FAKE_PAGE_SIZE)
            .collect();
        let info = PageInfo {
            count,
            pages,
            next: None,
            prev: None,
        };
        Ok(PageEnvelope::new(info, results))
    }

    async fn get_record(&self, id: u32) -> Result<Record, CatalogError> {
        self.record_call(Call::Get(id));
        let delay = *self.detail_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        self.finished.lock().unwrap().push(Call::Get(id));
        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Character"))
    }

    async fn list_by_ids(&self, ids: &[u32]) -> Result<Vec<Record>, CatalogError> {
        self.record_call(Call::Characters(ids.to_vec()));
        Ok(self
            .records
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect())
    }

    async fn lookup_episodes(&self, ids: &[u32]) -> Result<OneOrMany<Episode>, CatalogError> {
        self.record_call(Call::Episodes(ids.to_vec()));
        let delay = *self.episode_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        self.finished
            .lock()
            .unwrap()
            .push(Call::Episodes(ids.to_vec()));
        if *self.fail_episodes.lock().unwrap() {
            return Err(CatalogError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }

        let mut found: Vec<Episode> = self
            .episodes
            .iter()
            .filter(|episode| ids.contains(&episode.id))
            .cloned()
            .collect();
        if ids.len() == 1 {
            return found
                .pop()
                .map(OneOrMany::One)
                .ok_or_else(|| Self::not_found("Episode"));
        }
        Ok(OneOrMany::Many(found))
    }
}

/// Build an episode with the given id and cast
pub fn episode(id: u32, name: &str, cast: &[u32]) -> Episode {
    Episode {
        id,
        name: name.to_string(),
        air_date: "December 2, 2013".to_string(),
        code: format!("S01E{id:02}"),
        characters: cast
            .iter()
            .map(|c| format!("https://rickandmortyapi.com/api/character/{c}"))
            .collect(),
        url: format!("https://rickandmortyapi.com/api/episode/{id}"),
    }
}

/// Small catalog shared by the view model tests
pub fn sample_catalog() -> FakeCatalog {
    use crate::browser::models::record::fixtures::record;

    let mut dead = record(3, "Summer Smith", &[6, 7]);
    dead.status = Status::Dead;
    FakeCatalog::new(
        vec![
            record(1, "Rick Sanchez", &[1, 2, 10]),
            record(2, "Morty Smith", &[1, 3]),
            dead,
            record(4, "Beth Smith", &[6]),
        ],
        vec![
            episode(1, "Pilot", &[1, 2]),
            episode(2, "Lawnmower Dog", &[1, 2]),
            episode(3, "Anatomy Park", &[1, 2]),
            episode(6, "Rick Potion #9", &[1, 2, 3, 4]),
            episode(7, "Raising Gazorpazorp", &[1, 2, 3]),
            episode(10, "Close Rick-counters", &[1, 2]),
        ],
    )
}

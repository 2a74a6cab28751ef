//! Load state model for background lookups and the detail payload

use super::episode::Episode;
use super::record::Record;

/// Progress of an asynchronous lookup
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// The selected record joined with the episodes it appears in.
/// Only ever built once both lookups have completed.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPayload {
    pub record: Record,
    pub episodes: Vec<Episode>,
}

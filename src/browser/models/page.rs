//! Page envelope model
//!
//! One page of list results plus the server-side totals. When nothing
//! matches, the API answers with a body that has neither `info` nor
//! `results`; that shape deserializes to the empty sentinel.

use super::record::Record;
use serde::{Deserialize, Serialize};

/// Paging header returned with every list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// A list response, or the empty sentinel when `info`/`results` are absent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub info: Option<PageInfo>,
    #[serde(default)]
    pub results: Option<Vec<Record>>,
}

impl PageEnvelope {
    /// The sentinel that stands for "no matches" and for absorbed failures
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a populated envelope
    pub fn new(info: PageInfo, results: Vec<Record>) -> Self {
        Self {
            info: Some(info),
            results: Some(results),
        }
    }

    /// True when the envelope carries no count or no results
    pub fn is_empty_result(&self) -> bool {
        self.info.is_none() || self.results.is_none()
    }

    /// Total number of matching records across all pages
    pub fn count(&self) -> Option<u64> {
        self.info.as_ref().map(|info| info.count)
    }

    /// Records on this page, empty for the sentinel
    pub fn records(&self) -> &[Record] {
        self.results.as_deref().unwrap_or(&[])
    }
}

/// Number of pages needed to show `count` records at `page_size` per page
pub fn page_count(count: u64, page_size: usize) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64)
}

/// A batched lookup reply: one object for a single id, an array otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to a sequence
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

//! Query state model
//!
//! The list query the user is currently looking at. Owned exclusively by
//! the list view model and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status filter sent with list requests. `Any` sends an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    Any,
    Alive,
    Dead,
    Unknown,
}

impl StatusFilter {
    /// Value of the `status` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            StatusFilter::Any => "",
            StatusFilter::Alive => "alive",
            StatusFilter::Dead => "dead",
            StatusFilter::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Any => f.write_str("any"),
            other => f.write_str(other.as_query_value()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" | "all" => Ok(StatusFilter::Any),
            "alive" => Ok(StatusFilter::Alive),
            "dead" => Ok(StatusFilter::Dead),
            "unknown" => Ok(StatusFilter::Unknown),
            other => Err(format!("Unknown status filter: {other}")),
        }
    }
}

/// Parameters of a single list request. `page_index` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryState {
    pub name: String,
    pub status: StatusFilter,
    pub page_index: u32,
}

impl QueryState {
    pub fn new(name: impl Into<String>, status: StatusFilter, page_index: u32) -> Self {
        Self {
            name: name.into(),
            status,
            page_index,
        }
    }

    /// One-based page number used on the wire
    pub fn wire_page(&self) -> u32 {
        self.page_index.saturating_add(1)
    }
}

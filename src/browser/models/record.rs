//! Record model
//!
//! A single catalog entry as the API returns it. Records are immutable once
//! received; everything derived from them (identifiers, latest episode) is
//! computed without touching the stored data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Dead,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Named link to another resource (origin, current location)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub status: Status,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub subtype: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: Reference,
    #[serde(default)]
    pub location: Reference,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub created: DateTime<Utc>,
}

impl Record {
    /// Identifiers of every referenced episode, in reference order
    pub fn episode_ids(&self) -> Vec<u32> {
        resource_ids(&self.episode)
    }

    /// Reference URL of the most recent episode this record appears in.
    ///
    /// "Most recent" is the highest numeric episode id. References whose
    /// tail is not numeric rank below every numeric one and are ordered
    /// lexicographically among themselves.
    pub fn latest_episode(&self) -> Option<&str> {
        self.episode
            .iter()
            .max_by(|a, b| episode_rank(a).cmp(&episode_rank(b)))
            .map(String::as_str)
    }

    /// Numeric id of [`Record::latest_episode`], when it has one
    pub fn latest_episode_id(&self) -> Option<u32> {
        self.latest_episode().and_then(resource_id)
    }
}

/// Ordering key for an episode reference: numeric tail first, raw text second
pub(crate) fn episode_rank(url: &str) -> (Option<u32>, &str) {
    (resource_id(url), url)
}

/// Extract the trailing path segment of a resource URL as an identifier.
///
/// `https://host/api/episode/28` and `https://host/api/episode/28/` both
/// yield `Some(28)`.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .and_then(|segment| segment.parse().ok())
}

/// Extract identifiers from a list of resource URLs, skipping malformed ones
pub fn resource_ids<S: AsRef<str>>(urls: &[S]) -> Vec<u32> {
    urls.iter()
        .filter_map(|url| {
            let url = url.as_ref();
            let id = resource_id(url);
            if id.is_none() {
                tracing::warn!("Skipping reference without numeric id: {}", url);
            }
            id
        })
        .collect()
}

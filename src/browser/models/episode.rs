//! Episode summary model

use super::record::resource_ids;
use serde::{Deserialize, Serialize};

/// An episode as returned by the batched episode lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub air_date: String,
    /// Season/episode code such as `S01E01`
    #[serde(rename = "episode", default)]
    pub code: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub url: String,
}

impl Episode {
    /// Identifiers of the characters appearing in this episode
    pub fn character_ids(&self) -> Vec<u32> {
        resource_ids(&self.characters)
    }
}

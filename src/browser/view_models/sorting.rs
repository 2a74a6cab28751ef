//! Comparators for reordering the displayed page.
//!
//! Sorting is stable: records that compare equal keep their prior
//! relative order, which also makes re-applying the same sort a no-op.

use crate::browser::models::record::episode_rank;
use crate::browser::models::{Record, SortDirection, SortKey};
use std::cmp::Ordering;

/// Sort `records` in place by `key` and `direction`. `SortKey::None` leaves them untouched.
pub fn sort_records(records: &mut [Record], key: SortKey, direction: SortDirection) {
    if key == SortKey::None {
        return;
    }
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::Name => a.name.cmp(&b.name),
        // Records without episodes rank first
        SortKey::LatestEpisode => a
            .latest_episode()
            .map(episode_rank)
            .cmp(&b.latest_episode().map(episode_rank)),
    }
}

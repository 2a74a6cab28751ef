//! # Models Module
//!
//! Plain data the view models hold: catalog records, page envelopes,
//! episodes and the query/sort/load state that drives requests.

pub mod episode;
pub mod load_state;
pub mod page;
pub mod query_state;
pub mod record;
pub mod sort_state;

pub use episode::Episode;
pub use load_state::{DetailPayload, LoadState};
pub use page::{page_count, OneOrMany, PageEnvelope, PageInfo};
pub use query_state::{QueryState, StatusFilter};
pub use record::{resource_id, resource_ids, Record, Reference, Status};
pub use sort_state::{SortDirection, SortKey, SortState};

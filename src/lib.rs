//! # Catalog Browser - Reactive Terminal Browser for a Character Catalog API
//!
//! Search, filter, paginate and sort catalog records, and open a joined
//! detail view of a record and the episodes it appears in.
//! Built with an MVVM architecture so the timing-sensitive parts can be
//! tested without a terminal or a live server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Renders    ┌────────────────┐   Requests   ┌──────────────┐
//! │    View     │◄─────────────│   ViewModels   │─────────────▶│   Services   │
//! │             │              │                │              │              │
//! │ - Terminal  │              │ - List paging  │              │ - QueryClient│
//! │   output    │              │ - Sorting      │              │ - Search     │
//! │             │              │ - Detail join  │              │   pipeline   │
//! └─────────────┘              └────────────────┘              └──────────────┘
//!                                      ▲
//!                                      │ Input events
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Input      │
//!                               │   mapping    │
//!                               │ - Event loop │
//!                               └──────────────┘
//! ```
//!
//! ## Request flow
//!
//! - typed terms go through the debounced [`SearchPipeline`]
//! - page and filter changes go through [`ListViewModel::apply_query`] and
//!   replies to superseded queries are dropped
//! - the detail view appears only once the record and its episodes have
//!   both arrived

pub mod browser;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use browser::*;

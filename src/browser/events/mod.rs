//! # Events Module
//!
//! Re-exports all event system components: user input, model change
//! notifications and input sources.

pub mod event_source;
pub mod input_events;
pub mod model_events;

pub use event_source::{EventSource, ScriptedEventSource, StdinEventSource};
pub use input_events::InputEvent;
pub use model_events::ModelEvent;

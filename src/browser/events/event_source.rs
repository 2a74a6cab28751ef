//! # Event Source Abstraction
//!
//! The controller never reads the terminal directly. It pulls
//! [`InputEvent`]s from an [`EventSource`]:
//!
//! ```text
//! Production:   AppController ──▶ StdinEventSource    ──▶ tokio::io::stdin()
//! Testing:      AppController ──▶ ScriptedEventSource ──▶ VecDeque<InputEvent>
//! ```

use super::input_events::InputEvent;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Trait for abstracting event input sources
///
/// `next_event` must be cancel-safe: the controller polls it inside
/// `tokio::select!` alongside network completions.
#[async_trait]
pub trait EventSource: Send {
    /// Wait for the next event. `Ok(None)` means the input is closed.
    async fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Line-oriented event source reading standard input
pub struct StdinEventSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinEventSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSource for StdinEventSource {
    async fn next_event(&mut self) -> Result<Option<InputEvent>> {
        let line = self.lines.next_line().await?;
        Ok(line.map(|line| InputEvent::parse(&line)))
    }
}

/// Pre-programmed event source for tests and scripted sessions
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    events: VecDeque<InputEvent>,
}

impl ScriptedEventSource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Build from raw input lines, parsed the same way as stdin
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(InputEvent::parse))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

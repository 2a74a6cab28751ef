//! # Terminal Renderer
//!
//! Line-oriented output for the browser: the current page of results, the
//! joined detail view, the cast of an episode and error/status messages.
//! Views only read view model state; they never mutate it.

use crate::browser::models::{DetailPayload, LoadState, Record, SortKey, Status, StatusFilter};
use crate::browser::view_models::{CastState, ListViewModel};
use anyhow::Result;
use crossterm::style::Stylize;
use std::io::Write;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Render the current page of results with its paging summary
    fn render_list(&mut self, list: &ListViewModel) -> Result<()>;

    /// Render a completed detail join
    fn render_detail(&mut self, detail: &DetailPayload) -> Result<()>;

    /// Render the state of the episode cast lookup
    fn render_cast(&mut self, cast: &CastState) -> Result<()>;

    /// Render an error the user should see
    fn render_error(&mut self, message: &str) -> Result<()>;

    /// Render an informational message
    fn render_message(&mut self, message: &str) -> Result<()>;
}

/// Renderer writing plain lines to any [`Write`] sink, with optional colours
pub struct TerminalRenderer<W: Write> {
    writer: W,
    colored: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            colored: true,
        }
    }

    /// Renderer that never emits escape sequences
    pub fn plain(writer: W) -> Self {
        Self {
            writer,
            colored: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn status_label(&self, status: Status) -> String {
        let label = status.to_string();
        if !self.colored {
            return label;
        }
        match status {
            Status::Alive => label.green().to_string(),
            Status::Dead => label.red().to_string(),
            Status::Unknown => label,
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.colored {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_record_line(&mut self, position: usize, record: &Record) -> Result<()> {
        let latest = record
            .latest_episode_id()
            .map(|id| format!("latest ep {id}"))
            .unwrap_or_else(|| "no episodes".to_string());
        let status = self.status_label(record.status);
        let latest = self.dimmed(&latest);
        writeln!(
            self.writer,
            "{:>3}. {:<28} {:<8} {:<10} {}",
            position, record.name, status, record.species, latest
        )?;
        Ok(())
    }

    fn list_header(list: &ListViewModel) -> String {
        let query = list.query();
        let mut header = format!(
            "Page {}/{} | {} results",
            list.page_index() + 1,
            list.page_count().max(1),
            list.total_count()
        );
        if !query.name.is_empty() {
            header.push_str(&format!(" | name \"{}\"", query.name));
        }
        if query.status != StatusFilter::Any {
            header.push_str(&format!(" | status {}", query.status));
        }
        let sort = list.sort_state();
        if sort.applied && sort.key != SortKey::None {
            header.push_str(&format!(" | sorted by {} {}", sort.key, sort.direction));
        }
        header
    }
}

impl<W: Write> ViewRenderer for TerminalRenderer<W> {
    fn render_list(&mut self, list: &ListViewModel) -> Result<()> {
        if list.results_empty() {
            let name = &list.query().name;
            writeln!(self.writer, "No results for \"{name}\"")?;
            self.writer.flush()?;
            return Ok(());
        }

        writeln!(self.writer, "{}", Self::list_header(list))?;
        for (i, record) in list.records().iter().enumerate() {
            self.write_record_line(i + 1, record)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn render_detail(&mut self, detail: &DetailPayload) -> Result<()> {
        let record = &detail.record;
        let status = self.status_label(record.status);
        writeln!(self.writer, "#{} {} ({})", record.id, record.name, status)?;
        writeln!(self.writer, "  Species:  {}", record.species)?;
        if !record.subtype.is_empty() {
            writeln!(self.writer, "  Type:     {}", record.subtype)?;
        }
        writeln!(self.writer, "  Gender:   {}", record.gender)?;
        writeln!(self.writer, "  Origin:   {}", record.origin.name)?;
        writeln!(self.writer, "  Location: {}", record.location.name)?;
        writeln!(self.writer, "  Episodes ({}):", detail.episodes.len())?;
        for (i, episode) in detail.episodes.iter().enumerate() {
            let air_date = self.dimmed(&episode.air_date);
            writeln!(
                self.writer,
                "{:>5}. {} {} {}",
                i + 1,
                episode.code,
                episode.name,
                air_date
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn render_cast(&mut self, cast: &CastState) -> Result<()> {
        match cast {
            LoadState::Idle => return Ok(()),
            LoadState::Loading => writeln!(self.writer, "Loading cast...")?,
            LoadState::Failed(reason) => {
                return self.render_error(&format!("Could not load cast: {reason}"));
            }
            LoadState::Ready(records) => {
                writeln!(self.writer, "Cast ({}):", records.len())?;
                for (i, record) in records.iter().enumerate() {
                    let status = self.status_label(record.status);
                    writeln!(self.writer, "{:>5}. {} ({})", i + 1, record.name, status)?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<()> {
        let line = format!("Error: {message}");
        if self.colored {
            writeln!(self.writer, "{}", line.red())?;
        } else {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush()?;
        Ok(())
    }
}

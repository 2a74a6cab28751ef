//! # Input Events
//!
//! User interactions understood by the controller, and the parser that
//! turns one line of terminal input into an event.
//!
//! Plain text is a search term. Commands start with `:` and take
//! one-based numbers, which are converted to zero-based indices here.

use crate::browser::models::{SortDirection, SortKey, StatusFilter};

/// Input events from the user
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Search box content changed
    SearchTyped(String),

    /// Jump to a zero-based page
    PageRequested(u32),

    NextPage,

    PreviousPage,

    /// Status filter changed
    StatusSelected(StatusFilter),

    /// Reorder the displayed page
    SortRequested {
        key: SortKey,
        direction: SortDirection,
    },

    /// Open the detail of the n-th displayed record (zero-based)
    RecordSelected(usize),

    /// Load the cast of the n-th episode of the open detail (zero-based)
    CastRequested(usize),

    /// Search for the n-th cast member by name (zero-based)
    CastMemberChosen(usize),

    /// Input that could not be understood
    Invalid { input: String, reason: String },

    Quit,
}

impl InputEvent {
    /// Parse one line of user input
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return InputEvent::SearchTyped(line.to_string());
        };

        match parse_command(command) {
            Ok(event) => event,
            Err(reason) => InputEvent::Invalid {
                input: line.to_string(),
                reason,
            },
        }
    }
}

fn parse_command(command: &str) -> Result<InputEvent, String> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "q" | "quit" => Ok(InputEvent::Quit),
        "next" | "n" => Ok(InputEvent::NextPage),
        "prev" | "p" => Ok(InputEvent::PreviousPage),
        "page" => {
            let page_index = u32::try_from(one_based(&args)?)
                .map_err(|_| "Page number is too large".to_string())?;
            Ok(InputEvent::PageRequested(page_index))
        }
        "status" => {
            let status = args.first().copied().unwrap_or("any").parse()?;
            Ok(InputEvent::StatusSelected(status))
        }
        "sort" => {
            let key: SortKey = args
                .first()
                .ok_or_else(|| "Usage: :sort name|episode [asc|desc]".to_string())?
                .parse()?;
            let direction = match args.get(1) {
                Some(dir) => dir.parse()?,
                None => SortDirection::Ascending,
            };
            Ok(InputEvent::SortRequested { key, direction })
        }
        "show" => Ok(InputEvent::RecordSelected(one_based(&args)?)),
        "cast" => Ok(InputEvent::CastRequested(one_based(&args)?)),
        "goto" => Ok(InputEvent::CastMemberChosen(one_based(&args)?)),
        "" => Err("Empty command".to_string()),
        other => Err(format!("Unknown command: {other}")),
    }
}

/// Read a single one-based number argument as a zero-based index
fn one_based(args: &[&str]) -> Result<usize, String> {
    let raw = args
        .first()
        .ok_or_else(|| "Expected a number".to_string())?;
    let number: usize = raw
        .parse()
        .map_err(|_| format!("Not a number: {raw}"))?;
    number
        .checked_sub(1)
        .ok_or_else(|| "Numbers start at 1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_should_be_search_term() {
        assert_eq!(
            InputEvent::parse("rick sanchez\n"),
            InputEvent::SearchTyped("rick sanchez".to_string())
        );
        assert_eq!(InputEvent::parse(""), InputEvent::SearchTyped(String::new()));
    }

    #[test]
    fn page_command_should_convert_to_zero_based() {
        assert_eq!(InputEvent::parse(":page 1"), InputEvent::PageRequested(0));
        assert_eq!(InputEvent::parse(":page 5"), InputEvent::PageRequested(4));
    }

    #[test]
    fn page_command_should_reject_numbers_beyond_u32() {
        assert_eq!(
            InputEvent::parse(":page 4294967296"),
            InputEvent::PageRequested(u32::MAX)
        );
        assert_eq!(
            InputEvent::parse(":page 4294967297"),
            InputEvent::Invalid {
                input: ":page 4294967297".to_string(),
                reason: "Page number is too large".to_string(),
            }
        );
    }

    #[test]
    fn page_zero_should_be_invalid() {
        assert!(matches!(
            InputEvent::parse(":page 0"),
            InputEvent::Invalid { .. }
        ));
    }

    #[test]
    fn status_command_should_parse_filter() {
        assert_eq!(
            InputEvent::parse(":status dead"),
            InputEvent::StatusSelected(StatusFilter::Dead)
        );
        assert_eq!(
            InputEvent::parse(":status"),
            InputEvent::StatusSelected(StatusFilter::Any)
        );
    }

    #[test]
    fn sort_command_should_default_to_ascending() {
        assert_eq!(
            InputEvent::parse(":sort name"),
            InputEvent::SortRequested {
                key: SortKey::Name,
                direction: SortDirection::Ascending
            }
        );
        assert_eq!(
            InputEvent::parse(":sort episode desc"),
            InputEvent::SortRequested {
                key: SortKey::LatestEpisode,
                direction: SortDirection::Descending
            }
        );
    }

    #[test]
    fn selection_commands_should_be_zero_based() {
        assert_eq!(InputEvent::parse(":show 3"), InputEvent::RecordSelected(2));
        assert_eq!(InputEvent::parse(":cast 1"), InputEvent::CastRequested(0));
        assert_eq!(InputEvent::parse(":goto 2"), InputEvent::CastMemberChosen(1));
    }

    #[test]
    fn unknown_command_should_be_invalid() {
        match InputEvent::parse(":teleport 3") {
            InputEvent::Invalid { input, reason } => {
                assert_eq!(input, ":teleport 3");
                assert!(reason.contains("teleport"));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn quit_aliases_should_parse() {
        assert_eq!(InputEvent::parse(":q"), InputEvent::Quit);
        assert_eq!(InputEvent::parse(":quit"), InputEvent::Quit);
    }
}

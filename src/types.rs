//! Core shared types for the notebook application.
//!
//! This module contains the enumerations and aggregates used throughout the
//! application, plus the CLI subcommand definitions.

use clap::{Subcommand, ValueEnum};

use crate::{Note, NotebookError};

/// A specialized Result type for notebook operations.
pub type Result<T> = std::result::Result<T, NotebookError>;

/// Which completion states the note list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Filter {
    /// Show every note
    #[default]
    All,
    /// Show only notes that are not completed
    Active,
    /// Show only completed notes
    Completed,
}

impl Filter {
    /// Whether a note passes this filter.
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !note.completed,
            Filter::Completed => note.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The persisted display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal string persisted in the theme key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a persisted theme string. Unknown values yield None so the
    /// caller can fall back to the default.
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The opposite theme, used by the toggle action.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate note counters displayed after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteStats {
    /// Number of notes in the collection
    pub total: usize,
    /// Number of completed notes
    pub completed: usize,
    /// Number of notes still active (total - completed)
    pub active: usize,
}

impl NoteStats {
    /// Computes the counters over the full collection.
    pub fn compute(notes: &[Note]) -> Self {
        let total = notes.len();
        let completed = notes.iter().filter(|note| note.completed).count();

        NoteStats {
            total,
            completed,
            active: total - completed,
        }
    }
}

/// Which empty-state indicator to show when the visible list is empty.
/// The two indicators are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyIndicator {
    /// No notes match the current search term
    NoSearchResults,
    /// There are no notes to show at all
    NoNotes,
}

/// Outcome of the clear-all flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The collection was already empty; nothing to do
    NothingToClear,
    /// The user declined the confirmation prompt
    Cancelled,
    /// The collection was cleared; carries the number of removed notes
    Cleared(usize),
}

/// Available subcommands for the notebook application
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Title of the note (placeholder substituted when empty)
        #[clap(short = 'T', long, default_value = "")]
        title: String,

        /// Content of the note (placeholder substituted when empty)
        #[clap(short, long, default_value = "")]
        content: String,
    },

    /// List notes under the current filter and search term
    List {
        /// Completion filter to apply
        #[clap(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,

        /// Case-insensitive substring to search titles and contents for
        #[clap(short, long)]
        search: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Toggle the completion state of a note
    Toggle {
        /// ID of the note to toggle
        id: String,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Delete every note
    Clear {
        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show or change the display theme
    Theme {
        /// Set the theme to the given value
        #[clap(short, long, value_enum)]
        set: Option<Theme>,

        /// Flip between light and dark
        #[clap(short, long, conflicts_with = "set")]
        toggle: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Note;

    #[test]
    fn theme_parses_persisted_literals() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn stats_split_completed_and_active() {
        let mut notes = vec![
            Note::new("a", "x").unwrap(),
            Note::new("b", "y").unwrap(),
            Note::new("c", "z").unwrap(),
        ];
        notes[1].toggle_completed();

        let stats = NoteStats::compute(&notes);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
    }
}

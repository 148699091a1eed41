//! The Note entity and its creation-time normalization rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{NotebookError, Result};

/// Substituted for an empty title at creation time.
pub const TITLE_PLACEHOLDER: &str = "Без заголовка";

/// Substituted for empty content at creation time.
pub const CONTENT_PLACEHOLDER: &str = "Пустая заметка";

/// Message shown when an add is rejected because both fields are empty.
pub const EMPTY_NOTE_MESSAGE: &str = "Пожалуйста, введите заголовок или текст заметки";

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title, never empty after normalization
    pub title: String,
    /// Note content, never empty after normalization
    pub content: String,
    /// Whether the note has been marked as done
    pub completed: bool,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note from raw user input.
    ///
    /// Both fields are trimmed; an empty field is replaced by its
    /// placeholder. The only hard validation failure is both fields empty
    /// after trimming, which yields a user-facing `EmptyNote` error.
    pub fn new(title: &str, content: &str) -> Result<Self> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() && content.is_empty() {
            return Err(NotebookError::EmptyNote {
                message: EMPTY_NOTE_MESSAGE.to_string(),
            });
        }

        let title = if title.is_empty() {
            TITLE_PLACEHOLDER.to_string()
        } else {
            title.to_string()
        };

        let content = if content.is_empty() {
            CONTENT_PLACEHOLDER.to_string()
        } else {
            content.to_string()
        };

        let now = Utc::now();
        // Generate a unique ID using timestamp and title
        let id = format!(
            "{}-{}",
            now.timestamp_millis(),
            title.to_lowercase().replace(' ', "-")
        );

        Ok(Note {
            id,
            title,
            content,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Flips the completion state and refreshes the modification time.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against title or content.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

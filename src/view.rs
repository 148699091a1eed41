//! View controller: derives the visible note subset and translates user
//! actions into store calls.
//!
//! The controller owns the transient per-session state (filter and search
//! term) and never caches notes; every snapshot re-reads the full collection
//! from the store. Confirmation is a capability the host supplies through
//! the [`Prompter`] trait rather than a hardwired prompt.

use log::{debug, info};

use crate::{ClearOutcome, EmptyIndicator, Filter, Note, NoteStats, Result, Store};

/// Shown when clear-all is requested on an empty collection.
pub const NO_NOTES_TO_CLEAR: &str = "Нет заметок для удаления";

/// Confirmation prompt for deleting a single note.
pub const DELETE_CONFIRM: &str = "Вы уверены, что хотите удалить эту заметку?";

/// Host-provided capability for confirmations and informational messages.
pub trait Prompter {
    /// Asks the user a yes/no question; true means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Shows an informational message that needs no answer.
    fn inform(&mut self, message: &str);
}

/// Transient per-session view state. Reset when the process restarts, never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Completion filter currently applied
    pub filter: Filter,
    /// Search term, stored trimmed and case-folded; empty means no search
    pub search: String,
}

/// Everything the host needs to render one frame of the note list.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Notes passing the current filter and search, in insertion order
    pub visible: Vec<Note>,
    /// Which empty indicator to show, if the visible list is empty
    pub empty: Option<EmptyIndicator>,
    /// Counters over the full collection, not just the visible subset
    pub stats: NoteStats,
}

/// Applies the filter, then the search term, preserving insertion order.
pub fn compute_visible(notes: &[Note], filter: Filter, search: &str) -> Vec<Note> {
    let search = search.trim().to_lowercase();

    notes
        .iter()
        .filter(|note| filter.matches(note))
        .filter(|note| search.is_empty() || note.matches_search(&search))
        .cloned()
        .collect()
}

/// Picks the empty indicator for an empty visible list. The two indicators
/// are mutually exclusive, chosen solely by search non-emptiness.
pub fn empty_indicator(search: &str, visible_is_empty: bool) -> Option<EmptyIndicator> {
    if !visible_is_empty {
        return None;
    }

    if search.trim().is_empty() {
        Some(EmptyIndicator::NoNotes)
    } else {
        Some(EmptyIndicator::NoSearchResults)
    }
}

/// Mediates between the host UI and the persistence store.
pub struct ViewController<'a> {
    store: &'a dyn Store,
    state: ViewState,
}

impl<'a> ViewController<'a> {
    /// Creates a controller over the given store with default view state.
    pub fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            state: ViewState::default(),
        }
    }

    /// Current view state, for rendering filter/search indicators.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!("Filter set to {:?}", filter);
        self.state.filter = filter;
    }

    /// Sets the search term, trimming and case-folding it once up front.
    pub fn set_search(&mut self, search: &str) {
        self.state.search = search.trim().to_lowercase();
        debug!("Search set to {:?}", self.state.search);
    }

    /// Re-reads the full collection and derives the renderable frame.
    pub fn snapshot(&self) -> Result<ViewSnapshot> {
        let notes = self.store.get_all()?;
        let visible = compute_visible(&notes, self.state.filter, &self.state.search);
        let empty = empty_indicator(&self.state.search, visible.is_empty());
        let stats = NoteStats::compute(&notes);

        Ok(ViewSnapshot {
            visible,
            empty,
            stats,
        })
    }

    /// Adds a note from raw user input. Both fields empty after trimming is
    /// the only rejection; single empty fields get placeholders.
    pub fn add_note(&self, title: &str, content: &str) -> Result<Note> {
        let note = Note::new(title, content)?;
        self.store.add(note.clone())?;
        info!("Added note {}", note.id);
        Ok(note)
    }

    /// Flips the completion state of the note with the given id. A missing
    /// id is a silent no-op reported as None.
    pub fn toggle_note(&self, id: &str) -> Result<Option<Note>> {
        let mut note = match self.store.find_by_id(id)? {
            Some(note) => note,
            None => {
                debug!("Toggle skipped, note not found: {}", id);
                return Ok(None);
            }
        };

        note.toggle_completed();
        self.store.update(id, note.clone())?;
        info!("Toggled note {} -> completed={}", id, note.completed);
        Ok(Some(note))
    }

    /// Deletes one note after host confirmation. Returns false when the
    /// user declined. Confirmed deletion is unconditional; a missing id is
    /// a safe no-op.
    pub fn delete_note(&self, id: &str, prompter: &mut dyn Prompter) -> Result<bool> {
        if !prompter.confirm(DELETE_CONFIRM) {
            debug!("Deletion of {} cancelled by user", id);
            return Ok(false);
        }

        self.store.delete(id)?;
        Ok(true)
    }

    /// Clears the whole collection after a count-bearing confirmation. An
    /// empty collection only produces an informational message.
    pub fn clear_all_notes(&self, prompter: &mut dyn Prompter) -> Result<ClearOutcome> {
        let notes = self.store.get_all()?;

        if notes.is_empty() {
            prompter.inform(NO_NOTES_TO_CLEAR);
            return Ok(ClearOutcome::NothingToClear);
        }

        let prompt = format!(
            "Вы уверены, что хотите удалить все заметки ({} шт.)?",
            notes.len()
        );
        if !prompter.confirm(&prompt) {
            debug!("Clear-all cancelled by user");
            return Ok(ClearOutcome::Cancelled);
        }

        self.store.clear_all()?;
        info!("Cleared {} notes", notes.len());
        Ok(ClearOutcome::Cleared(notes.len()))
    }
}

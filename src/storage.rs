//! File-backed persistence for the note collection and theme preference.
//!
//! Storage is addressed by two fixed string keys, each held in its own file
//! under the data directory: the notes key holds a versioned JSON envelope
//! around the note array, the theme key holds the literal theme string.
//! Every mutating operation is a read-modify-write of the whole collection,
//! which is fine at personal-notes scale.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{Note, NotebookError, Result, Theme};

/// Storage key for the serialized note collection.
pub const NOTES_KEY: &str = "notebook_notes";

/// Storage key for the theme preference string.
pub const THEME_KEY: &str = "notebook_theme";

/// Version of the stored notes envelope. Stored data carrying any other
/// version is treated as unreadable and degrades to an empty collection.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk envelope around the note array.
#[derive(Debug, Serialize, Deserialize)]
struct NotesEnvelope {
    schema: u32,
    notes: Vec<Note>,
}

/// Durable storage of the note collection and the theme preference.
///
/// One concrete implementation is constructed at startup and handed to the
/// view controller by reference.
pub trait Store {
    /// Returns the full collection in insertion order. Absent or
    /// unreadable stored data yields an empty collection, never an error.
    fn get_all(&self) -> Result<Vec<Note>>;

    /// Overwrites the full collection with the given sequence.
    fn save_all(&self, notes: &[Note]) -> Result<()>;

    /// Appends one note to the stored collection and persists.
    fn add(&self, note: Note) -> Result<()>;

    /// Replaces the note matching `id` with the given value. Returns false
    /// and leaves storage untouched when the id is not found.
    fn update(&self, id: &str, note: Note) -> Result<bool>;

    /// Removes the note matching `id`, if any. Deleting a missing id is a
    /// silent no-op.
    fn delete(&self, id: &str) -> Result<()>;

    /// Lookup by exact id match.
    fn find_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// Removes the entire collection (deletes the key, not save-empty).
    /// The theme key is untouched.
    fn clear_all(&self) -> Result<()>;

    /// Returns the persisted theme, or the light default when absent or
    /// unreadable.
    fn get_theme(&self) -> Result<Theme>;

    /// Persists the theme value verbatim.
    fn set_theme(&self, theme: Theme) -> Result<()>;
}

/// File-per-key store rooted at a data directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`, creating the directory if
    /// needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            debug!("Data directory does not exist, creating: {}", data_dir.display());
            fs::create_dir_all(&data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                NotebookError::DirectoryError {
                    path: data_dir.clone(),
                }
            })?;
        }

        info!("FileStore rooted at {}", data_dir.display());
        Ok(Self { data_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }

    /// Reads the raw string stored under `key`, or None when the key is
    /// absent.
    fn read_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read key {} from {}: {}", key, path.display(), e);
                Err(NotebookError::Io(e))
            }
        }
    }

    /// Writes `value` under `key` atomically via a temp file in the same
    /// directory.
    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);

        let mut temp_file = NamedTempFile::new_in(&self.data_dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotebookError::Io(e)
        })?;

        temp_file.write_all(value.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NotebookError::Io(e)
        })?;

        temp_file.flush().map_err(NotebookError::Io)?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            NotebookError::Io(e.error)
        })?;

        debug!("Wrote key {} ({} bytes)", key, value.len());
        Ok(())
    }

    /// Removes the file backing `key`. Removing an absent key is a no-op.
    fn remove_key(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to remove key {}: {}", key, e);
                Err(NotebookError::Io(e))
            }
        }
    }
}

impl Store for FileStore {
    fn get_all(&self) -> Result<Vec<Note>> {
        let raw = match self.read_key(NOTES_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<NotesEnvelope>(&raw) {
            Ok(envelope) if envelope.schema == SCHEMA_VERSION => Ok(envelope.notes),
            Ok(envelope) => {
                warn!(
                    "Stored notes carry schema {} (expected {}), treating as empty",
                    envelope.schema, SCHEMA_VERSION
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("Stored notes are unparseable, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, notes: &[Note]) -> Result<()> {
        let envelope = NotesEnvelope {
            schema: SCHEMA_VERSION,
            notes: notes.to_vec(),
        };

        let json = serde_json::to_string_pretty(&envelope).map_err(|e| {
            error!("Failed to serialize notes: {}", e);
            NotebookError::Serialization(e)
        })?;

        self.write_key(NOTES_KEY, &json)
    }

    fn add(&self, note: Note) -> Result<()> {
        info!("Adding note: {}", note.id);
        let mut notes = self.get_all()?;
        notes.push(note);
        self.save_all(&notes)
    }

    fn update(&self, id: &str, note: Note) -> Result<bool> {
        let mut notes = self.get_all()?;

        match notes.iter_mut().find(|n| n.id == id) {
            Some(slot) => {
                *slot = note;
                self.save_all(&notes)?;
                debug!("Updated note: {}", id);
                Ok(true)
            }
            None => {
                debug!("Update skipped, note not found: {}", id);
                Ok(false)
            }
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut notes = self.get_all()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);

        if notes.len() == before {
            debug!("Delete was a no-op, note not found: {}", id);
        } else {
            info!("Deleted note: {}", id);
        }

        self.save_all(&notes)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        let notes = self.get_all()?;
        Ok(notes.into_iter().find(|n| n.id == id))
    }

    fn clear_all(&self) -> Result<()> {
        info!("Clearing all notes");
        self.remove_key(NOTES_KEY)
    }

    fn get_theme(&self) -> Result<Theme> {
        match self.read_key(THEME_KEY)? {
            Some(raw) => match Theme::parse(&raw) {
                Some(theme) => Ok(theme),
                None => {
                    warn!("Stored theme {:?} is unknown, falling back to light", raw);
                    Ok(Theme::Light)
                }
            },
            None => Ok(Theme::Light),
        }
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        debug!("Persisting theme: {}", theme);
        self.write_key(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        (dir, store)
    }

    fn note(title: &str) -> Note {
        Note::new(title, "content").unwrap()
    }

    #[test]
    fn get_all_on_fresh_store_is_empty() {
        let (_dir, store) = store();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn save_all_round_trips_field_by_field() {
        let (_dir, store) = store();
        let notes = vec![note("first"), note("second")];

        store.save_all(&notes).unwrap();
        assert_eq!(store.get_all().unwrap(), notes);
    }

    #[test]
    fn adds_preserve_insertion_order() {
        let (_dir, store) = store();
        let a = note("a");
        let b = note("b");
        let c = note("c");

        store.add(a.clone()).unwrap();
        store.add(b.clone()).unwrap();
        store.add(c.clone()).unwrap();
        store.delete(&b.id).unwrap();

        let ids: Vec<_> = store.get_all().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn delete_is_idempotent() {
        let (_dir, store) = store();
        let a = note("a");
        let b = note("b");

        store.add(a.clone()).unwrap();
        store.add(b).unwrap();
        store.delete(&a.id).unwrap();
        let once = store.get_all().unwrap();

        store.delete(&a.id).unwrap();
        assert_eq!(store.get_all().unwrap(), once);
    }

    #[test]
    fn update_missing_id_reports_false_and_changes_nothing() {
        let (_dir, store) = store();
        let existing = note("kept");
        store.add(existing.clone()).unwrap();

        let replacement = note("replacement");
        assert!(!store.update("no-such-id", replacement).unwrap());
        assert_eq!(store.get_all().unwrap(), vec![existing]);
    }

    #[test]
    fn update_replaces_matching_note_in_place() {
        let (_dir, store) = store();
        let a = note("a");
        let b = note("b");
        store.add(a.clone()).unwrap();
        store.add(b.clone()).unwrap();

        let mut toggled = a.clone();
        toggled.toggle_completed();
        assert!(store.update(&a.id, toggled.clone()).unwrap());

        let notes = store.get_all().unwrap();
        assert_eq!(notes, vec![toggled, b]);
    }

    #[test]
    fn find_by_id_matches_exactly() {
        let (_dir, store) = store();
        let a = note("a");
        store.add(a.clone()).unwrap();

        assert_eq!(store.find_by_id(&a.id).unwrap(), Some(a.clone()));
        assert_eq!(store.find_by_id("missing").unwrap(), None);
    }

    #[test]
    fn unparseable_stored_notes_degrade_to_empty() {
        let (_dir, store) = store();
        store.write_key(NOTES_KEY, "not json at all").unwrap();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn schema_mismatch_degrades_to_empty() {
        let (_dir, store) = store();
        store
            .write_key(NOTES_KEY, r#"{"schema": 99, "notes": []}"#)
            .unwrap();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn clear_all_removes_notes_but_keeps_theme() {
        let (_dir, store) = store();
        store.add(note("a")).unwrap();
        store.add(note("b")).unwrap();
        store.add(note("c")).unwrap();
        store.set_theme(Theme::Dark).unwrap();

        store.clear_all().unwrap();

        assert!(store.get_all().unwrap().is_empty());
        assert!(!store.key_path(NOTES_KEY).exists());
        assert_eq!(store.get_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn theme_defaults_to_light() {
        let (_dir, store) = store();
        assert_eq!(store.get_theme().unwrap(), Theme::Light);

        store.write_key(THEME_KEY, "sepia").unwrap();
        assert_eq!(store.get_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn theme_round_trips_as_literal_string() {
        let (_dir, store) = store();
        store.set_theme(Theme::Dark).unwrap();

        let raw = store.read_key(THEME_KEY).unwrap().unwrap();
        assert_eq!(raw, "dark");
        assert_eq!(store.get_theme().unwrap(), Theme::Dark);
    }
}

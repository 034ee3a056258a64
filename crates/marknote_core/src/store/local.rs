//! JSON note-list adapter over a key-value backend.

use super::{KeyValueBackend, StoreResult};
use crate::model::note::Note;
use log::{debug, warn};
use std::collections::HashSet;
use uuid::Uuid;

/// Single backend key holding the serialized note list.
pub const NOTES_KEY: &str = "notes";

/// Whole-list persistence contract used by the repository.
pub trait NoteStore {
    /// Reads the persisted list. Never fails; unusable data reads as empty.
    fn load(&self) -> Vec<Note>;
    /// Serializes and writes the full list.
    fn save(&mut self, notes: &[Note]) -> StoreResult<()>;
}

/// Stores the note list as a JSON array under [`NOTES_KEY`].
#[derive(Debug, Clone, Default)]
pub struct LocalNoteStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> LocalNoteStore<B> {
    /// Creates an adapter over `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrows the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrows the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the adapter and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: KeyValueBackend> NoteStore for LocalNoteStore<B> {
    fn load(&self) -> Vec<Note> {
        let raw = match self.backend.get_item(NOTES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=ok reason=absent count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=degraded error_code=backend_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(mut notes) => {
                reassign_duplicate_ids(&mut notes);
                debug!(
                    "event=store_load module=store status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                // Content is user text; log only position metadata.
                warn!(
                    "event=store_load module=store status=degraded error_code=parse_failed line={} column={}",
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let encoded = serde_json::to_string(notes)?;
        self.backend.set_item(NOTES_KEY, &encoded)?;
        debug!(
            "event=store_save module=store status=ok count={} bytes={}",
            notes.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Gives every note after the first holder of an id a fresh one.
fn reassign_duplicate_ids(notes: &mut [Note]) {
    let mut seen = HashSet::with_capacity(notes.len());
    let mut reassigned = 0usize;
    for note in notes.iter_mut() {
        while !seen.insert(note.id) {
            note.id = Uuid::new_v4();
            reassigned += 1;
        }
    }
    if reassigned > 0 {
        warn!(
            "event=store_load module=store status=degraded error_code=duplicate_ids reassigned={}",
            reassigned
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalNoteStore, NoteStore, NOTES_KEY};
    use crate::model::note::Note;
    use crate::store::{KeyValueBackend, MemoryBackend};

    fn store_with_raw(raw: &str) -> LocalNoteStore<MemoryBackend> {
        let mut backend = MemoryBackend::new();
        backend.set_item(NOTES_KEY, raw).unwrap();
        LocalNoteStore::new(backend)
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = LocalNoteStore::new(MemoryBackend::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn invalid_json_loads_empty() {
        assert!(store_with_raw("{not json").load().is_empty());
    }

    #[test]
    fn foreign_schema_loads_empty() {
        assert!(store_with_raw(r#"{"notes":[]}"#).load().is_empty());
        assert!(store_with_raw(r#"[{"name":"a"}]"#).load().is_empty());
        assert!(store_with_raw(r#"[1,2,3]"#).load().is_empty());
    }

    #[test]
    fn legacy_title_content_array_loads() {
        let notes = store_with_raw(r#"[{"title":"A","content":"x"},{"title":"B","content":""}]"#)
            .load();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "A");
        assert_eq!(notes[1].title, "B");
        assert_ne!(notes[0].id, notes[1].id);
    }

    #[test]
    fn repeated_ids_are_reassigned_on_load() {
        let id = "6f1c2f5e-1d2a-4c7b-9a53-0c8e4b1f2a77";
        let raw = format!(
            r#"[{{"id":"{id}","title":"A","content":""}},{{"id":"{id}","title":"B","content":""}},{{"id":"{id}","title":"C","content":""}}]"#
        );
        let notes = store_with_raw(&raw).load();

        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].id.to_string(), id);
        assert_ne!(notes[1].id, notes[0].id);
        assert_ne!(notes[2].id, notes[0].id);
        assert_ne!(notes[2].id, notes[1].id);
        assert_eq!(notes[1].title, "B");
    }

    #[test]
    fn save_writes_json_array_with_title_and_content() {
        let mut store = LocalNoteStore::new(MemoryBackend::new());
        let note = Note::new("Note 1", "");
        store.save(std::slice::from_ref(&note)).unwrap();

        let raw = store.backend().get_item(NOTES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Note 1");
        assert_eq!(items[0]["content"], "");
        assert_eq!(items[0]["id"], note.id.to_string());
    }
}

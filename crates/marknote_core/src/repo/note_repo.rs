//! Note repository: the authoritative in-memory note list.
//!
//! # Responsibility
//! - Own the ordered note list and the editor selection.
//! - Apply add/save/delete mutations and mirror each one to the store.
//!
//! # Invariants
//! - Every successful mutation is followed by one full-list `NoteStore::save`.
//! - Rejected operations (`EmptyNote`, `IndexOutOfRange`, `NotFound`) neither
//!   mutate the list nor touch the store.
//! - Memory is authoritative for the session: a failed store write does not
//!   roll back the in-memory mutation; it is reported as `Persistence`.
//! - The selection, when set, always names a note present in the list. Delete
//!   clears it before the store write.
//! - Updates are keyed by `NoteId`; notes sharing a title are independent.

use crate::model::note::{title_or_untitled, validate_draft, Note, NoteId, NoteValidationError};
use crate::selection::Selection;
use crate::store::{NoteStore, StoreError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note list operations.
#[derive(Debug)]
pub enum RepoError {
    /// Title and content were both blank.
    EmptyNote,
    /// Positional access outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// No note carries the given id.
    NotFound(NoteId),
    /// The in-memory mutation was applied but the store write failed.
    Persistence(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "note cannot be empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for list of {len}")
            }
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::EmptyNote | Self::IndexOutOfRange { .. } | Self::NotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        match value {
            NoteValidationError::Empty => Self::EmptyNote,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// Owner of the note list, the selection and the store adapter.
pub struct NoteRepository<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    selection: Selection,
}

impl<S: NoteStore> NoteRepository<S> {
    /// Creates an empty repository without reading the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: Vec::new(),
            selection: Selection::none(),
        }
    }

    /// Creates a repository hydrated from `store`.
    pub fn open(store: S) -> Self {
        let mut repo = Self::new(store);
        repo.load_notes();
        repo
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Unreadable store data hydrates as an empty list. The selection is
    /// cleared because previous ids may no longer exist.
    pub fn load_notes(&mut self) -> &[Note] {
        self.notes = self.store.load();
        self.selection.clear();
        info!(
            "event=notes_load module=repo status=ok count={}",
            self.notes.len()
        );
        &self.notes
    }

    /// Current note list in creation order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Gets one note by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Gets one note by list position.
    pub fn get_index(&self, index: usize) -> RepoResult<&Note> {
        let len = self.notes.len();
        self.notes
            .get(index)
            .ok_or(RepoError::IndexOutOfRange { index, len })
    }

    /// Returns the list position of `id`.
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Current selection value.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Selected note, if any.
    pub fn selected(&self) -> Option<&Note> {
        self.selection.get().and_then(|id| self.get(id))
    }

    /// Selects the note at `index`.
    pub fn select(&mut self, index: usize) -> RepoResult<&Note> {
        let id = self.get_index(index)?.id;
        self.selection.select(id);
        debug!("event=note_select module=repo status=ok index={index}");
        self.get_index(index)
    }

    /// Selects the note with `id`.
    pub fn select_id(&mut self, id: NoteId) -> RepoResult<&Note> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        self.select(index)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Appends `Note {count + 1}` with empty content and persists the list.
    ///
    /// # Errors
    /// - `Persistence` when the store write fails; the note stays in memory.
    pub fn add_note(&mut self) -> RepoResult<Note> {
        let note = Note::new(Note::numbered_title(self.notes.len() + 1), "");
        self.notes.push(note.clone());
        self.persist("note_add")?;
        Ok(note)
    }

    /// Removes the note at `index` and persists the list.
    ///
    /// Clears the selection when the removed note was selected.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing changes.
    /// - `Persistence` when the store write fails; the removal stands.
    pub fn delete_note(&mut self, index: usize) -> RepoResult<Note> {
        let len = self.notes.len();
        if index >= len {
            warn!(
                "event=note_delete module=repo status=rejected error_code=index_out_of_range index={} len={}",
                index, len
            );
            return Err(RepoError::IndexOutOfRange { index, len });
        }

        let removed = self.notes.remove(index);
        if self.selection.is_selected(removed.id) {
            self.selection.clear();
        }
        self.persist("note_delete")?;
        Ok(removed)
    }

    /// Removes the note with `id` and persists the list.
    pub fn delete_note_by_id(&mut self, id: NoteId) -> RepoResult<Note> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        self.delete_note(index)
    }

    /// Creates or updates a note from editor input and persists the list.
    ///
    /// - `selection = None`: appends a new note titled `title` (or `Untitled`
    ///   when `title` is empty).
    /// - `selection = Some(id)`: replaces title and content of that note only.
    ///
    /// Returns the resulting list.
    ///
    /// # Errors
    /// - `EmptyNote` when title and content are both blank; nothing changes.
    /// - `NotFound` when `selection` names a missing note; nothing changes.
    /// - `Persistence` when the store write fails; the change stays in memory.
    pub fn save_note(
        &mut self,
        title: &str,
        content: &str,
        selection: Option<NoteId>,
    ) -> RepoResult<Vec<Note>> {
        if let Err(err) = validate_draft(title, content) {
            warn!("event=note_save module=repo status=rejected error_code=empty_note");
            return Err(err.into());
        }

        match selection {
            None => {
                self.notes
                    .push(Note::new(title_or_untitled(title), content));
            }
            Some(id) => {
                let note = self
                    .notes
                    .iter_mut()
                    .find(|note| note.id == id)
                    .ok_or(RepoError::NotFound(id))?;
                note.title = title.to_string();
                note.content = content.to_string();
            }
        }

        self.persist("note_save")?;
        Ok(self.notes.clone())
    }

    /// Borrows the store adapter.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the store adapter.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn persist(&mut self, event: &'static str) -> RepoResult<()> {
        match self.store.save(&self.notes) {
            Ok(()) => {
                info!(
                    "event={} module=repo status=ok count={}",
                    event,
                    self.notes.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={} module=repo status=error error_code=persist_failed count={} error={}",
                    event,
                    self.notes.len(),
                    err
                );
                Err(RepoError::Persistence(err))
            }
        }
    }
}

//! Selection state for the note being edited.
//!
//! # Invariants
//! - Holds at most one `NoteId`.
//! - The repository clears it when the referenced note is deleted; callers
//!   never need to reconcile it themselves.

use crate::model::note::NoteId;

/// Reference to the note currently loaded into the editor, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<NoteId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn none() -> Self {
        Self::default()
    }

    /// Points the selection at `id`.
    pub fn select(&mut self, id: NoteId) {
        self.current = Some(id);
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Returns the selected note id.
    pub fn get(&self) -> Option<NoteId> {
        self.current
    }

    /// Returns whether `id` is the selected note.
    pub fn is_selected(&self, id: NoteId) -> bool {
        self.current == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use uuid::Uuid;

    #[test]
    fn select_then_clear() {
        let id = Uuid::new_v4();
        let mut selection = Selection::none();
        assert_eq!(selection.get(), None);

        selection.select(id);
        assert!(selection.is_selected(id));
        assert!(!selection.is_selected(Uuid::new_v4()));

        selection.clear();
        assert_eq!(selection, Selection::none());
    }
}

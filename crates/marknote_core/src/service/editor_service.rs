//! Editor session use-case service.
//!
//! # Responsibility
//! - Hold the transient draft (title/content) bound to the repository selection.
//! - Drive the `Idle -> Editing -> Saving -> Editing|Idle` state machine.
//! - Translate repository outcomes into user-facing notices.
//!
//! # Invariants
//! - The repository selection is the only record of which note is open; the
//!   session keeps no separate note copy beyond the draft and its baseline.
//! - Opening a note discards unsaved draft changes without confirmation.
//! - A rejected save (`EmptyNote`) leaves state, draft and repository untouched.
//! - A save whose store write fails still keeps the in-memory change and
//!   moves to `Editing`.

use crate::model::note::NoteId;
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use crate::service::preview::preview_heading;
use crate::store::NoteStore;
use log::debug;
use std::time::Duration;

/// How long a notice stays visible before presentation layers hide it.
pub const NOTICE_AUTO_HIDE: Duration = Duration::from_millis(3000);

pub const MSG_SAVED: &str = "Note saved successfully!";
pub const MSG_EMPTY: &str = "Note cannot be empty!";
pub const MSG_SAVE_FAILED: &str = "Failed to save note!";

/// Editor lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No note open, empty draft.
    Idle,
    /// Draft bound to the selected note.
    Editing,
    /// Save in flight. Only observable while `save` runs.
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Warning,
    Error,
}

/// Transient, auto-dismissing user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
    pub auto_hide: Duration,
}

impl Notice {
    fn new(severity: NoticeSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            auto_hide: NOTICE_AUTO_HIDE,
        }
    }
}

/// Draft editing session over a [`NoteRepository`].
#[derive(Debug, Clone)]
pub struct EditorSession {
    state: EditorState,
    title: String,
    content: String,
    baseline: (String, String),
    notice: Option<Notice>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Creates an idle session with an empty draft.
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
            title: String::new(),
            content: String::new(),
            baseline: (String::new(), String::new()),
            notice: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Whether the draft differs from the last opened or saved values.
    pub fn is_dirty(&self) -> bool {
        self.title != self.baseline.0 || self.content != self.baseline.1
    }

    /// Heading shown above the rendered preview.
    pub fn preview_heading(&self) -> &str {
        preview_heading(&self.title)
    }

    /// Current notice, if one is showing.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hides the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Selects the note at `index` and loads its stored values into the draft.
    pub fn open<S: NoteStore>(
        &mut self,
        repo: &mut NoteRepository<S>,
        index: usize,
    ) -> RepoResult<()> {
        let note = repo.select(index)?;
        let (title, content) = (note.title.clone(), note.content.clone());
        self.load_draft(title, content);
        debug!("event=editor_open module=editor status=ok index={index}");
        Ok(())
    }

    /// Selects the note with `id` and loads its stored values into the draft.
    pub fn open_id<S: NoteStore>(
        &mut self,
        repo: &mut NoteRepository<S>,
        id: NoteId,
    ) -> RepoResult<()> {
        let index = repo.position(id).ok_or(RepoError::NotFound(id))?;
        self.open(repo, index)
    }

    /// Clears the selection and returns to `Idle` with an empty draft.
    pub fn close<S: NoteStore>(&mut self, repo: &mut NoteRepository<S>) {
        repo.clear_selection();
        self.reset_idle();
    }

    /// Drops back to `Idle` when the repository no longer has a selection,
    /// e.g. after the open note was deleted.
    pub fn reconcile<S: NoteStore>(&mut self, repo: &NoteRepository<S>) {
        if self.state == EditorState::Editing && repo.selected().is_none() {
            self.reset_idle();
        }
    }

    /// Saves the draft through the repository.
    ///
    /// - Idle: creates a new note and selects it.
    /// - Editing: updates the selected note.
    ///
    /// A notice describing the outcome is set in every case. The repository
    /// error, if any, is returned unchanged.
    pub fn save<S: NoteStore>(&mut self, repo: &mut NoteRepository<S>) -> RepoResult<()> {
        self.reconcile(repo);
        let previous = self.state;
        // An Idle session has no note open, whatever the repository selected.
        let target = match previous {
            EditorState::Idle => None,
            EditorState::Editing | EditorState::Saving => repo.selection().get(),
        };
        self.state = EditorState::Saving;

        let result = repo
            .save_note(&self.title, &self.content, target)
            .map(|_| ());

        match &result {
            Ok(()) => {
                self.commit_saved(repo, target);
                self.notice = Some(Notice::new(NoticeSeverity::Success, MSG_SAVED));
            }
            Err(RepoError::Persistence(_)) => {
                self.commit_saved(repo, target);
                self.notice = Some(Notice::new(NoticeSeverity::Error, MSG_SAVE_FAILED));
            }
            Err(RepoError::EmptyNote) => {
                self.state = previous;
                self.notice = Some(Notice::new(NoticeSeverity::Warning, MSG_EMPTY));
            }
            Err(RepoError::NotFound(_) | RepoError::IndexOutOfRange { .. }) => {
                self.state = previous;
                self.notice = Some(Notice::new(NoticeSeverity::Error, MSG_SAVE_FAILED));
            }
        }

        debug!(
            "event=editor_save module=editor status={} state={:?}",
            if result.is_ok() { "ok" } else { "error" },
            self.state
        );
        result
    }

    fn commit_saved<S: NoteStore>(&mut self, repo: &mut NoteRepository<S>, target: Option<NoteId>) {
        if target.is_none() && !repo.is_empty() {
            // New notes are appended; keep editing the one just created.
            let last = repo.len() - 1;
            let _ = repo.select(last);
        }
        // Stored title may differ from the draft (`Untitled` fallback).
        if let Some(note) = repo.selected() {
            let (title, content) = (note.title.clone(), note.content.clone());
            self.load_draft(title, content);
        } else {
            self.reset_idle();
        }
    }

    fn load_draft(&mut self, title: String, content: String) {
        self.baseline = (title.clone(), content.clone());
        self.title = title;
        self.content = content;
        self.state = EditorState::Editing;
    }

    fn reset_idle(&mut self) {
        self.title.clear();
        self.content.clear();
        self.baseline = (String::new(), String::new());
        self.state = EditorState::Idle;
    }
}

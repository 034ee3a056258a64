//! Core domain logic for MarkNote.
//! This crate is the single source of truth for note list invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod selection;
pub mod service;
pub mod settings;
pub mod store;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult};
pub use selection::Selection;
pub use service::editor_service::{EditorSession, EditorState, Notice, NoticeSeverity};
pub use service::preview::{derive_markdown_preview, MarkdownPreview};
pub use settings::{AboutInfo, ThemeMode};
pub use store::{
    KeyValueBackend, LocalNoteStore, MemoryBackend, NoteStore, SqliteBackend, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

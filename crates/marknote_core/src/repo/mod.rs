//! Repository layer: ownership of the note list and its persistence.
//!
//! # Responsibility
//! - Keep the authoritative note list and selection in one owned value.
//! - Isolate store adapter details from editor orchestration.
//!
//! # Invariants
//! - Repository writes must enforce draft validation before mutation.
//! - Repository APIs return semantic errors (`NotFound`, `IndexOutOfRange`)
//!   in addition to persistence errors.

pub mod note_repo;

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into editor-level flows.
//! - Keep presentation layers decoupled from storage details.

pub mod editor_service;
pub mod preview;

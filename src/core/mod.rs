//! Core editor logic: documents, the workspace and their collaborators

pub mod clipboard;
pub mod config;
pub mod document;
pub mod error;
pub mod prompt;
pub mod workspace;

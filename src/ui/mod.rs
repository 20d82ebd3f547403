//! UI components

pub mod dialogs;
pub mod editor;

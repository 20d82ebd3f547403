//! User interaction seam used by documents and the workspace
//!
//! File pickers, the save/discard/cancel question and error reporting all go
//! through [`Prompter`], so the document lifecycle can run against native
//! dialogs in the app and against a scripted double in tests.

use std::path::{Path, PathBuf};

/// Answer to the "save your changes?" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Modal prompts shown to the user
pub trait Prompter {
    /// Ask for a file to open. `None` means the user cancelled.
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Ask for a destination to save to, starting from `suggested`.
    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf>;

    /// Ask whether modified content should be saved before it is dropped.
    fn ask_save_changes(&mut self, message: &str) -> SaveChoice;

    /// Tell the user an operation failed.
    fn report_error(&mut self, message: &str);
}

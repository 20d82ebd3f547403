//! Native dialogs backed by `rfd`

use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::core::prompt::{Prompter, SaveChoice};

const APP_TITLE: &str = "MDI Editor";

const SAVE_LABEL: &str = "Save";
const DISCARD_LABEL: &str = "Discard";
const CANCEL_LABEL: &str = "Cancel";

/// Blocking native file pickers and message boxes
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Prompter for NativeDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Open")
            .set_directory(".")
            .pick_file()
    }

    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title("Save As");
        match suggested.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dialog = dialog.set_directory(dir),
            None => dialog = dialog.set_directory("."),
        }
        if let Some(name) = suggested.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        dialog.save_file()
    }

    fn ask_save_changes(&mut self, message: &str) -> SaveChoice {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(APP_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::YesNoCancelCustom(
                SAVE_LABEL.to_string(),
                DISCARD_LABEL.to_string(),
                CANCEL_LABEL.to_string(),
            ))
            .show();

        save_choice(result)
    }

    fn report_error(&mut self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(APP_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Map the pressed button to a choice; closing the box counts as Cancel
fn save_choice(result: MessageDialogResult) -> SaveChoice {
    match result {
        MessageDialogResult::Custom(label) if label == SAVE_LABEL => SaveChoice::Save,
        MessageDialogResult::Custom(label) if label == DISCARD_LABEL => SaveChoice::Discard,
        // Some backends report custom buttons by position
        MessageDialogResult::Yes => SaveChoice::Save,
        MessageDialogResult::No => SaveChoice::Discard,
        _ => SaveChoice::Cancel,
    }
}

//! Document lifecycle: content, file path and dirty tracking

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::error::DocumentError;
use super::prompt::{Prompter, SaveChoice};

/// Identity of a document inside a workspace. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One plain text file and its save state
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    /// Text buffer shown by the editor widget
    content: String,
    /// Backing file, `None` while untitled
    file_path: Option<PathBuf>,
    /// Never saved to a concrete path
    untitled: bool,
    /// Content differs from what was last loaded or saved
    modified: bool,
    /// Name shown in the window title and the window menu
    display_name: String,
    /// Selected char range; empty means a plain caret
    selection: Range<usize>,
    /// Selection the widget must adopt on its next frame
    pending_cursor: Option<Range<usize>>,
}

impl Document {
    /// Create a blank, untitled document
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            content: String::new(),
            file_path: None,
            untitled: true,
            modified: false,
            display_name: "Untitled".to_string(),
            selection: 0..0,
            pending_cursor: None,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[cfg(test)]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Buffer handed to the text widget. Report edits through
    /// [`Document::document_changed`].
    pub fn text_buffer(&mut self) -> &mut String {
        &mut self.content
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[cfg(test)]
    pub fn is_untitled(&self) -> bool {
        self.untitled
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Window title, with a `*` marker while there are unsaved changes
    pub fn title(&self) -> String {
        if self.modified {
            format!("{}*", self.display_name)
        } else {
            self.display_name.clone()
        }
    }

    /// Reset to an empty, unmodified, untitled document
    pub fn new_file(&mut self, number: u32) {
        self.content.clear();
        self.file_path = None;
        self.untitled = true;
        self.modified = false;
        self.display_name = format!("document{}.txt", number);
        self.selection = 0..0;
        self.pending_cursor = Some(0..0);
        tracing::debug!("New document: {}", self.display_name);
    }

    /// Load a file into this document.
    ///
    /// Without a hint the user is asked to pick a file. Returns `false` if the
    /// user cancelled or the file could not be read; the document is left as
    /// it was in both cases.
    pub fn open(&mut self, path_hint: Option<&Path>, prompter: &mut dyn Prompter) -> bool {
        let path = match path_hint {
            Some(path) => path.to_path_buf(),
            None => match prompter.pick_open_path() {
                Some(path) => path,
                None => {
                    tracing::debug!("Open cancelled");
                    return false;
                }
            },
        };

        match Self::read_file(&path) {
            Ok(content) => {
                self.content = content;
                self.selection = 0..0;
                self.pending_cursor = Some(0..0);
                self.set_current_file(path);
                tracing::info!("Opened document: {}", self.display_name);
                true
            }
            Err(e) => {
                tracing::error!(path = %e.path().display(), "Failed to open document: {}", e);
                prompter.report_error(&e.to_string());
                false
            }
        }
    }

    /// Save to the backing file, or ask for one if the document is untitled
    pub fn save(&mut self, prompter: &mut dyn Prompter) -> bool {
        match self.file_path.clone() {
            Some(path) if !self.untitled => self.save_file(path, prompter),
            _ => self.save_as(prompter),
        }
    }

    /// Ask for a destination and save there
    pub fn save_as(&mut self, prompter: &mut dyn Prompter) -> bool {
        let suggested = self
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.display_name));

        match prompter.pick_save_path(&suggested) {
            Some(path) => self.save_file(path, prompter),
            None => {
                tracing::debug!("Save as cancelled for {}", self.display_name);
                false
            }
        }
    }

    /// Closing guard. Returns `true` if the document may be dropped.
    pub fn ok_to_continue(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !self.modified {
            return true;
        }

        let message = format!(
            "File {} has been modified.\nDo you want to save your changes?",
            self.display_name
        );
        match prompter.ask_save_changes(&message) {
            SaveChoice::Save => self.save(prompter),
            SaveChoice::Discard => {
                tracing::info!("Discarding changes to {}", self.display_name);
                true
            }
            SaveChoice::Cancel => false,
        }
    }

    /// The text widget changed the buffer
    pub fn document_changed(&mut self) {
        if !self.modified {
            tracing::debug!("{} modified", self.display_name);
        }
        self.modified = true;
        self.clamp_selection();
    }

    /// Replace the whole content, marking the document modified if it differs
    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.document_changed();
        }
    }

    /// The text widget moved its cursor or selection
    pub fn selection_changed(&mut self, range: Range<usize>) {
        self.selection = range;
        self.clamp_selection();
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn selected_text(&self) -> Option<&str> {
        if !self.has_selection() {
            return None;
        }
        let bytes = self.byte_range(self.selection.clone());
        Some(&self.content[bytes])
    }

    /// Selected text, for the clipboard
    pub fn copy(&self) -> Option<String> {
        self.selected_text().map(str::to_string)
    }

    /// Remove the selection and return it
    pub fn cut(&mut self) -> Option<String> {
        let text = self.copy()?;
        let start = self.selection.start;
        let bytes = self.byte_range(self.selection.clone());
        self.content.replace_range(bytes, "");
        self.move_cursor(start..start);
        self.document_changed();
        Some(text)
    }

    /// Replace the selection (or insert at the caret) with `text`
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() && !self.has_selection() {
            return;
        }
        let start = self.selection.start;
        let bytes = self.byte_range(self.selection.clone());
        self.content.replace_range(bytes, text);
        let caret = start + text.chars().count();
        self.move_cursor(caret..caret);
        self.document_changed();
    }

    /// Selection pushed by a cut or paste, to be applied to the widget once
    pub fn take_pending_cursor(&mut self) -> Option<Range<usize>> {
        self.pending_cursor.take()
    }

    fn save_file(&mut self, path: PathBuf, prompter: &mut dyn Prompter) -> bool {
        match self.write_file(&path) {
            Ok(()) => {
                self.set_current_file(path);
                tracing::info!("Saved document: {}", self.display_name);
                true
            }
            Err(e) => {
                tracing::error!(path = %e.path().display(), "Failed to save document: {}", e);
                prompter.report_error(&e.to_string());
                false
            }
        }
    }

    fn read_file(path: &Path) -> Result<String, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| DocumentError::Encoding {
            path: path.to_path_buf(),
        })
    }

    fn write_file(&self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, &self.content).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn set_current_file(&mut self, path: PathBuf) {
        self.display_name = stripped_name(&path);
        self.file_path = Some(path);
        self.untitled = false;
        self.modified = false;
    }

    fn move_cursor(&mut self, range: Range<usize>) {
        self.selection = range.clone();
        self.pending_cursor = Some(range);
    }

    fn clamp_selection(&mut self) {
        let len = self.content.chars().count();
        let start = self.selection.start.min(self.selection.end).min(len);
        let end = self.selection.start.max(self.selection.end).min(len);
        self.selection = start..end;
    }

    fn byte_range(&self, chars: Range<usize>) -> Range<usize> {
        byte_offset(&self.content, chars.start)..byte_offset(&self.content, chars.end)
    }
}

/// Byte offset of the `char_index`-th char, or the end of `text`
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// File name without its directory
fn stripped_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

//! Workspace: the set of open documents shown as sub-windows
//!
//! Owns every [`Document`], tracks which one has focus, forwards editing
//! commands to it and runs the close-all-or-cancel shutdown sequence.

use std::ops::Range;
use std::path::{Path, PathBuf};

use eframe::egui::{Pos2, Rect, Vec2};

use super::clipboard::Clipboard;
use super::document::{Document, DocumentId};
use super::prompt::Prompter;

/// Smallest size a laid out sub-window gets
const MIN_WINDOW_SIZE: Vec2 = Vec2::new(200.0, 120.0);

/// A document together with its frame inside the workspace area
#[derive(Debug)]
pub struct SubWindow {
    pub document: Document,
    /// Frame requested by the last layout
    rect: Rect,
    /// The UI still has to move the window to `rect`
    relayout: bool,
}

impl SubWindow {
    fn new(document: Document, rect: Rect) -> Self {
        Self {
            document,
            rect,
            relayout: true,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.document.id()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Frame to force on the window, once per layout
    pub fn take_relayout(&mut self) -> Option<Rect> {
        if std::mem::take(&mut self.relayout) {
            Some(self.rect)
        } else {
            None
        }
    }

    fn place(&mut self, rect: Rect) {
        self.rect = rect;
        self.relayout = true;
    }
}

/// Which menu and toolbar commands can run right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandAvailability {
    pub save: bool,
    pub save_as: bool,
    pub cut: bool,
    pub copy: bool,
    pub paste: bool,
    pub close: bool,
    pub close_all: bool,
    pub tile: bool,
    pub cascade: bool,
    pub next: bool,
    pub previous: bool,
}

/// Notifications raised by the text widget of a sub-window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ContentChanged(DocumentId),
    SelectionChanged(DocumentId, Range<usize>),
    Focused(DocumentId),
}

/// Where the workspace is in its own close sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownState {
    #[default]
    Running,
    ClosingChildren,
    Closed,
}

/// Result of asking the workspace to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// A document refused to close; the workspace stays open
    Vetoed,
    Closed,
}

/// All open documents and the focus among them
#[derive(Debug)]
pub struct Workspace {
    /// Sub-windows in creation order
    windows: Vec<SubWindow>,
    /// Focused document, looked up in `windows`
    active: Option<DocumentId>,
    /// Ids by most recent focus, last is newest
    activation_order: Vec<DocumentId>,
    /// Document the UI should raise and focus
    focus_request: Option<DocumentId>,
    availability: CommandAvailability,
    state: ShutdownState,
    /// Command line paths waiting for the deferred load
    startup_paths: Option<Vec<PathBuf>>,
    clipboard: Clipboard,
    /// Area the sub-windows are laid out in
    area: Rect,
    cascade_step: f32,
    next_id: u64,
    next_document_number: u32,
}

impl Workspace {
    pub fn new(clipboard: Clipboard, cascade_step: f32) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            activation_order: Vec::new(),
            focus_request: None,
            availability: CommandAvailability::default(),
            state: ShutdownState::Running,
            startup_paths: None,
            clipboard,
            area: Rect::from_min_size(Pos2::ZERO, Vec2::new(1024.0, 700.0)),
            cascade_step,
            next_id: 1,
            next_document_number: 1,
        }
    }

    pub fn windows(&self) -> &[SubWindow] {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut [SubWindow] {
        &mut self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.windows
            .iter()
            .find(|w| w.id() == id)
            .map(|w| &w.document)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.windows
            .iter_mut()
            .find(|w| w.id() == id)
            .map(|w| &mut w.document)
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|id| self.document(id))
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.active.and_then(|id| self.document_mut(id))
    }

    pub fn availability(&self) -> CommandAvailability {
        self.availability
    }

    pub fn state(&self) -> ShutdownState {
        self.state
    }

    /// Document the UI should bring to front, once
    pub fn take_focus_request(&mut self) -> Option<DocumentId> {
        self.focus_request.take()
    }

    /// Create an empty untitled document in a new sub-window
    pub fn create_new(&mut self) -> DocumentId {
        let mut document = Document::new(self.allocate_id());
        document.new_file(self.next_document_number);
        self.next_document_number += 1;
        self.insert(document)
    }

    /// Open `path` in a new sub-window.
    ///
    /// Returns `None` if the file could not be read.
    pub fn open_path(&mut self, path: &Path, prompter: &mut dyn Prompter) -> Option<DocumentId> {
        let mut document = Document::new(self.allocate_id());
        if !document.open(Some(path), prompter) {
            return None;
        }
        Some(self.insert(document))
    }

    /// Ask the user for a file and open it in a new sub-window
    pub fn open_interactive(&mut self, prompter: &mut dyn Prompter) -> Option<DocumentId> {
        let mut document = Document::new(self.allocate_id());
        if !document.open(None, prompter) {
            return None;
        }
        Some(self.insert(document))
    }

    /// Focus a sub-window and raise it
    pub fn activate(&mut self, id: DocumentId) -> bool {
        if !self.set_active(id) {
            return false;
        }
        self.focus_request = Some(id);
        true
    }

    /// Focus the next sub-window in creation order
    pub fn activate_next(&mut self) {
        self.activate_relative(1);
    }

    /// Focus the previous sub-window in creation order
    pub fn activate_previous(&mut self) {
        self.activate_relative(-1);
    }

    /// Close one sub-window, subject to its document's closing guard
    pub fn close_document(&mut self, id: DocumentId, prompter: &mut dyn Prompter) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.id() == id) else {
            return false;
        };
        if !self.windows[index].document.ok_to_continue(prompter) {
            tracing::debug!("Close of {} vetoed", self.windows[index].document.display_name());
            return false;
        }

        let window = self.windows.remove(index);
        tracing::info!("Closed document: {}", window.document.display_name());

        self.activation_order.retain(|&other| other != id);
        if self.active == Some(id) {
            self.active = None;
            if let Some(&next) = self.activation_order.last() {
                self.activate(next);
            }
        }
        self.update_command_availability();
        true
    }

    pub fn close_active(&mut self, prompter: &mut dyn Prompter) -> bool {
        match self.active {
            Some(id) => self.close_document(id, prompter),
            None => false,
        }
    }

    /// Ask every sub-window to close, in creation order.
    ///
    /// Windows that refuse stay open; returns `true` when none are left.
    pub fn close_all(&mut self, prompter: &mut dyn Prompter) -> bool {
        let ids: Vec<DocumentId> = self.windows.iter().map(SubWindow::id).collect();
        for id in ids {
            self.close_document(id, prompter);
        }
        self.windows.is_empty()
    }

    /// The main window was asked to close
    pub fn request_close(&mut self, prompter: &mut dyn Prompter) -> ShutdownOutcome {
        if self.state == ShutdownState::Closed {
            return ShutdownOutcome::Closed;
        }

        self.state = ShutdownState::ClosingChildren;
        tracing::debug!(state = ?self.state(), "Closing {} document(s)", self.len());
        if self.close_all(prompter) {
            self.state = ShutdownState::Closed;
            tracing::info!("All documents closed");
            ShutdownOutcome::Closed
        } else {
            self.state = ShutdownState::Running;
            tracing::info!("Close vetoed, {} document(s) still open", self.len());
            ShutdownOutcome::Vetoed
        }
    }

    pub fn save(&mut self, prompter: &mut dyn Prompter) -> bool {
        match self.active_document_mut() {
            Some(doc) => doc.save(prompter),
            None => false,
        }
    }

    pub fn save_as(&mut self, prompter: &mut dyn Prompter) -> bool {
        match self.active_document_mut() {
            Some(doc) => doc.save_as(prompter),
            None => false,
        }
    }

    pub fn cut(&mut self) -> bool {
        let Some(text) = self.active_document_mut().and_then(Document::cut) else {
            return false;
        };
        self.clipboard.set_text(&text);
        self.update_command_availability();
        true
    }

    pub fn copy(&mut self) -> bool {
        let Some(text) = self.active_document().and_then(Document::copy) else {
            return false;
        };
        self.clipboard.set_text(&text);
        true
    }

    pub fn paste(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        let Some(text) = self.clipboard.text() else {
            return false;
        };
        if let Some(doc) = self.active_document_mut() {
            doc.paste(&text);
        }
        self.update_command_availability();
        true
    }

    /// Apply a notification from a sub-window's text widget
    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::ContentChanged(id) => {
                if let Some(doc) = self.document_mut(id) {
                    doc.document_changed();
                }
            }
            EditorEvent::SelectionChanged(id, range) => {
                if let Some(doc) = self.document_mut(id) {
                    doc.selection_changed(range);
                }
                if self.active == Some(id) {
                    self.update_command_availability();
                }
            }
            EditorEvent::Focused(id) => {
                if self.active != Some(id) {
                    self.set_active(id);
                }
            }
        }
    }

    /// Re-derive command availability from the active document
    pub fn update_command_availability(&mut self) {
        let has_editor = self.active_document().is_some();
        let has_selection = self
            .active_document()
            .map(Document::has_selection)
            .unwrap_or(false);

        self.availability = CommandAvailability {
            save: has_editor,
            save_as: has_editor,
            cut: has_editor && has_selection,
            copy: has_editor && has_selection,
            paste: has_editor,
            close: has_editor,
            close_all: has_editor,
            tile: has_editor,
            cascade: has_editor,
            next: has_editor,
            previous: has_editor,
        };
    }

    /// Remember command line paths for the deferred startup load
    pub fn schedule_startup(&mut self, paths: Vec<PathBuf>) {
        self.startup_paths = Some(paths);
    }

    pub fn has_pending_startup(&self) -> bool {
        self.startup_paths.is_some()
    }

    /// Open the scheduled startup paths and cascade the result.
    ///
    /// Runs once; returns the number of documents opened.
    pub fn run_startup(&mut self, prompter: &mut dyn Prompter) -> usize {
        let Some(paths) = self.startup_paths.take() else {
            return 0;
        };
        if paths.is_empty() {
            return 0;
        }

        let opened = paths
            .iter()
            .filter(|path| self.open_path(path, prompter).is_some())
            .count();
        tracing::info!("Loaded {} of {} startup file(s)", opened, paths.len());
        self.cascade();
        opened
    }

    /// Area available to sub-windows, updated by the UI every frame
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Stack all sub-windows diagonally from the top-left corner
    pub fn cascade(&mut self) {
        let (area, step) = (self.area, self.cascade_step);
        for (index, window) in self.windows.iter_mut().enumerate() {
            window.place(cascade_rect(area, step, index));
        }
    }

    /// Arrange all sub-windows in a grid filling the area
    pub fn tile(&mut self) {
        let count = self.windows.len();
        if count == 0 {
            return;
        }

        let columns = (count as f32).sqrt().ceil() as usize;
        let rows = count.div_ceil(columns);
        let area = self.area;
        let cell = Vec2::new(area.width() / columns as f32, area.height() / rows as f32);

        for (index, window) in self.windows.iter_mut().enumerate() {
            let column = (index % columns) as f32;
            let row = (index / columns) as f32;
            let min = area.min + Vec2::new(column * cell.x, row * cell.y);
            window.place(Rect::from_min_size(min, cell));
        }
    }

    fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, document: Document) -> DocumentId {
        let id = document.id();
        let rect = cascade_rect(self.area, self.cascade_step, self.windows.len());
        self.windows.push(SubWindow::new(document, rect));
        self.activate(id);
        id
    }

    fn set_active(&mut self, id: DocumentId) -> bool {
        if self.document(id).is_none() {
            return false;
        }
        self.active = Some(id);
        self.activation_order.retain(|&other| other != id);
        self.activation_order.push(id);
        tracing::debug!("Activated document {}", id.raw());
        self.update_command_availability();
        true
    }

    fn activate_relative(&mut self, delta: isize) {
        let count = self.windows.len() as isize;
        if count == 0 {
            return;
        }
        let current = self
            .active
            .and_then(|id| self.windows.iter().position(|w| w.id() == id))
            .map(|i| i as isize)
            .unwrap_or(0);
        let next = (current + delta).rem_euclid(count) as usize;
        let id = self.windows[next].id();
        self.activate(id);
    }
}

/// Frame of the `index`-th window in a cascade over `area`.
///
/// Windows take 60% of the area and restart from the corner once the next
/// offset would push them past its edge.
fn cascade_rect(area: Rect, step: f32, index: usize) -> Rect {
    let step = step.max(1.0);
    let size = (area.size() * 0.6).max(MIN_WINDOW_SIZE);
    let free = area.size() - size;
    let per_cycle = (free.x.min(free.y) / step).floor().max(0.0) as usize + 1;
    let offset = (index % per_cycle) as f32 * step;
    Rect::from_min_size(area.min + Vec2::splat(offset), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::testing::ScriptedPrompter;
    use crate::core::prompt::SaveChoice;
    use tempfile::tempdir;

    fn workspace() -> Workspace {
        Workspace::new(Clipboard::internal(), 28.0)
    }

    fn assert_invariants(ws: &Workspace) {
        for window in ws.windows() {
            if window.document.is_untitled() {
                assert!(window.document.file_path().is_none());
            }
        }
        match ws.active_id() {
            Some(id) => assert!(ws.document(id).is_some()),
            None => assert!(ws.is_empty()),
        }
    }

    #[test]
    fn test_create_new_activates_and_numbers() {
        let mut ws = workspace();
        assert!(ws.active_id().is_none());
        assert_eq!(ws.availability(), CommandAvailability::default());

        let first = ws.create_new();
        let second = ws.create_new();

        assert_eq!(ws.len(), 2);
        assert_eq!(ws.active_id(), Some(second));
        assert_eq!(ws.document(first).unwrap().display_name(), "document1.txt");
        assert_eq!(ws.document(second).unwrap().display_name(), "document2.txt");
        assert_eq!(ws.take_focus_request(), Some(second));
        assert_eq!(ws.take_focus_request(), None);

        let availability = ws.availability();
        assert!(availability.save && availability.paste && availability.cascade);
        assert!(!availability.cut && !availability.copy);
        assert_invariants(&ws);
    }

    #[test]
    fn test_open_path_failure_inserts_nothing() {
        let dir = tempdir().unwrap();
        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new();

        assert!(ws.open_path(&dir.path().join("missing.txt"), &mut prompter).is_none());
        assert!(ws.is_empty());
        assert!(ws.active_id().is_none());
        assert_eq!(prompter.errors.len(), 1);
    }

    #[test]
    fn test_open_same_path_twice_gives_two_windows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "on disk").unwrap();

        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new();
        let first = ws.open_path(&path, &mut prompter).unwrap();
        ws.document_mut(first).unwrap().set_content("edited".to_string());

        let second = ws.open_path(&path, &mut prompter).unwrap();
        assert_ne!(first, second);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.active_id(), Some(second));
        assert_eq!(ws.document(first).unwrap().content(), "edited");
        assert_eq!(ws.document(second).unwrap().content(), "on disk");
        assert!(!ws.document(second).unwrap().is_modified());

        let mut picker = ScriptedPrompter::new().with_open_path(&path);
        let third = ws.open_interactive(&mut picker).unwrap();
        assert_eq!(ws.len(), 3);
        assert_eq!(ws.document(third).unwrap().content(), "on disk");
        assert_invariants(&ws);
    }

    #[test]
    fn test_startup_with_repeated_path_opens_each() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "a").unwrap();

        let mut ws = workspace();
        ws.schedule_startup(vec![path.clone(), path]);
        let mut prompter = ScriptedPrompter::new();
        assert_eq!(ws.run_startup(&mut prompter), 2);
        assert_eq!(ws.len(), 2);
    }

    #[test]
    fn test_open_interactive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("picked.txt");
        std::fs::write(&path, "picked").unwrap();

        let mut ws = workspace();
        let mut cancelled = ScriptedPrompter::new();
        assert!(ws.open_interactive(&mut cancelled).is_none());
        assert!(ws.is_empty());

        let mut prompter = ScriptedPrompter::new().with_open_path(&path);
        let id = ws.open_interactive(&mut prompter).unwrap();
        assert_eq!(ws.active_id(), Some(id));
        assert_eq!(ws.active_document().unwrap().content(), "picked");
        assert_invariants(&ws);
    }

    #[test]
    fn test_commands_without_active_document_are_noops() {
        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new();

        assert!(!ws.save(&mut prompter));
        assert!(!ws.save_as(&mut prompter));
        assert!(!ws.cut());
        assert!(!ws.copy());
        assert!(!ws.paste());
        assert!(!ws.close_active(&mut prompter));
        ws.activate_next();
        ws.tile();
        assert!(prompter.suggestions.is_empty());
    }

    #[test]
    fn test_save_forwards_to_active_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut ws = workspace();
        let first = ws.create_new();
        let second = ws.create_new();
        ws.handle(EditorEvent::Focused(first));
        ws.document_mut(first).unwrap().set_content("first".to_string());

        let mut prompter = ScriptedPrompter::new().with_save_path(&path);
        assert!(ws.save(&mut prompter));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
        assert!(ws.document(second).unwrap().is_untitled());
        assert!(!ws.document(first).unwrap().is_untitled());
    }

    #[test]
    fn test_selection_drives_cut_copy_availability() {
        let mut ws = workspace();
        let id = ws.create_new();
        ws.document_mut(id).unwrap().set_content("hello world".to_string());

        ws.handle(EditorEvent::SelectionChanged(id, 0..5));
        assert!(ws.availability().cut);
        assert!(ws.availability().copy);

        assert!(ws.copy());
        ws.handle(EditorEvent::SelectionChanged(id, 11..11));
        assert!(!ws.availability().copy);

        assert!(ws.paste());
        assert_eq!(ws.active_document().unwrap().content(), "hello worldhello");

        ws.handle(EditorEvent::SelectionChanged(id, 0..6));
        assert!(ws.cut());
        assert_eq!(ws.active_document().unwrap().content(), "worldhello");
        assert!(!ws.availability().cut);
    }

    #[test]
    fn test_content_changed_event_marks_modified() {
        let mut ws = workspace();
        let id = ws.create_new();
        ws.document_mut(id).unwrap().text_buffer().push_str("typed");
        ws.handle(EditorEvent::ContentChanged(id));
        assert!(ws.document(id).unwrap().is_modified());
    }

    #[test]
    fn test_next_previous_wrap_in_creation_order() {
        let mut ws = workspace();
        let a = ws.create_new();
        let b = ws.create_new();
        let c = ws.create_new();

        ws.activate_next();
        assert_eq!(ws.active_id(), Some(a));
        ws.activate_previous();
        assert_eq!(ws.active_id(), Some(c));
        ws.activate_previous();
        assert_eq!(ws.active_id(), Some(b));
    }

    #[test]
    fn test_closing_active_focuses_previously_active() {
        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new();
        let a = ws.create_new();
        let b = ws.create_new();
        let c = ws.create_new();
        ws.activate(a);
        ws.activate(c);

        assert!(ws.close_active(&mut prompter));
        assert_eq!(ws.active_id(), Some(a));
        assert!(ws.close_document(a, &mut prompter));
        assert_eq!(ws.active_id(), Some(b));
        assert!(ws.close_document(b, &mut prompter));
        assert!(ws.active_id().is_none());
        assert_eq!(ws.availability(), CommandAvailability::default());
    }

    #[test]
    fn test_close_modified_document_cancel_discard_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.txt");
        let mut ws = workspace();
        let id = ws.create_new();
        ws.document_mut(id).unwrap().set_content("dirty".to_string());

        let mut cancel = ScriptedPrompter::new().with_choice(SaveChoice::Cancel);
        assert!(!ws.close_document(id, &mut cancel));
        assert_eq!(ws.len(), 1);
        assert!(ws.document(id).unwrap().is_modified());

        let mut failed_save = ScriptedPrompter::new().with_choice(SaveChoice::Save);
        assert!(!ws.close_document(id, &mut failed_save));
        assert_eq!(ws.len(), 1);

        let mut save = ScriptedPrompter::new()
            .with_choice(SaveChoice::Save)
            .with_save_path(&path);
        assert!(ws.close_document(id, &mut save));
        assert!(ws.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dirty");

        let other = ws.create_new();
        ws.document_mut(other).unwrap().set_content("lost".to_string());
        let mut discard = ScriptedPrompter::new().with_choice(SaveChoice::Discard);
        assert!(ws.close_document(other, &mut discard));
        assert!(ws.is_empty());
        assert!(discard.suggestions.is_empty());
    }

    #[test]
    fn test_discard_leaves_file_on_disk_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kept.txt");
        std::fs::write(&path, "original").unwrap();

        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new().with_choice(SaveChoice::Discard);
        let id = ws.open_path(&path, &mut prompter).unwrap();
        ws.document_mut(id).unwrap().set_content("changed".to_string());
        assert!(ws.document(id).unwrap().is_modified());

        assert!(ws.close_document(id, &mut prompter));
        assert!(ws.is_empty());
        assert_eq!(prompter.questions.len(), 1);
        assert!(prompter.suggestions.is_empty());
        assert!(prompter.errors.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_request_close_vetoed_by_cancelled_document() {
        let mut ws = workspace();
        ws.create_new();
        let modified = ws.create_new();
        ws.create_new();
        ws.document_mut(modified)
            .unwrap()
            .set_content("unsaved".to_string());

        let mut prompter = ScriptedPrompter::new().with_choice(SaveChoice::Cancel);
        assert_eq!(ws.request_close(&mut prompter), ShutdownOutcome::Vetoed);
        assert_eq!(ws.state(), ShutdownState::Running);
        assert_eq!(ws.len(), 1);
        assert_eq!(ws.active_id(), Some(modified));
        assert_eq!(prompter.questions.len(), 1);
        assert_invariants(&ws);

        let mut discard = ScriptedPrompter::new().with_choice(SaveChoice::Discard);
        assert_eq!(ws.request_close(&mut discard), ShutdownOutcome::Closed);
        assert_eq!(ws.state(), ShutdownState::Closed);
        assert!(ws.is_empty());
    }

    #[test]
    fn test_close_all_keeps_running() {
        let mut ws = workspace();
        let mut prompter = ScriptedPrompter::new();
        ws.create_new();
        ws.create_new();

        assert!(ws.close_all(&mut prompter));
        assert!(ws.is_empty());
        assert_eq!(ws.state(), ShutdownState::Running);
        ws.create_new();
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn test_startup_opens_valid_paths_and_cascades() {
        let dir = tempdir().unwrap();
        let one = dir.path().join("one.txt");
        let two = dir.path().join("two.txt");
        std::fs::write(&one, "1").unwrap();
        std::fs::write(&two, "2").unwrap();

        let mut ws = workspace();
        ws.set_area(Rect::from_min_size(Pos2::new(0.0, 40.0), Vec2::new(1000.0, 600.0)));
        ws.schedule_startup(vec![one, dir.path().join("missing.txt"), two]);
        assert!(ws.has_pending_startup());
        assert!(ws.is_empty());

        let mut prompter = ScriptedPrompter::new();
        assert_eq!(ws.run_startup(&mut prompter), 2);
        assert!(!ws.has_pending_startup());
        assert_eq!(ws.len(), 2);
        assert_eq!(prompter.errors.len(), 1);

        let rects: Vec<Rect> = ws
            .windows_mut()
            .iter_mut()
            .filter_map(SubWindow::take_relayout)
            .collect();
        assert_eq!(rects[0].min, Pos2::new(0.0, 40.0));
        assert_eq!(rects[1].min, Pos2::new(28.0, 68.0));
        assert_eq!(rects[0].size(), rects[1].size());

        assert_eq!(ws.run_startup(&mut prompter), 0);
        assert_eq!(ws.len(), 2);
    }

    #[test]
    fn test_tile_fills_area() {
        let mut ws = workspace();
        ws.set_area(Rect::from_min_size(Pos2::ZERO, Vec2::new(900.0, 600.0)));
        for _ in 0..3 {
            ws.create_new();
        }
        ws.tile();

        let rects: Vec<Rect> = ws.windows().iter().map(SubWindow::rect).collect();
        assert_eq!(rects[0], Rect::from_min_size(Pos2::ZERO, Vec2::new(450.0, 300.0)));
        assert_eq!(rects[1].min, Pos2::new(450.0, 0.0));
        assert_eq!(rects[2].min, Pos2::new(0.0, 300.0));
    }

    #[test]
    fn test_cascade_wraps_inside_area() {
        let mut ws = workspace();
        ws.set_area(Rect::from_min_size(Pos2::ZERO, Vec2::new(500.0, 300.0)));
        for _ in 0..6 {
            ws.create_new();
        }
        ws.cascade();

        for window in ws.windows() {
            assert!(ws.area().contains_rect(window.rect()));
        }
        // 120px of free height fits four 28px steps before wrapping
        assert_eq!(ws.windows()[5].rect().min, Pos2::ZERO);
    }
}

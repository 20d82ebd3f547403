//! Main window: menus, toolbar, status bar and the sub-window area

use std::path::PathBuf;

use eframe::egui;

use crate::core::clipboard::Clipboard;
use crate::core::config::AppConfig;
use crate::core::document::DocumentId;
use crate::core::workspace::{ShutdownOutcome, Workspace};
use crate::ui::dialogs::NativeDialogs;
use crate::ui::editor::SubWindowView;

/// Commands reachable from the menus, toolbar and shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    Cut,
    Copy,
    Paste,
    Close,
    CloseAll,
    Tile,
    Cascade,
    Next,
    Previous,
    Activate(DocumentId),
    About,
}

/// Main application state
pub struct MdiEditorApp {
    /// Open documents and focus bookkeeping
    pub workspace: Workspace,
    /// Application configuration
    pub config: AppConfig,
    /// Native file pickers and message boxes
    dialogs: NativeDialogs,
    /// Whether the about box is visible
    show_about: bool,
    /// Frames rendered so far, used to defer the startup load
    frames_rendered: u64,
}

impl MdiEditorApp {
    /// Create the main window; `startup_paths` are opened after the first frame
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, startup_paths: Vec<PathBuf>) -> Self {
        let mut workspace = Workspace::new(Clipboard::system(), config.layout.cascade_step);
        workspace.schedule_startup(startup_paths);

        Self {
            workspace,
            config,
            dialogs: NativeDialogs,
            show_about: false,
            frames_rendered: 0,
        }
    }

    /// Run a command against the workspace
    fn execute(&mut self, ctx: &egui::Context, command: Command) {
        tracing::debug!("Command: {:?}", command);
        match command {
            Command::New => {
                self.workspace.create_new();
            }
            Command::Open => {
                self.workspace.open_interactive(&mut self.dialogs);
            }
            Command::Save => {
                self.workspace.save(&mut self.dialogs);
            }
            Command::SaveAs => {
                self.workspace.save_as(&mut self.dialogs);
            }
            Command::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::Cut => {
                self.workspace.cut();
            }
            Command::Copy => {
                self.workspace.copy();
            }
            Command::Paste => {
                self.workspace.paste();
            }
            Command::Close => {
                self.workspace.close_active(&mut self.dialogs);
            }
            Command::CloseAll => {
                self.workspace.close_all(&mut self.dialogs);
            }
            Command::Tile => self.workspace.tile(),
            Command::Cascade => self.workspace.cascade(),
            Command::Next => self.workspace.activate_next(),
            Command::Previous => self.workspace.activate_previous(),
            Command::Activate(id) => {
                self.workspace.activate(id);
            }
            Command::About => self.show_about = true,
        }
    }

    /// Keyboard shortcuts not handled by the text widget itself
    fn shortcut_command(ctx: &egui::Context) -> Option<Command> {
        use egui::{Key, KeyboardShortcut, Modifiers};

        let shift_command = Modifiers::COMMAND | Modifiers::SHIFT;
        let shortcuts = [
            (KeyboardShortcut::new(shift_command, Key::S), Command::SaveAs),
            (KeyboardShortcut::new(shift_command, Key::Tab), Command::Previous),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::N), Command::New),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::O), Command::Open),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::S), Command::Save),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::Q), Command::Exit),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::W), Command::Close),
            (KeyboardShortcut::new(Modifiers::COMMAND, Key::Tab), Command::Next),
        ];

        ctx.input_mut(|i| {
            shortcuts
                .iter()
                .find(|(shortcut, _)| i.consume_shortcut(shortcut))
                .map(|(_, command)| *command)
        })
    }

    /// Render the top menu bar
    fn render_menu_bar(&self, ctx: &egui::Context) -> Option<Command> {
        let availability = self.workspace.availability();
        let mut command = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let items = [
                        ("New", "Ctrl+N", true, Command::New),
                        ("Open...", "Ctrl+O", true, Command::Open),
                        ("Save", "Ctrl+S", availability.save, Command::Save),
                        ("Save As...", "Ctrl+Shift+S", availability.save_as, Command::SaveAs),
                    ];
                    menu_items(ui, &items, &mut command);
                    ui.separator();
                    menu_items(ui, &[("Exit", "Ctrl+Q", true, Command::Exit)], &mut command);
                });

                ui.menu_button("Edit", |ui| {
                    let items = [
                        ("Cut", "Ctrl+X", availability.cut, Command::Cut),
                        ("Copy", "Ctrl+C", availability.copy, Command::Copy),
                        ("Paste", "Ctrl+V", availability.paste, Command::Paste),
                    ];
                    menu_items(ui, &items, &mut command);
                });

                ui.menu_button("Window", |ui| {
                    let items = [
                        ("Close", "Ctrl+W", availability.close, Command::Close),
                        ("Close All", "", availability.close_all, Command::CloseAll),
                    ];
                    menu_items(ui, &items, &mut command);
                    ui.separator();
                    let items = [
                        ("Tile", "", availability.tile, Command::Tile),
                        ("Cascade", "", availability.cascade, Command::Cascade),
                    ];
                    menu_items(ui, &items, &mut command);
                    ui.separator();
                    let items = [
                        ("Next", "Ctrl+Tab", availability.next, Command::Next),
                        ("Previous", "Ctrl+Shift+Tab", availability.previous, Command::Previous),
                    ];
                    menu_items(ui, &items, &mut command);

                    if !self.workspace.is_empty() {
                        ui.separator();
                        let active = self.workspace.active_id();
                        for window in self.workspace.windows() {
                            let is_active = active == Some(window.id());
                            if ui
                                .selectable_label(is_active, window.document.display_name())
                                .clicked()
                            {
                                command = Some(Command::Activate(window.id()));
                                ui.close();
                            }
                        }
                    }
                });

                ui.menu_button("Help", |ui| {
                    menu_items(ui, &[("About", "", true, Command::About)], &mut command);
                });
            });
        });

        command
    }

    /// Render the file and edit toolbars
    fn render_toolbar(&self, ctx: &egui::Context) -> Option<Command> {
        let availability = self.workspace.availability();
        let mut command = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let file = [
                    ("New", true, Command::New),
                    ("Open", true, Command::Open),
                    ("Save", availability.save, Command::Save),
                ];
                let edit = [
                    ("Cut", availability.cut, Command::Cut),
                    ("Copy", availability.copy, Command::Copy),
                    ("Paste", availability.paste, Command::Paste),
                ];
                for (index, group) in [&file[..], &edit[..]].into_iter().enumerate() {
                    if index > 0 {
                        ui.separator();
                    }
                    for &(label, enabled, item) in group {
                        if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                            command = Some(item);
                        }
                    }
                }
            });
        });

        command
    }

    fn render_status_bar(ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label("Ready");
        });
    }

    fn render_about(&mut self, ctx: &egui::Context) {
        egui::Window::new("About MDI Editor")
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("MDI Editor 1.0");
                    ui.add_space(10.0);
                    ui.label("A small multi-document text editor.");
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    /// Render every sub-window and feed widget notifications back to the workspace
    fn render_sub_windows(&mut self, ctx: &egui::Context) {
        let area = self.workspace.area();
        let active = self.workspace.active_id();
        let mut events = Vec::new();
        let mut close_requests = Vec::new();

        if let Some(id) = self.workspace.take_focus_request() {
            if let Some(window) = self.workspace.windows().iter().find(|w| w.id() == id) {
                SubWindowView::focus(ctx, window);
            }
        }

        for window in self.workspace.windows_mut() {
            let is_active = active == Some(window.id());
            let response = SubWindowView::show(
                ctx,
                window,
                area,
                is_active,
                &self.config.editor,
                &mut events,
            );
            if response.close_requested {
                close_requests.push(window.id());
            }
        }

        for event in events {
            self.workspace.handle(event);
        }
        for id in close_requests {
            self.workspace.close_document(id, &mut self.dialogs);
        }
    }

    /// Open command line files once the window has been shown
    fn run_deferred_startup(&mut self, ctx: &egui::Context) {
        if !self.workspace.has_pending_startup() {
            return;
        }
        if self.frames_rendered == 0 {
            ctx.request_repaint();
            return;
        }
        self.workspace.run_startup(&mut self.dialogs);
        ctx.request_repaint();
    }

    /// Run the shutdown sequence when the main window is asked to close
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if self.workspace.request_close(&mut self.dialogs) == ShutdownOutcome::Vetoed {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }
}

/// Add enabled-aware menu entries, recording the clicked one
fn menu_items(ui: &mut egui::Ui, items: &[(&str, &str, bool, Command)], command: &mut Option<Command>) {
    for &(label, shortcut, enabled, item) in items {
        let button = egui::Button::new(label).shortcut_text(shortcut);
        if ui.add_enabled(enabled, button).clicked() {
            *command = Some(item);
            ui.close();
        }
    }
}

impl eframe::App for MdiEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = Vec::new();
        commands.extend(Self::shortcut_command(ctx));
        commands.extend(self.render_menu_bar(ctx));
        commands.extend(self.render_toolbar(ctx));
        Self::render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.workspace.set_area(ui.max_rect());
        });

        self.render_sub_windows(ctx);

        if self.show_about {
            self.render_about(ctx);
        }

        for command in commands {
            self.execute(ctx, command);
        }

        self.run_deferred_startup(ctx);
        self.handle_close_request(ctx);
        self.frames_rendered += 1;
    }
}

//! Document sub-windows

use eframe::egui;

use crate::core::config::EditorConfig;
use crate::core::workspace::{EditorEvent, SubWindow};

/// What happened to a sub-window during one frame
#[derive(Debug, Default)]
pub struct SubWindowResponse {
    /// The window's close button was pressed
    pub close_requested: bool,
}

/// Floating editor window for one document
pub struct SubWindowView;

impl SubWindowView {
    /// Id of the window area, also its layer id
    pub fn window_id(window: &SubWindow) -> egui::Id {
        egui::Id::new(("sub_window", window.id().raw()))
    }

    fn text_id(window: &SubWindow) -> egui::Id {
        Self::window_id(window).with("text")
    }

    /// Raise the window and put the keyboard focus in its text
    pub fn focus(ctx: &egui::Context, window: &SubWindow) {
        ctx.move_to_top(egui::LayerId::new(
            egui::Order::Middle,
            Self::window_id(window),
        ));
        let text_id = Self::text_id(window);
        ctx.memory_mut(|mem| mem.request_focus(text_id));
    }

    /// Show the sub-window inside `area`, pushing widget notifications to `events`
    pub fn show(
        ctx: &egui::Context,
        window: &mut SubWindow,
        area: egui::Rect,
        active: bool,
        config: &EditorConfig,
        events: &mut Vec<EditorEvent>,
    ) -> SubWindowResponse {
        let id = window.id();
        let window_id = Self::window_id(window);
        let text_id = Self::text_id(window);
        let title = window.document.title();
        let relayout = window.take_relayout();

        let mut frame = egui::Frame::window(&ctx.style());
        if active {
            frame = frame.stroke(egui::Stroke::new(
                2.0,
                ctx.style().visuals.selection.bg_fill,
            ));
        }

        let mut open = true;
        let mut egui_window = egui::Window::new(title)
            .id(window_id)
            .open(&mut open)
            .frame(frame)
            .constrain_to(area)
            .collapsible(true)
            .resizable(true)
            .default_rect(window.rect());
        if let Some(rect) = relayout {
            egui_window = egui_window.current_pos(rect.min).fixed_size(rect.size());
        }

        let shown = egui_window.show(ctx, |ui| {
            if let Some(range) = window.document.take_pending_cursor() {
                if let Some(mut state) = egui::TextEdit::load_state(ctx, text_id) {
                    state.cursor.set_char_range(Some(egui::text::CCursorRange::two(
                        egui::text::CCursor::new(range.start),
                        egui::text::CCursor::new(range.end),
                    )));
                    state.store(ctx, text_id);
                }
            }

            egui::ScrollArea::both()
                .id_salt(window_id.with("scroll"))
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::TextEdit::multiline(window.document.text_buffer())
                        .id(text_id)
                        .font(egui::FontId::monospace(config.font_size))
                        .desired_width(f32::INFINITY)
                        .desired_rows(config.desired_rows)
                        .lock_focus(true)
                        .show(ui)
                })
                .inner
        });

        if let Some(shown) = shown {
            let clicked = shown.response.contains_pointer()
                && ctx.input(|i| i.pointer.any_pressed());
            if let Some(output) = shown.inner {
                if clicked || output.response.gained_focus() {
                    events.push(EditorEvent::Focused(id));
                }
                if output.response.changed() {
                    events.push(EditorEvent::ContentChanged(id));
                }
                if let Some(range) = output.state.cursor.char_range() {
                    let (a, b) = (range.primary.index, range.secondary.index);
                    let selection = a.min(b)..a.max(b);
                    if selection != window.document.selection() {
                        events.push(EditorEvent::SelectionChanged(id, selection));
                    }
                }
            } else if clicked {
                events.push(EditorEvent::Focused(id));
            }
        }

        SubWindowResponse {
            close_requested: !open,
        }
    }
}

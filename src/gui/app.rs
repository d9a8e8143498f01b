//! The editor window and application entry point.

use eframe::egui;

use super::viewer;
use crate::canvas::CanvasStyle;
use crate::config::Config;
use crate::session::Session;
use crate::theme;
use crate::{Error, Result};

/// Open the editor window and run the event loop until it closes.
///
/// `initial_text` seeds the editor buffer (empty for a fresh scratchpad).
pub fn run(initial_text: String, config: &Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("dotpad")
            .with_inner_size([theme::window::WIDTH, theme::window::HEIGHT]),
        ..Default::default()
    };
    let session = Session::new(config.layout_config());
    let style = config.canvas_style();
    tracing::debug!("starting editor window");
    eframe::run_native(
        "dotpad",
        options,
        Box::new(move |_cc| Ok(Box::new(EditorApp::new(initial_text, session, style)))),
    )
    .map_err(|e| Error::Gui(e.to_string()))
}

struct EditorApp {
    text: String,
    session: Session,
    style: CanvasStyle,
}

impl EditorApp {
    fn new(text: String, session: Session, style: CanvasStyle) -> Self {
        Self {
            text,
            session,
            style,
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut render_requested =
            ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Render").clicked() {
                    render_requested = true;
                }
                ui.label(egui::RichText::new("Ctrl+Enter renders the buffer").weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(&mut self.text)
                        .code_editor()
                        .hint_text("digraph { a -> b }"),
                );
            });
        });

        if render_requested {
            // A rejected parse leaves the previous view untouched; the
            // editor shows no error for it.
            self.session.render_text(&self.text);
        }

        viewer::show(ctx, &mut self.session, &self.style);
    }
}

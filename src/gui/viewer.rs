//! The graph view: a second window with a scrollable canvas sized to the
//! layout's bounding box.

use eframe::egui;

use crate::canvas::{self, CanvasStyle, PainterSurface};
use crate::session::Session;

/// Largest size the view window opens at; the canvas itself scrolls.
const MAX_INITIAL_SIZE: egui::Vec2 = egui::vec2(960.0, 720.0);
const MIN_INITIAL_SIZE: egui::Vec2 = egui::vec2(240.0, 180.0);

/// Show the graph view window if the session has one open. Created
/// lazily on the first successful render; closing it releases the
/// layout via [`Session::close_view`].
pub(super) fn show(ctx: &egui::Context, session: &mut Session, style: &CanvasStyle) {
    if !session.view_open() {
        return;
    }
    let Some(graph) = session.graph() else {
        return;
    };

    let canvas_size = egui::vec2(graph.width as f32, graph.height as f32);
    let mut close_requested = false;
    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("graph-view"),
        egui::ViewportBuilder::default()
            .with_title("Graph")
            .with_inner_size(canvas_size.clamp(MIN_INITIAL_SIZE, MAX_INITIAL_SIZE)),
        |ctx, _class| {
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    // The canvas allocation matches the bounding box, so
                    // nothing is ever clipped away permanently.
                    let (response, painter) =
                        ui.allocate_painter(canvas_size, egui::Sense::hover());
                    let mut surface = PainterSurface::new(
                        &painter,
                        response.rect,
                        style.line_width as f32,
                    );
                    canvas::render(&mut surface, graph, style);
                });
            });
            if ctx.input(|i| i.viewport().close_requested()) {
                close_requested = true;
            }
        },
    );

    if close_requested {
        session.close_view();
    }
}

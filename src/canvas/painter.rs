//! Surface backend that executes onto an `egui` painter.

use eframe::egui;
use eframe::egui::epaint::{CubicBezierShape, StrokeKind};

use super::Surface;
use crate::geometry::{Point, Rect};
use crate::theme::Color;

/// Draws surface commands onto an `egui::Painter` inside a canvas
/// rectangle. Surface coordinates map 1:1 onto points offset from the
/// rectangle's top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    frame: egui::Rect,
    stroke: egui::Stroke,
    pen: egui::Pos2,
    pending: Vec<CubicBezierShape>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, frame: egui::Rect, line_width: f32) -> Self {
        Self {
            painter,
            frame,
            stroke: egui::Stroke::new(line_width, egui::Color32::BLACK),
            pen: frame.min,
            pending: Vec::new(),
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        egui::pos2(
            self.frame.min.x + p.x as f32,
            self.frame.min.y + p.y as f32,
        )
    }
}

fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl Surface for PainterSurface<'_> {
    fn paint_background(&mut self, color: Color) {
        self.painter
            .rect_filled(self.frame, egui::CornerRadius::ZERO, color32(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke.color = color32(color);
    }

    fn move_to(&mut self, p: Point) {
        self.pen = self.to_screen(p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        let end = self.to_screen(end);
        self.pending.push(CubicBezierShape::from_points_stroke(
            [self.pen, self.to_screen(c1), self.to_screen(c2), end],
            false,
            egui::Color32::TRANSPARENT,
            self.stroke,
        ));
        self.pen = end;
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let min = self.to_screen(Point::new(rect.x, rect.y));
        let size = egui::vec2(rect.width as f32, rect.height as f32);
        self.painter.rect_stroke(
            egui::Rect::from_min_size(min, size),
            egui::CornerRadius::ZERO,
            self.stroke,
            StrokeKind::Middle,
        );
    }

    fn stroke_path(&mut self) {
        for segment in self.pending.drain(..) {
            self.painter.add(segment);
        }
    }
}

//! A surface that records the command stream instead of drawing.

use super::Surface;
use crate::geometry::{Point, Rect};
use crate::theme::Color;

/// One recorded drawing command, mirroring the [`Surface`] methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    PaintBackground(Color),
    SetStrokeColor(Color),
    MoveTo(Point),
    CurveTo(Point, Point, Point),
    StrokeRect(Rect),
    StrokePath,
}

/// Captures everything the renderer asks a surface to do, in order.
/// Used by tests and anywhere a replayable command list beats pixels.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<SurfaceCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<SurfaceCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandRecorder {
    fn paint_background(&mut self, color: Color) {
        self.commands.push(SurfaceCommand::PaintBackground(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(SurfaceCommand::SetStrokeColor(color));
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(SurfaceCommand::MoveTo(p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.commands.push(SurfaceCommand::CurveTo(c1, c2, end));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(SurfaceCommand::StrokeRect(rect));
    }

    fn stroke_path(&mut self) {
        self.commands.push(SurfaceCommand::StrokePath);
    }
}

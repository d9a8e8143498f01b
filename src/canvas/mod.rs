//! Layout-to-canvas rendering.
//!
//! Layout space is Y-up; drawing surfaces are Y-down with the origin at
//! the top-left. [`render`] walks a [`LaidOutGraph`] and issues stroke
//! commands against a [`Surface`], applying the [`flip_y`] transform to
//! every node box and every spline control point on the way through.
//!
//! Surfaces are pluggable: [`CommandRecorder`] captures the command
//! stream, [`SvgSurface`] writes an SVG document, and `PainterSurface`
//! (with the `gui` feature) executes onto an `egui` painter.

mod recorder;
mod svg;

#[cfg(feature = "gui")]
mod painter;

pub use recorder::{CommandRecorder, SurfaceCommand};
pub use svg::SvgSurface;

#[cfg(feature = "gui")]
pub use painter::PainterSurface;

use crate::geometry::{Point, Rect};
use crate::layout::{LaidOutGraph, LayoutNode, SplinePiece};
use crate::theme::{self, Color};

/// The drawing-surface contract the renderer paints against.
///
/// All coordinates handed to a surface are already in surface space
/// (Y-down, origin top-left).
pub trait Surface {
    /// Fill the whole surface with one color.
    fn paint_background(&mut self, color: Color);
    /// Color for all strokes that follow.
    fn set_stroke_color(&mut self, color: Color);
    /// Start a new path at `p`.
    fn move_to(&mut self, p: Point);
    /// Extend the current path with a cubic Bezier segment to `end`.
    fn curve_to(&mut self, c1: Point, c2: Point, end: Point);
    /// Stroke a rectangle outline immediately.
    fn stroke_rect(&mut self, rect: Rect);
    /// Stroke the path assembled since the last `move_to`.
    fn stroke_path(&mut self);
}

/// Canvas colors and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasStyle {
    pub background: Color,
    pub stroke: Color,
    pub line_width: f64,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background: theme::canvas::BACKGROUND,
            stroke: theme::canvas::STROKE,
            line_width: theme::canvas::LINE_WIDTH,
        }
    }
}

/// Map a layout-space point onto the surface. The flip is its own
/// inverse for a fixed graph height.
pub fn flip_y(p: Point, graph_height: f64) -> Point {
    Point::new(p.x, graph_height - p.y)
}

/// A node's box in surface space: the center/half-width form becomes a
/// top-left anchored rectangle.
pub fn node_frame(node: &LayoutNode, graph_height: f64) -> Rect {
    Rect::new(
        node.center.x - node.left_width,
        graph_height - node.center.y - node.height / 2.0,
        node.left_width + node.right_width,
        node.height,
    )
}

/// Paint a laid-out graph onto a surface: background first, then a
/// stroked rectangle per node and one stroked path per spline piece.
///
/// A graph with no nodes paints only the background.
pub fn render(surface: &mut dyn Surface, graph: &LaidOutGraph, style: &CanvasStyle) {
    surface.paint_background(style.background);
    if graph.nodes.is_empty() {
        return;
    }
    surface.set_stroke_color(style.stroke);
    for node in &graph.nodes {
        surface.stroke_rect(node_frame(node, graph.height));
        for edge in &node.edges {
            for piece in &edge.splines {
                draw_piece(surface, piece, graph.height);
            }
        }
    }
}

/// One `move_to` at the first control point, then a `curve_to` per group
/// of three. A trailing partial group is ignored, never drawn.
fn draw_piece(surface: &mut dyn Surface, piece: &SplinePiece, graph_height: f64) {
    let Some(first) = piece.points.first() else {
        return;
    };
    surface.move_to(flip_y(*first, graph_height));
    for triple in piece.points[1..].chunks_exact(3) {
        surface.curve_to(
            flip_y(triple[0], graph_height),
            flip_y(triple[1], graph_height),
            flip_y(triple[2], graph_height),
        );
    }
    surface.stroke_path();
}

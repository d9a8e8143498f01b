//! SVG surface backend: the headless `render` command draws here.

use super::Surface;
use crate::geometry::{Point, Rect};
use crate::theme::Color;

/// Streams drawing commands into an SVG document body; [`finish`]
/// wraps it into a complete `<svg>` element.
///
/// [`finish`]: SvgSurface::finish
pub struct SvgSurface {
    width: f64,
    height: f64,
    line_width: f64,
    stroke: Color,
    body: String,
    path: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, line_width: f64) -> Self {
        Self {
            width,
            height,
            line_width,
            stroke: Color::BLACK,
            body: String::new(),
            path: String::new(),
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.2} {:.2}\">\n{}</svg>\n",
            self.width.ceil(),
            self.height.ceil(),
            self.width,
            self.height,
            self.body,
        )
    }
}

impl Surface for SvgSurface {
    fn paint_background(&mut self, color: Color) {
        self.body.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
            self.width,
            self.height,
            color.hex(),
        ));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn move_to(&mut self, p: Point) {
        self.path = format!("M {:.2} {:.2}", p.x, p.y);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.path.push_str(&format!(
            " C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            c1.x, c1.y, c2.x, c2.y, end.x, end.y,
        ));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.body.push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.stroke.hex(),
            self.line_width,
        ));
    }

    fn stroke_path(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            self.path,
            self.stroke.hex(),
            self.line_width,
        ));
        self.path.clear();
    }
}

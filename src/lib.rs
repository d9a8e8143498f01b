//! Dotpad - a desktop scratchpad for DOT graphs.
//!
//! This library backs the `dotpad` binary: a small DOT parser, a layered
//! graph layout engine, and a canvas renderer that paints the result into
//! any [`canvas::Surface`]. The GUI (an editor window plus a lazily-opened
//! graph view) lives behind the `gui` feature; the parse, layout, and
//! render stages are plain synchronous code usable headlessly.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod dot;
pub mod geometry;
pub mod gui;
pub mod layout;
pub mod session;
pub mod theme;

/// Errors surfaced by the library and CLI.
///
/// DOT parse failures inside the GUI are deliberately *not* routed through
/// here; the editor treats them as a silent no-op. Everything else
/// propagates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Parse(#[from] dot::DotError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("gui error: {0}")]
    Gui(String),

    #[error("this build has no gui support (rebuild with the 'gui' feature)")]
    GuiUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;

//! Session state: the one current layout and the view that shows it.
//!
//! The session is plain owned data driven by discrete UI events on a
//! single thread. It owns the current graph outright and releases a
//! layout by dropping it, so no exit path can leak one.

use crate::dot::{self, DotError};
use crate::layout::{LaidOutGraph, LayoutConfig, LayoutEngine};

/// What a render request did to the session.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The text parsed; the session now holds its layout.
    Rendered,
    /// The parser rejected the text; nothing changed.
    Rejected(DotError),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered)
    }
}

/// Owns the current [`LaidOutGraph`] and the open/closed state of the
/// graph view. Exactly one layout is live at a time; at most one view.
#[derive(Debug, Default)]
pub struct Session {
    engine: LayoutEngine,
    graph: Option<LaidOutGraph>,
    view_open: bool,
}

impl Session {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            engine: LayoutEngine::new(config),
            graph: None,
            view_open: false,
        }
    }

    /// Parse and lay out `text`, read start to end.
    ///
    /// On success the previous layout is released before the new one is
    /// computed, and the view is marked open. On failure every piece of
    /// session state stays exactly as it was: a no-op, not an error.
    pub fn render_text(&mut self, text: &str) -> RenderOutcome {
        let parsed = match dot::parse(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!("render rejected: {err}");
                return RenderOutcome::Rejected(err);
            }
        };
        // Release the old layout first, then compute the replacement.
        self.graph = None;
        self.graph = Some(self.engine.layout(&parsed));
        self.view_open = true;
        RenderOutcome::Rendered
    }

    /// The current layout, if any.
    pub fn graph(&self) -> Option<&LaidOutGraph> {
        self.graph.as_ref()
    }

    /// Whether the graph view should be showing.
    pub fn view_open(&self) -> bool {
        self.view_open && self.graph.is_some()
    }

    /// Close the view: the layout is released and the view flag cleared.
    /// The next successful render opens a fresh view.
    pub fn close_view(&mut self) {
        self.graph = None;
        self.view_open = false;
        tracing::debug!("view closed, layout released");
    }
}

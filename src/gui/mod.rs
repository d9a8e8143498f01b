//! Desktop shell: a DOT editor window and a lazily-created graph view.
//!
//! Built on `eframe`/`egui`. Parsing and layout run synchronously on the
//! UI thread in response to discrete events, which is acceptable for the
//! document sizes a scratchpad sees.

#[cfg(feature = "gui")]
mod app;
#[cfg(feature = "gui")]
mod viewer;

#[cfg(feature = "gui")]
pub use app::run;

/// Stub used when the binary is built without the `gui` feature.
#[cfg(not(feature = "gui"))]
pub fn run(_initial_text: String, _config: &crate::config::Config) -> crate::Result<()> {
    Err(crate::Error::GuiUnavailable)
}

//! Configuration: user preferences for layout spacing and canvas colors.
//!
//! Preferences live in TOML at `~/.config/dotpad/config.toml` (the
//! platform config dir elsewhere). Every field is optional and a missing
//! file simply means defaults:
//!
//! ```toml
//! [layout]
//! ranksep = 36.0
//! nodesep = 18.0
//! margin = 8.0
//!
//! [canvas]
//! background = "#ffffff"
//! stroke = "#000000"
//! line_width = 1.0
//! ```
//!
//! Unlike a DOT document typed into the editor, the config file is
//! trusted user input: malformed TOML or an invalid color is a real
//! error, reported rather than ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::canvas::CanvasStyle;
use crate::layout::LayoutConfig;
use crate::theme::Color;
use crate::{Error, Result};

/// On-disk schema. Unset fields fall back to their defaults when the
/// config is turned into a [`LayoutConfig`] or [`CanvasStyle`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub canvas: CanvasSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayoutSection {
    pub ranksep: Option<f64>,
    pub nodesep: Option<f64>,
    pub margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CanvasSection {
    pub background: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: Option<f64>,
}

impl Config {
    /// `<config dir>/dotpad/config.toml`, when a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dotpad").join("config.toml"))
    }

    /// Load the config file.
    ///
    /// With an explicit `path` the file must exist and parse. Without
    /// one, the default location is tried and a missing file yields
    /// `Config::default()`.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::read(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let non_negative = [
            ("layout.ranksep", self.layout.ranksep),
            ("layout.nodesep", self.layout.nodesep),
            ("layout.margin", self.layout.margin),
            ("canvas.line_width", self.canvas.line_width),
        ];
        for (name, value) in non_negative {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Config(format!(
                        "{name} must be a non-negative number, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Layout parameters with defaults filled in.
    pub fn layout_config(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        LayoutConfig {
            ranksep: self.layout.ranksep.unwrap_or(defaults.ranksep),
            nodesep: self.layout.nodesep.unwrap_or(defaults.nodesep),
            margin: self.layout.margin.unwrap_or(defaults.margin),
        }
    }

    /// Canvas style with defaults filled in.
    pub fn canvas_style(&self) -> CanvasStyle {
        let defaults = CanvasStyle::default();
        CanvasStyle {
            background: self.canvas.background.unwrap_or(defaults.background),
            stroke: self.canvas.stroke.unwrap_or(defaults.stroke),
            line_width: self.canvas.line_width.unwrap_or(defaults.line_width),
        }
    }
}

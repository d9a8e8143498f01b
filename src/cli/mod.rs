//! CLI argument definitions for dotpad.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shown by `--version`: package version plus the commit and timestamp
/// recorded by the build script.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DOTPAD_GIT_COMMIT"),
    ", built ",
    env!("DOTPAD_BUILD_TIMESTAMP"),
    ")"
);

/// Dotpad - a desktop scratchpad for DOT graphs.
///
/// Run without a subcommand to open the editor window. Type a DOT
/// document, hit Render, and a second window paints the graph.
#[derive(Parser, Debug)]
#[command(name = "dotpad")]
#[command(author, version, long_version = LONG_VERSION, about = "A desktop scratchpad for DOT graphs", long_about = None)]
pub struct Cli {
    /// Read configuration from <PATH> instead of the default location.
    /// Can also be set via the DOTPAD_CONFIG environment variable.
    #[arg(short = 'c', long = "config", global = true, env = "DOTPAD_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the editor window, optionally preloading a DOT file
    Edit {
        /// DOT file to load into the editor buffer
        file: Option<PathBuf>,
    },

    /// Parse and lay out a DOT file, writing the drawing as SVG
    Render {
        /// Input DOT file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Output path (defaults to stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Parse and lay out a DOT file, printing the geometry as JSON
    Geometry {
        /// Input DOT file, or '-' for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

//! Dotpad CLI - a desktop scratchpad for DOT graphs.

use clap::Parser;
use dotpad::canvas::{self, SvgSurface};
use dotpad::cli::{Cli, Commands};
use dotpad::config::Config;
use dotpad::layout::LayoutEngine;
use dotpad::{dot, gui};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let config = match Config::load(cli.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dotpad: error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, &config) {
        eprintln!("dotpad: error: {e}");
        process::exit(1);
    }
}

/// Install the stderr log writer. `DOTPAD_LOG` takes precedence over
/// `RUST_LOG`; with neither set the filter is `dotpad=info`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = std::env::var("DOTPAD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "dotpad=info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}

fn run_command(command: Option<Commands>, config: &Config) -> dotpad::Result<()> {
    match command {
        None => edit(None, config),
        Some(Commands::Edit { file }) => edit(file, config),
        Some(Commands::Render { file, output }) => render(&file, output.as_deref(), config),
        Some(Commands::Geometry { file, pretty }) => geometry(&file, pretty, config),
    }
}

/// Open the editor window, optionally preloading a DOT file.
fn edit(file: Option<PathBuf>, config: &Config) -> dotpad::Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };
    gui::run(text, config)
}

/// Headless parse, layout, and SVG render, written to a file or stdout.
///
/// Unlike the editor, the CLI reports parse failures: they land on stderr
/// with a nonzero exit.
fn render(file: &str, output: Option<&Path>, config: &Config) -> dotpad::Result<()> {
    let text = read_input(file)?;
    let graph = dot::parse(&text)?;
    let laid_out = LayoutEngine::new(config.layout_config()).layout(&graph);

    let style = config.canvas_style();
    let mut surface = SvgSurface::new(laid_out.width, laid_out.height, style.line_width);
    canvas::render(&mut surface, &laid_out, &style);
    let svg = surface.finish();

    match output {
        Some(path) => fs::write(path, svg)?,
        None => io::stdout().write_all(svg.as_bytes())?,
    }
    Ok(())
}

/// Headless parse and layout, printing the geometry as JSON.
fn geometry(file: &str, pretty: bool, config: &Config) -> dotpad::Result<()> {
    let text = read_input(file)?;
    let graph = dot::parse(&text)?;
    let laid_out = LayoutEngine::new(config.layout_config()).layout(&graph);

    let json = if pretty {
        serde_json::to_string_pretty(&laid_out)?
    } else {
        serde_json::to_string(&laid_out)?
    };
    println!("{json}");
    Ok(())
}

/// Read a DOT document from a path, or from stdin when the path is '-'.
fn read_input(file: &str) -> dotpad::Result<String> {
    if file == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

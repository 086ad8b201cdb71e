//! Render command handler
//!
//! Loads a spreadsheet, lays out its relation graph and writes the drawing.

use super::resolve_input;
use relgraph::config::Config;
use relgraph::core::graph::RelationGraph;
use relgraph::core::loader::load_sheet;
use relgraph::core::render::{build_scene, render_to_file, RenderFormat};
use relgraph::{error, info, verbose, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the render command and return the written file
///
/// # Errors
/// Returns a printable `✗` message if loading, layout or writing fails
pub fn run(
    input: Option<&Path>,
    output: Option<&Path>,
    format: Option<&str>,
    open: bool,
    config: &Config,
) -> Result<PathBuf, String> {
    let input = resolve_input(input, config);
    let format = resolve_format(format, output, config)?;

    let sheet = load_sheet(&input).map_err(|e| {
        error!("Failed to load {}: {e}", input.display());
        format!("✗ Failed to load {}: {e}", input.display())
    })?;
    info!(
        "Loaded {} nodes and {} relations from {}",
        sheet.nodes.len(),
        sheet.edges.len(),
        input.display()
    );

    let graph = RelationGraph::build(&sheet);
    verbose!(
        "Graph: {} nodes ({} red, {} blue), {} links, {} synonyms",
        graph.node_count(),
        graph.red_nodes.len(),
        graph.blue_nodes.len(),
        graph.links.len(),
        graph.synonyms.len()
    );

    let scene = build_scene(&graph, &config.render).map_err(|e| {
        error!("Layout failed for {}: {e}", input.display());
        format!("✗ Cannot draw {}: {e}", input.display())
    })?;

    let output_path = output.map_or_else(
        || default_output_path(&input, &config.paths.out_dir, format),
        Path::to_path_buf,
    );
    render_to_file(&scene, format, &config.render, &output_path).map_err(|e| {
        error!("Failed to write {}: {e}", output_path.display());
        format!("✗ Failed to write {}: {e}", output_path.display())
    })?;

    if open {
        if let Err(e) = open_in_viewer(&output_path) {
            warn!("Could not open {}: {e}", output_path.display());
        }
    }
    Ok(output_path)
}

/// Format flag, else the output file's extension, else config `render.format`
fn resolve_format(
    flag: Option<&str>,
    output: Option<&Path>,
    config: &Config,
) -> Result<RenderFormat, String> {
    if let Some(flag) = flag {
        let format: RenderFormat = flag.parse().map_err(|e| format!("✗ {e}"))?;
        let implied = output.and_then(|path| extension_mismatch(format, path));
        if let (Some(path), Some(implied)) = (output, implied) {
            warn!(
                "Writing {format} to {}, whose extension suggests {implied}",
                path.display()
            );
        }
        return Ok(format);
    }
    if let Some(format) = output.and_then(RenderFormat::from_path) {
        return Ok(format);
    }
    config
        .render
        .format
        .parse()
        .map_err(|e| format!("✗ Invalid config value for 'format': {e}"))
}

/// Format implied by the extension of `output` when it differs from `format`
fn extension_mismatch(format: RenderFormat, output: &Path) -> Option<RenderFormat> {
    RenderFormat::from_path(output).filter(|&implied| implied != format)
}

/// `<out_dir>/<input stem>_graph.<ext>`
fn default_output_path(input: &Path, out_dir: &str, format: RenderFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "relgraph".to_string(), |s| s.to_string_lossy().to_string());
    let dir = if out_dir.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(out_dir)
    };
    dir.join(format!("{stem}_graph.{}", format.extension()))
}

/// Hand a file to the platform's default viewer
fn open_in_viewer(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    command.arg(path).spawn().map(|_| ())
}

//! # hs-viz-render
//!
//! Turns `hs-viz` artifacts (as JSON) into SVG documents.

pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use std::path::Path;

use config::VizConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render an artifact JSON to an SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &VizConfig) -> Result<String> {
    match kind {
        "boxplot" | "box" => {
            let art: hs_viz::BoxPlotArtifact = serde_json::from_str(artifact_json)?;
            plots::boxplot::render(&art, config)
        }
        other => Err(RenderError::UnknownKind(other.to_string())),
    }
}

/// Render an artifact JSON to bytes in `format`. Only `svg` is supported.
pub fn render_to_bytes(
    artifact_json: &str,
    kind: &str,
    format: &str,
    config: &VizConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact_json, kind, config)?;
    match format {
        "svg" => Ok(svg.into_bytes()),
        other => Err(RenderError::UnknownKind(format!("format: {other}"))),
    }
}

/// Render an artifact JSON to a file; the format comes from the extension.
pub fn render_to_file(
    artifact_json: &str,
    kind: &str,
    path: &Path,
    config: &VizConfig,
) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    if ext != "svg" {
        return Err(RenderError::UnknownKind(format!("format: {ext}")));
    }
    let svg = render_svg(artifact_json, kind, config)?;
    output::svg::save_svg(&svg, path)?;
    tracing::debug!(path = %path.display(), kind, bytes = svg.len(), "wrote plot");
    Ok(())
}

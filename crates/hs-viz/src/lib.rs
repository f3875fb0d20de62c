//! # hs-viz
//!
//! Visualization data artifacts for heartstat.
//!
//! Artifacts are plain serializable structures; drawing them is the job of
//! `hs-viz-render`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Grouped box-plot artifacts.
pub mod boxplot;

pub use boxplot::{BOXPLOT_SCHEMA_VERSION, BoxPlotArtifact, BoxPlotGroup, BoxPlotMeta, boxplot_artifact};

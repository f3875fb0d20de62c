use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub header: HeaderConfig,
    pub boxplot: BoxPlotConfig,
    pub palette: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Heartstat.base_config()
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    /// Height per category row; the figure grows with the number of groups.
    pub row_height: f64,
    pub min_height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { width: 576.0, row_height: 64.0, min_height: 216.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans, Arial, sans-serif".into(),
            label_size: 11.0,
            tick_size: 9.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub tick_length: f64,
    pub target_ticks: usize,
    /// Draw the full box around the plot area instead of left/bottom spines.
    pub full_frame: bool,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self { tick_direction: "out".into(), tick_length: 4.0, target_ticks: 6, full_frame: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: true, color: Color::rgb(0xCB, 0xD5, 0xE1), alpha: 0.8 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub show_title: bool,
    /// Right-aligned caption next to the title (empty hides it).
    pub caption: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { show_title: true, caption: "heartstat".into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotConfig {
    /// Box height as a fraction of the row height.
    pub box_width: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub flier_size: f64,
    /// Annotate each row with its sample size.
    pub show_counts: bool,
    /// Lighten box fills towards white by this fraction.
    pub fill_lighten: f64,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            box_width: 0.6,
            line_color: Color::rgb(0x3F, 0x3F, 0x3F),
            line_width: 1.2,
            flier_size: 2.5,
            show_counts: true,
            fill_lighten: 0.0,
        }
    }
}

/// Resolve a `VizConfig` from an optional YAML string.
///
/// The YAML `theme` key picks the base preset; every other key overrides it.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(VizConfig::default());
    };
    let user: Value = serde_yaml_ng::from_str(yaml).map_err(config_err)?;
    if user.is_null() {
        return Ok(VizConfig::default());
    }
    if !user.is_mapping() {
        return Err(crate::RenderError::Config("top level must be a mapping".into()));
    }

    let base = match user.get("theme").and_then(Value::as_str) {
        Some(name) => BuiltinTheme::parse(name)
            .ok_or_else(|| crate::RenderError::Config(format!("unknown theme '{name}'")))?
            .base_config(),
        None => VizConfig::default(),
    };

    let mut merged = serde_yaml_ng::to_value(&base).map_err(config_err)?;
    merge(&mut merged, user);
    serde_yaml_ng::from_value(merged).map_err(config_err)
}

fn merge(base: &mut Value, over: Value) {
    match (base, over) {
        (Value::Mapping(b), Value::Mapping(o)) => {
            for (k, v) in o {
                match b.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

fn config_err(e: serde_yaml_ng::Error) -> crate::RenderError {
    crate::RenderError::Config(e.to_string())
}

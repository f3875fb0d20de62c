use crate::color::Color;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    /// seaborn-like: grid, full frame, deep palette.
    Heartstat,
    /// No grid, left/bottom spines only, muted palette.
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "heartstat" | "default" => Some(Self::Heartstat),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Heartstat => heartstat(),
            Self::Minimal => minimal(),
        }
    }
}

fn heartstat() -> VizConfig {
    VizConfig {
        theme: "heartstat".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        header: HeaderConfig::default(),
        boxplot: BoxPlotConfig::default(),
        palette: "deep".into(),
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        figure: FigureConfig { width: 504.0, row_height: 48.0, min_height: 180.0 },
        font: FontConfig { label_size: 10.0, tick_size: 8.0, ..FontConfig::default() },
        axes: AxesConfig { tick_length: 3.0, full_frame: false, ..AxesConfig::default() },
        grid: GridConfig { show: false, ..GridConfig::default() },
        header: HeaderConfig { show_title: true, caption: String::new() },
        boxplot: BoxPlotConfig {
            line_color: Color::rgb(0x55, 0x55, 0x55),
            line_width: 1.0,
            show_counts: false,
            fill_lighten: 0.25,
            ..BoxPlotConfig::default()
        },
        palette: "muted".into(),
    }
}

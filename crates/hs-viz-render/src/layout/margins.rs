use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Margins for a horizontal category plot: category names on the left,
    /// value ticks and label below, title above.
    pub fn for_categories(
        canvas: &Canvas,
        categories: &[&str],
        has_group_label: bool,
        has_value_label: bool,
        config: &VizConfig,
    ) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };

        let mut left = 12.0;
        left += categories
            .iter()
            .map(|c| canvas.measure_text(c, &tick_style).width)
            .fold(0.0_f64, f64::max)
            + 8.0;
        if has_group_label {
            left += config.font.label_size + 8.0;
        }

        let mut bottom = 12.0 + config.axes.tick_length + config.font.tick_size + 6.0;
        if has_value_label {
            bottom += config.font.label_size + 6.0;
        }

        let top = if config.header.show_title { config.font.label_size * 1.3 + 18.0 } else { 12.0 };
        let right = 18.0;

        let width = canvas.width - left - right;
        let height = canvas.height - top - bottom;
        Self { left, top, width: width.max(50.0), height: height.max(30.0) }
    }
}

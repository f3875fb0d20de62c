use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the plot title (bold, left) and the configured caption (right).
pub fn draw_header(canvas: &mut Canvas, area: &PlotArea, title: &str, config: &VizConfig) {
    if !config.header.show_title {
        return;
    }
    let y = area.top - 8.0;

    if !title.is_empty() {
        let title_style = TextStyle {
            size: config.font.label_size * 1.2,
            bold: true,
            ..Default::default()
        };
        canvas.text(area.left, y, title, &title_style);
    }

    if !config.header.caption.is_empty() {
        let caption_style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(100, 100, 100),
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text(area.right(), y, &config.header.caption, &caption_style);
    }
}

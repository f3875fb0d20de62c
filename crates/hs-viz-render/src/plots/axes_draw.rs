use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Grid lines, ticks, tick labels and axis label for a horizontal value axis
/// along the bottom of `area`.
pub fn draw_value_axis(canvas: &mut Canvas, area: &PlotArea, x_axis: &Axis, config: &VizConfig) {
    let tick_line = LineStyle::solid(Color::BLACK, 0.6);
    let inward = config.axes.tick_direction == "in";
    let tl = config.axes.tick_length;

    let tick_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    let grid_style = LineStyle::dashed(config.grid.color.with_alpha(config.grid.alpha), 0.5);

    for (val, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
        let px = x_axis.data_to_pixel(*val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }
        let tick_end = if inward { area.bottom() - tl } else { area.bottom() + tl };
        canvas.line(px, area.bottom(), px, tick_end, &tick_line);

        let label_y = if inward { area.bottom() + 3.0 } else { area.bottom() + tl + 3.0 };
        canvas.text(px, label_y, label, &tick_label_style);
    }

    if !x_axis.label.is_empty() {
        let label_style = TextStyle {
            size: config.font.label_size,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            ..Default::default()
        };
        let label_y = area.bottom() + tl + config.font.tick_size + 10.0;
        canvas.text(area.left + area.width / 2.0, label_y, &x_axis.label, &label_style);
    }
}

/// Category names centred on each row, and the rotated group label.
pub fn draw_category_axis(
    canvas: &mut Canvas,
    area: &PlotArea,
    categories: &[&str],
    label: &str,
    config: &VizConfig,
) {
    let n = categories.len().max(1) as f64;
    let row_h = area.height / n;
    let style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let mut widest = 0.0_f64;
    for (i, cat) in categories.iter().enumerate() {
        let y = area.top + (i as f64 + 0.5) * row_h;
        canvas.text(area.left - 6.0, y, cat, &style);
        widest = widest.max(canvas.measure_text(cat, &style).width);
    }

    if !label.is_empty() {
        let label_style = TextStyle {
            size: config.font.label_size,
            anchor: TextAnchor::Middle,
            ..Default::default()
        };
        let x = area.left - 6.0 - widest - 8.0;
        canvas.text_rotated(x, area.top + area.height / 2.0, label, &label_style, -90.0);
    }
}

/// Plot frame: all four sides, or only the left and bottom spines.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea, full: bool) {
    let style = LineStyle::solid(Color::BLACK, 0.8);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &style);
    if full {
        canvas.line(area.left, area.top, area.right(), area.top, &style);
        canvas.line(area.right(), area.top, area.right(), area.bottom(), &style);
    }
}

use hs_viz::{BoxPlotArtifact, BoxPlotGroup};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::{draw_category_axis, draw_frame, draw_value_axis};
use crate::primitives::*;

/// Render a horizontal grouped box plot: values on x, one row per group.
pub fn render(artifact: &BoxPlotArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.groups.is_empty() {
        return Err(crate::RenderError::Layout("box plot has no groups".into()));
    }

    let n = artifact.groups.len();
    let fig_w = config.figure.width;
    let fig_h = (config.figure.row_height * n as f64 + 90.0).max(config.figure.min_height);
    let mut canvas = Canvas::new(fig_w, fig_h, &config.font.family)?;

    let labels: Vec<&str> = artifact.groups.iter().map(|g| g.label.as_str()).collect();
    let area = PlotArea::for_categories(
        &canvas,
        &labels,
        !artifact.group_label.is_empty(),
        !artifact.value_label.is_empty(),
        config,
    );

    let (lo, hi) = artifact.value_range().unwrap_or((0.0, 1.0));
    let pad = (hi - lo) * 0.04;
    let x_axis = Axis::auto_linear(lo - pad, hi + pad, config.axes.target_ticks)
        .with_label(artifact.value_label.as_str());

    draw_header(&mut canvas, &area, &artifact.title, config);
    draw_value_axis(&mut canvas, &area, &x_axis, config);

    let palette = config.palette_colors();
    let row_h = area.height / n as f64;
    for (i, group) in artifact.groups.iter().enumerate() {
        let fill = palette
            .get(i % palette.len().max(1))
            .copied()
            .unwrap_or(Color::rgb(0x4C, 0x72, 0xB0))
            .mix(Color::WHITE, config.boxplot.fill_lighten);
        let y_mid = area.top + (i as f64 + 0.5) * row_h;
        draw_box(&mut canvas, &area, &x_axis, group, y_mid, row_h, fill, config);
    }

    draw_category_axis(&mut canvas, &area, &labels, &artifact.group_label, config);
    draw_frame(&mut canvas, &area, config.axes.full_frame);

    Ok(canvas.finish_svg())
}

#[allow(clippy::too_many_arguments)]
fn draw_box(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    group: &BoxPlotGroup,
    y_mid: f64,
    row_h: f64,
    fill: Color,
    config: &VizConfig,
) {
    let px = |v: f64| x_axis.data_to_pixel(v, area.left, area.right());
    let cfg = &config.boxplot;
    let line = LineStyle::solid(cfg.line_color, cfg.line_width);

    let (Some(q1), Some(median), Some(q3), Some(w_lo), Some(w_hi)) =
        (group.q1, group.median, group.q3, group.whisker_low, group.whisker_high)
    else {
        let style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(120, 120, 120),
            baseline: TextBaseline::Central,
            ..Default::default()
        };
        canvas.text(area.left + 6.0, y_mid, "no data", &style);
        return;
    };

    let box_h = row_h * cfg.box_width;
    let top = y_mid - box_h / 2.0;
    let cap = box_h * 0.5;

    canvas.whisker_h(px(q1), px(w_lo), y_mid, cap, &line);
    canvas.whisker_h(px(q3), px(w_hi), y_mid, cap, &line);
    canvas.rect(
        px(q1),
        top,
        (px(q3) - px(q1)).max(0.5),
        box_h,
        &Style::outlined(fill, cfg.line_color, cfg.line_width),
    );
    canvas.line(px(median), top, px(median), top + box_h, &line);

    let flier = MarkerStyle {
        shape: MarkerShape::Diamond,
        size: cfg.flier_size,
        color: cfg.line_color,
        fill: true,
    };
    for &o in &group.outliers {
        canvas.marker(px(o), y_mid, &flier);
    }

    if cfg.show_counts {
        let style = TextStyle {
            size: config.font.tick_size * 0.9,
            color: Color::rgb(90, 90, 90),
            anchor: TextAnchor::End,
            baseline: TextBaseline::Hanging,
            ..Default::default()
        };
        canvas.text(area.right() - 4.0, top + box_h + 2.0, &format!("n = {}", group.n), &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(groups: Vec<BoxPlotGroup>) -> BoxPlotArtifact {
        BoxPlotArtifact {
            schema_version: hs_viz::BOXPLOT_SCHEMA_VERSION.into(),
            meta: hs_viz::BoxPlotMeta {
                tool: "heartstat".into(),
                tool_version: "test".into(),
                created_unix_ms: 0,
            },
            title: "thalach by heart_disease".into(),
            value_label: "thalach".into(),
            group_label: "heart_disease".into(),
            groups,
        }
    }

    #[test]
    fn one_box_per_group_with_fliers() {
        let art = artifact(vec![
            BoxPlotGroup::from_values("absence", &[150.0, 160.0, 165.0, 170.0, 175.0, 90.0]),
            BoxPlotGroup::from_values("presence", &[120.0, 130.0, 140.0, 150.0]),
        ]);
        let svg = render(&art, &VizConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        // Background rect plus two boxes.
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert!(svg.contains(">absence</text>"));
        assert!(svg.contains(">presence</text>"));
        assert!(svg.contains(">thalach</text>"));
        assert!(svg.contains("n = 6"));
    }

    #[test]
    fn empty_group_is_labelled() {
        let art = artifact(vec![
            BoxPlotGroup::from_values("absence", &[1.0, 2.0, 3.0]),
            BoxPlotGroup::from_values("unknown", &[]),
        ]);
        let svg = render(&art, &VizConfig::default()).unwrap();
        assert!(svg.contains(">no data</text>"));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn no_groups_is_an_error() {
        assert!(render(&artifact(vec![]), &VizConfig::default()).is_err());
    }

    #[test]
    fn minimal_theme_drops_grid_and_counts() {
        let art = artifact(vec![BoxPlotGroup::from_values("a", &[1.0, 2.0, 3.0, 4.0])]);
        let cfg = crate::theme::BuiltinTheme::Minimal.base_config();
        let svg = render(&art, &cfg).unwrap();
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("n = 4"));
    }
}

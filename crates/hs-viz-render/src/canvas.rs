use std::fmt::Write as FmtWrite;

use crate::color::Color;
use crate::primitives::*;
use crate::text::{TextMetrics, measure_text};

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect { x: f64, y: f64, w: f64, h: f64, style: Style },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, style: LineStyle },
    Polygon { points: Vec<(f64, f64)>, style: Style },
    Circle { cx: f64, cy: f64, r: f64, style: Style },
    Text { x: f64, y: f64, content: String, style: TextStyle, rotate: Option<f64> },
}

/// Immediate-mode SVG canvas. Coordinates in points (1pt = 1/72").
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    font_family: String,
    elements: Vec<SvgElement>,
}

impl Canvas {
    pub fn new(width: f64, height: f64, font_family: &str) -> crate::Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(crate::RenderError::Layout(format!(
                "canvas size must be positive, got {width} x {height}"
            )));
        }
        Ok(Self { width, height, font_family: font_family.to_string(), elements: Vec::new() })
    }

    // --- Drawing primitives ---

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.elements.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        self.elements.push(SvgElement::Circle { cx, cy, r, style: style.clone() });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: None,
        });
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: Some(angle),
        });
    }

    /// Horizontal whisker from `x_from` to `x_to` with a vertical cap at `x_to`.
    pub fn whisker_h(&mut self, x_from: f64, x_to: f64, y: f64, cap_height: f64, style: &LineStyle) {
        self.line(x_from, y, x_to, y, style);
        if cap_height > 0.0 {
            let half = cap_height / 2.0;
            self.line(x_to, y - half, x_to, y + half, style);
        }
    }

    /// Single-observation marker.
    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        let style = if marker.fill {
            Style::outlined(marker.color, marker.color, 0.5)
        } else {
            Style::outlined(Color::WHITE, marker.color, 0.8)
        };
        match marker.shape {
            MarkerShape::Circle => self.circle(x, y, marker.size, &style),
            MarkerShape::Diamond => {
                let s = marker.size;
                let points = vec![(x, y - s), (x + s, y), (x, y + s), (x - s, y)];
                self.elements.push(SvgElement::Polygon { points, style });
            }
        }
    }

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> TextMetrics {
        measure_text(content, style)
    }

    // --- SVG output ---

    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height);
        for elem in &self.elements {
            self.render_element(&mut out, elem);
        }
        out.push_str("</svg>\n");
        out
    }

    fn render_element(&self, out: &mut String, elem: &SvgElement) {
        match elem {
            SvgElement::Rect { x, y, w, h, style } => {
                let _ = write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#);
                write_style_attrs(out, style);
                out.push_str(" />\n");
            }
            SvgElement::Line { x1, y1, x2, y2, style } => {
                let _ = write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#);
                write_line_attrs(out, style);
                out.push_str(" />\n");
            }
            SvgElement::Polygon { points, style } => {
                let pts: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
                let _ = write!(out, r#"<polygon points="{}""#, pts.join(" "));
                write_style_attrs(out, style);
                out.push_str(" />\n");
            }
            SvgElement::Circle { cx, cy, r, style } => {
                let _ = write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#);
                write_style_attrs(out, style);
                out.push_str(" />\n");
            }
            SvgElement::Text { x, y, content, style, rotate } => {
                let _ = write!(
                    out,
                    r#"<text x="{x:.2}" y="{y:.2}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="{}" dominant-baseline="{}""#,
                    escape_xml(&self.font_family),
                    style.size,
                    style.color.to_svg_fill(),
                    style.anchor.as_str(),
                    style.baseline.as_str(),
                );
                if style.bold {
                    out.push_str(r#" font-weight="bold""#);
                }
                if let Some(angle) = rotate {
                    let _ = write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#);
                }
                let _ = writeln!(out, ">{}</text>", escape_xml(content));
            }
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_style_attrs(out: &mut String, style: &Style) {
    match &style.fill {
        Some(fill) => {
            let _ = write!(out, r#" fill="{}""#, fill.to_svg_fill());
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{:.2}""#,
            stroke.to_svg_fill(),
            style.stroke_width
        );
    }
}

fn write_line_attrs(out: &mut String, style: &LineStyle) {
    let _ = write!(out, r#" stroke="{}" stroke-width="{:.2}""#, style.color.to_svg_fill(), style.width);
    if let Some(dash) = &style.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash}""#);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas() {
        let c = Canvas::new(100.0, 50.0, "sans-serif").unwrap();
        let svg = c.finish_svg();
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn invalid_size_is_layout_error() {
        assert!(matches!(Canvas::new(0.0, 10.0, "x"), Err(crate::RenderError::Layout(_))));
        assert!(Canvas::new(f64::NAN, 10.0, "x").is_err());
    }

    #[test]
    fn rect_and_marker() {
        let mut c = Canvas::new(200.0, 100.0, "sans-serif").unwrap();
        c.rect(10.0, 20.0, 50.0, 30.0, &Style::filled(Color::rgb(255, 0, 0)));
        c.marker(5.0, 5.0, &MarkerStyle::default());
        let svg = c.finish_svg();
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("width=\"50.00\""));
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn text_is_escaped() {
        let mut c = Canvas::new(200.0, 100.0, "Arial").unwrap();
        c.text(10.0, 20.0, "chol <240 & >200", &TextStyle::default());
        let svg = c.finish_svg();
        assert!(svg.contains("chol &lt;240 &amp; &gt;200"));
        assert!(svg.contains("font-family=\"Arial\""));
    }
}

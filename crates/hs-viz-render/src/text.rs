use crate::primitives::TextStyle;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

// Average advance widths (em fraction) of a humanist sans face.
const NARROW: f64 = 0.28;
const REGULAR: f64 = 0.55;
const WIDE: f64 = 0.82;
const BOLD_FACTOR: f64 = 1.07;

fn advance(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | ' ' | 'I' => NARROW,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => WIDE,
        c if c.is_ascii_uppercase() => 0.66,
        _ => REGULAR,
    }
}

/// Approximate text extent in points.
///
/// The SVG names a font family and lets the viewer pick the face, so this is
/// an estimate used only for layout (margins, label placement).
pub fn measure_text(text: &str, style: &TextStyle) -> TextMetrics {
    let em: f64 = text.chars().map(advance).sum();
    let width = em * style.size * if style.bold { BOLD_FACTOR } else { 1.0 };
    TextMetrics { width, height: style.size * 1.2, ascent: style.size * 0.8 }
}

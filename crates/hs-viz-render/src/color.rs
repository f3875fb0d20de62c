use serde::{Deserialize, Serialize};
use std::fmt;

/// sRGB color with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// Mix towards `other` by `t` (0 keeps `self`).
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
        Color {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a * (1.0 - t) + other.a * t,
        }
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            self.to_hex()
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{s}'")))
    }
}

// --- Palettes ---

/// seaborn "deep".
pub const DEEP: &[&str] = &[
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];

/// seaborn "muted".
pub const MUTED: &[&str] = &[
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];

pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Colors of a named palette; unknown names fall back to `deep`.
pub fn palette_colors(name: &str) -> Vec<Color> {
    let strs = match name {
        "muted" => MUTED,
        "tableau10" => TABLEAU10,
        _ => DEEP,
    };
    strs.iter().filter_map(|s| Color::parse_hex(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::parse_hex("#4C72B0").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x4C, 0x72, 0xB0));
        assert!((c.a - 1.0).abs() < 1e-9);
        assert!(Color::parse_hex("#12").is_none());
        assert!(Color::parse_hex("zzzzzz").is_none());
    }

    #[test]
    fn svg_fill() {
        assert_eq!(Color::rgb(76, 114, 176).to_svg_fill(), "#4c72b0");
        assert_eq!(Color::rgb(76, 114, 176).with_alpha(0.5).to_svg_fill(), "rgba(76,114,176,0.500)");
    }

    #[test]
    fn palettes_parse_completely() {
        assert_eq!(palette_colors("deep").len(), 10);
        assert_eq!(palette_colors("muted").len(), 10);
        assert_eq!(palette_colors("no-such-palette"), palette_colors("deep"));
    }

    #[test]
    fn mix_endpoints() {
        let c = Color::rgb(0, 100, 200);
        assert_eq!(c.mix(Color::WHITE, 0.0), c);
        assert_eq!(c.mix(Color::WHITE, 1.0), Color::WHITE);
    }
}

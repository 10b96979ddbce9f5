//! Text metrics for laying out the exported scene.
//!
//! The scene is drawn with whatever sans-serif face the rasterizer resolves,
//! so exact glyph metrics are unknown at layout time. These heuristics are
//! tuned for Inter-like UI faces: a little generous, so wrapped captions never
//! overflow the fixed export width.

/// Lightweight weight indicator so callers avoid stringly-typed lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    pub fn svg_value(self) -> &'static str {
        match self {
            FontWeight::Regular => "400",
            FontWeight::Bold => "700",
        }
    }

    /// Average advance per character as a fraction of the font size.
    fn advance_ratio(self) -> f64 {
        match self {
            FontWeight::Regular => 0.55,
            FontWeight::Bold => 0.60,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TextMetrics {
    /// Vertical line height for layout rhythm.
    pub line_h: f64,
    /// Estimated ascender distance above baseline.
    pub asc: f64,
    /// Estimated descender distance below baseline (positive number).
    pub desc: f64,
}

pub fn measure(size_px: f64) -> TextMetrics {
    let line_h = (size_px * 1.28).round();
    let asc = (size_px * 0.92).round();
    let desc = (line_h - asc).max(size_px * 0.08).round();
    TextMetrics { line_h, asc, desc }
}

/// Estimated rendered width of `text`.
pub fn text_width(text: &str, weight: FontWeight, size_px: f64) -> f64 {
    text.chars().count() as f64 * size_px * weight.advance_ratio()
}

/// Greedy word wrap to `max_width`. A single word wider than the line is kept
/// whole on its own line.
pub fn wrap_text(text: &str, weight: FontWeight, size_px: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width(&candidate, weight, size_px) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

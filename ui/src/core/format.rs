//! Formatting helpers for presenting progress values.

/// One-decimal percentage used by the caption, the bar width and the messages.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Remaining share of the assumed lifespan, one decimal.
pub fn format_remaining(progress: f64) -> String {
    format_percent(100.0 - progress)
}

/// CSS length in pixels (`12px`); fractional radii keep their decimals.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

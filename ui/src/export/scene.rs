//! SVG description of the capture region.
//!
//! Native builds have no DOM to clone, so the capture region is redrawn as a
//! small SVG scene with the same parts (bar track, fill, percentage label,
//! caption) and the same layout options. The background is left transparent.

use std::fmt::Write;

use super::fonts::{self, FontWeight};
use crate::core::color::Rgb;
use crate::widget::{LabelPosition, ViewState};

const PADDING: f64 = 24.0;
const BAR_HEIGHT: f64 = 40.0;
const LABEL_SIZE: f64 = 32.0;
const LABEL_GAP: f64 = 16.0;
const CAPTION_SIZE: f64 = 20.0;
const CAPTION_GAP: f64 = 18.0;
const FONT_FAMILY: &str = "Inter, 'Segoe UI', Helvetica, Arial, sans-serif";

/// Snapshot of everything visible in the capture region.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureScene {
    pub percentage_text: String,
    /// Fill fraction of the bar, 0..=100.
    pub fill_percent: f64,
    pub color: Rgb,
    pub corner_radius_px: f64,
    pub label_position: LabelPosition,
    pub caption: Option<String>,
}

impl CaptureScene {
    pub fn from_state(state: &ViewState) -> Self {
        let plan = state.render();
        let fill_percent = if state.has_date() {
            state.progress()
        } else {
            0.0
        };
        Self {
            percentage_text: plan.percentage_text.clone(),
            fill_percent,
            color: state.active_color(),
            corner_radius_px: state.corner_radius_px(),
            label_position: state.label_position(),
            caption: Some(plan.caption_text()),
        }
    }

    /// Lay the scene out at a fixed logical `width`.
    pub fn to_svg(&self, width: u32) -> SvgDocument {
        let w = f64::from(width);
        let inner = (w - PADDING * 2.0).max(1.0);
        let label = fonts::measure(LABEL_SIZE);
        let caption = fonts::measure(CAPTION_SIZE);
        let color = self.color.to_hex();

        let (bar_width, label_x, label_y, label_anchor, mut y) = match self.label_position {
            LabelPosition::Inline => {
                let label_w =
                    fonts::text_width("100.0%", FontWeight::Bold, LABEL_SIZE).ceil();
                let bar_w = (inner - label_w - LABEL_GAP).max(1.0);
                let baseline = PADDING + BAR_HEIGHT / 2.0 + label.asc / 2.0 - label.desc / 2.0;
                (bar_w, w - PADDING, baseline, "end", PADDING + BAR_HEIGHT)
            }
            LabelPosition::Below => {
                let baseline = PADDING + BAR_HEIGHT + LABEL_GAP + label.asc;
                (inner, PADDING, baseline, "start", baseline + label.desc)
            }
        };

        let radius = self.corner_radius_px.clamp(0.0, BAR_HEIGHT / 2.0);
        let fill_width = bar_width * self.fill_percent.clamp(0.0, 100.0) / 100.0;

        let mut body = String::new();
        let _ = write!(
            body,
            "<rect x='{PADDING}' y='{PADDING}' width='{bar_width:.2}' height='{BAR_HEIGHT}' rx='{radius:.2}' fill='{color}' fill-opacity='0.18'/>"
        );
        if fill_width > 0.0 {
            let _ = write!(
                body,
                "<rect x='{PADDING}' y='{PADDING}' width='{fill_width:.2}' height='{BAR_HEIGHT}' rx='{radius:.2}' fill='{color}'/>"
            );
        }
        let _ = write!(
            body,
            "<text x='{label_x:.2}' y='{label_y:.2}' text-anchor='{label_anchor}' fill='{color}' font-family=\"{FONT_FAMILY}\" font-size='{LABEL_SIZE}' font-weight='{}'>{}</text>",
            FontWeight::Bold.svg_value(),
            escape_xml(&self.percentage_text)
        );

        if let Some(text) = self.caption.as_deref() {
            let lines = fonts::wrap_text(text, FontWeight::Regular, CAPTION_SIZE, inner);
            if !lines.is_empty() {
                y += CAPTION_GAP;
            }
            for line in lines {
                let baseline = y + caption.asc;
                let _ = write!(
                    body,
                    "<text x='{PADDING}' y='{baseline:.2}' fill='{color}' fill-opacity='0.85' font-family=\"{FONT_FAMILY}\" font-size='{CAPTION_SIZE}' font-weight='{}'>{}</text>",
                    FontWeight::Regular.svg_value(),
                    escape_xml(&line)
                );
                y += caption.line_h;
            }
        }

        let height = (y + PADDING).ceil() as u32;
        let markup = format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>{body}</svg>"
        );

        SvgDocument {
            markup,
            width,
            height,
        }
    }
}

/// A laid-out scene ready for rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub markup: String,
    pub width: u32,
    pub height: u32,
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(position: LabelPosition, caption: Option<&str>) -> CaptureScene {
        CaptureScene {
            percentage_text: "48.6%".into(),
            fill_percent: 48.6,
            color: Rgb::new(0x2b, 0x63, 0x0d),
            corner_radius_px: 12.0,
            label_position: position,
            caption: caption.map(str::to_string),
        }
    }

    #[test]
    fn document_has_fixed_width() {
        let doc = scene(LabelPosition::Inline, None).to_svg(800);
        assert_eq!(doc.width, 800);
        assert!(doc.markup.contains("width='800'"));
        assert!(doc.markup.contains("48.6%"));
        assert!(doc.markup.contains("#2b630d"));
    }

    #[test]
    fn labels_below_make_the_scene_taller() {
        let inline = scene(LabelPosition::Inline, None).to_svg(800);
        let below = scene(LabelPosition::Below, None).to_svg(800);
        assert!(below.height > inline.height);
    }

    #[test]
    fn long_captions_wrap_onto_more_lines() {
        let short = scene(LabelPosition::Inline, Some("Keep going.")).to_svg(800);
        let long = scene(
            LabelPosition::Inline,
            Some("You've survived 100% of your bad days so far. Keep going. You've survived 100% of your bad days so far. Keep going."),
        )
        .to_svg(800);
        assert!(long.height > short.height);
    }

    #[test]
    fn caption_text_is_escaped() {
        let doc = scene(
            LabelPosition::Inline,
            Some("Please activate 'Savor Every Moment' mode & <relax>"),
        )
        .to_svg(800);
        assert!(doc.markup.contains("&apos;Savor Every Moment&apos;"));
        assert!(doc.markup.contains("&amp; &lt;relax&gt;"));
    }

    #[test]
    fn empty_bar_has_no_fill_rect() {
        let mut empty = scene(LabelPosition::Inline, None);
        empty.fill_percent = 0.0;
        let doc = empty.to_svg(800);
        assert_eq!(doc.markup.matches("<rect").count(), 1);
    }

    #[test]
    fn scene_without_caption_uses_on_screen_placeholder() {
        crate::i18n::init();
        crate::i18n::set_language("en-US").ok();

        let mut state = ViewState::default();
        state.set_birth_date("not a date", time::macros::datetime!(2024-06-01 0:00 UTC));
        let scene = CaptureScene::from_state(&state);

        assert_eq!(
            scene.caption.as_deref(),
            Some("Your progress bar is waiting for a birthday.")
        );
        assert!(scene
            .to_svg(800)
            .markup
            .contains("Your progress bar is waiting for a birthday."));
    }
}

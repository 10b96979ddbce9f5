//! View state for the life progress widget.
//!
//! `ViewState` is the single source of truth. The stylesheet variables, the
//! color picker and the caption are projections of it, produced by the pure
//! [`ViewState::render`] and applied by the component in `view.rs`.

use std::str::FromStr;

use time::OffsetDateTime;

use super::message::{select_message, Message};
use crate::core::color::{progress_color, Rgb};
use crate::core::format::{format_percent, format_px};
use crate::core::progress::{parse_birth_date, progress_between, DateInput};

pub const DEFAULT_CORNER_RADIUS_PX: f64 = 12.0;
pub const MAX_CORNER_RADIUS_PX: f64 = 50.0;

/// Where the percentage label sits relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPosition {
    #[default]
    Inline,
    Below,
}

impl LabelPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelPosition::Inline => "inline",
            LabelPosition::Below => "below",
        }
    }
}

impl FromStr for LabelPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inline" => Ok(LabelPosition::Inline),
            "below" => Ok(LabelPosition::Below),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    raw_date: String,
    input: DateInput,
    progress: f64,
    computed_color: Rgb,
    color_override: Option<Rgb>,
    message: Option<Message>,
    label_position: LabelPosition,
    corner_radius_px: f64,
    exporting: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            raw_date: String::new(),
            input: DateInput::Empty,
            progress: 0.0,
            computed_color: progress_color(0.0),
            color_override: None,
            message: None,
            label_position: LabelPosition::default(),
            corner_radius_px: DEFAULT_CORNER_RADIUS_PX,
            exporting: false,
        }
    }
}

impl ViewState {
    /// Date field changed. Recomputes progress, color and caption; clears any
    /// color the user picked by hand.
    pub fn set_birth_date(&mut self, raw: &str, now: OffsetDateTime) {
        self.raw_date = raw.to_string();
        self.input = parse_birth_date(raw);

        match self.input {
            DateInput::Empty => {
                // Color and caption keep their last values.
                self.progress = 0.0;
            }
            DateInput::Invalid => {
                // No day of month to pick a caption from; fall back to the placeholder.
                self.progress = 0.0;
                self.computed_color = progress_color(0.0);
                self.color_override = None;
                self.message = None;
            }
            DateInput::Valid(birth) => {
                self.progress = progress_between(birth, now);
                self.computed_color = progress_color(self.progress);
                self.color_override = None;
                self.message = Some(select_message(self.progress, birth, now));
            }
        }
    }

    /// Color picker changed. The pick wins until the next date change;
    /// malformed values are ignored.
    pub fn pick_color(&mut self, raw: &str) -> bool {
        match Rgb::from_hex(raw) {
            Some(color) => {
                self.color_override = Some(color);
                true
            }
            None => false,
        }
    }

    pub fn set_label_position(&mut self, position: LabelPosition) {
        self.label_position = position;
    }

    /// Layout selector changed; unknown values are ignored.
    pub fn select_label_position(&mut self, raw: &str) {
        if let Ok(position) = raw.parse() {
            self.label_position = position;
        }
    }

    pub fn set_corner_radius(&mut self, px: f64) {
        if px.is_finite() {
            self.corner_radius_px = px.clamp(0.0, MAX_CORNER_RADIUS_PX);
        }
    }

    /// Radius control changed; non-numeric values are ignored.
    pub fn set_corner_radius_input(&mut self, raw: &str) {
        if let Ok(px) = raw.trim().parse::<f64>() {
            self.set_corner_radius(px);
        }
    }

    /// Claim the export slot. Returns `false` when there is nothing to export
    /// or an export is already running.
    pub fn begin_export(&mut self) -> bool {
        if !self.can_export() {
            return false;
        }
        self.exporting = true;
        true
    }

    pub fn finish_export(&mut self) {
        self.exporting = false;
    }

    pub fn can_export(&self) -> bool {
        !self.input.is_empty() && !self.exporting
    }

    pub fn has_date(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn raw_date(&self) -> &str {
        &self.raw_date
    }

    pub fn input(&self) -> DateInput {
        self.input
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    pub fn corner_radius_px(&self) -> f64 {
        self.corner_radius_px
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Color currently painted: the user's pick if any, else the ramp color.
    pub fn active_color(&self) -> Rgb {
        self.color_override.unwrap_or(self.computed_color)
    }

    pub fn render(&self) -> RenderPlan {
        let (percentage_text, bar_width) = if self.input.is_empty() {
            ("0%".to_string(), "0%".to_string())
        } else {
            let pct = format!("{}%", format_percent(self.progress));
            (pct.clone(), pct)
        };

        let color = self.active_color().to_hex();
        let capture_class = match self.label_position {
            LabelPosition::Inline => "capture-area".to_string(),
            LabelPosition::Below => "capture-area labels-below".to_string(),
        };

        RenderPlan {
            percentage_text,
            bar_width,
            graphic_color: color.clone(),
            picker_value: color,
            corner_radius: format_px(self.corner_radius_px),
            capture_class,
            message: self.message.clone(),
            export_enabled: self.can_export(),
        }
    }
}

/// Everything the surface needs to draw one frame of the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub percentage_text: String,
    pub bar_width: String,
    /// Value for `--graphic-color`.
    pub graphic_color: String,
    pub picker_value: String,
    /// Value for `--corner-radius`.
    pub corner_radius: String,
    pub capture_class: String,
    pub message: Option<Message>,
    pub export_enabled: bool,
}

impl RenderPlan {
    /// Caption for the capture region, or the placeholder when none is selected.
    pub fn caption_text(&self) -> String {
        self.message
            .as_ref()
            .map(Message::text)
            .unwrap_or_else(|| crate::t!("caption-placeholder"))
    }

    /// Inline style carrying the CSS custom properties for the widget root.
    pub fn style_vars(&self) -> String {
        format!(
            "--graphic-color: {}; --corner-radius: {};",
            self.graphic_color, self.corner_radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::message::Tier;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 0:00 UTC);

    #[test]
    fn empty_date_resets_display_and_disables_export() {
        let mut state = ViewState::default();
        state.set_birth_date("", NOW);
        let plan = state.render();
        assert_eq!(plan.percentage_text, "0%");
        assert_eq!(plan.bar_width, "0%");
        assert!(!plan.export_enabled);
        assert!(plan.message.is_none());
    }

    #[test]
    fn valid_date_updates_everything() {
        let mut state = ViewState::default();
        state.set_birth_date("1990-05-17", NOW);
        let plan = state.render();

        let expected = format!("{:.1}%", state.progress());
        assert_eq!(plan.percentage_text, expected);
        assert_eq!(plan.bar_width, expected);
        assert!(plan.export_enabled);
        assert_eq!(plan.graphic_color, progress_color(state.progress()).to_hex());
        assert_eq!(plan.picker_value, plan.graphic_color);

        let message = plan.message.expect("caption selected");
        assert_eq!(message.tier, Tier::Early);
        assert_eq!(message.index, 17 % 4);
    }

    #[test]
    fn clearing_the_date_keeps_last_color_and_caption() {
        let mut state = ViewState::default();
        state.set_birth_date("1950-02-02", NOW);
        let before = state.render();
        state.set_birth_date("", NOW);
        let after = state.render();

        assert_eq!(after.percentage_text, "0%");
        assert!(!after.export_enabled);
        assert_eq!(after.graphic_color, before.graphic_color);
        assert_eq!(after.message, before.message);
    }

    #[test]
    fn invalid_date_shows_zero_progress_but_stays_exportable() {
        let mut state = ViewState::default();
        state.set_birth_date("someday", NOW);
        let plan = state.render();
        assert_eq!(plan.percentage_text, "0.0%");
        assert!(plan.export_enabled);
        assert_eq!(plan.graphic_color, "#2b630d");
    }

    #[test]
    fn invalid_date_after_valid_drops_stale_caption() {
        crate::i18n::init();
        crate::i18n::set_language("en-US").ok();

        let mut state = ViewState::default();
        state.set_birth_date("1990-05-17", NOW);
        assert!(state.render().message.is_some());

        state.set_birth_date("19x0-05-17", NOW);
        let plan = state.render();
        assert_eq!(plan.percentage_text, "0.0%");
        assert!(plan.message.is_none());
        assert_eq!(
            plan.caption_text(),
            "Your progress bar is waiting for a birthday."
        );
    }

    #[test]
    fn user_pick_wins_until_next_date_change() {
        let mut state = ViewState::default();
        state.set_birth_date("1990-05-17", NOW);
        let computed = state.render().graphic_color;

        assert!(state.pick_color("#123abc"));
        assert_eq!(state.render().graphic_color, "#123abc");
        assert_eq!(state.render().picker_value, "#123abc");

        state.select_label_position("below");
        state.set_corner_radius(4.0);
        assert_eq!(state.render().graphic_color, "#123abc");

        state.set_birth_date("1990-05-17", NOW);
        assert_eq!(state.render().graphic_color, computed);
    }

    #[test]
    fn malformed_pick_is_ignored() {
        let mut state = ViewState::default();
        assert!(!state.pick_color("red"));
        assert_eq!(state.active_color(), progress_color(0.0));
    }

    #[test]
    fn layout_and_radius_project_to_css() {
        let mut state = ViewState::default();
        state.select_label_position("below");
        state.set_corner_radius_input("8");
        let plan = state.render();
        assert_eq!(plan.capture_class, "capture-area labels-below");
        assert_eq!(plan.corner_radius, "8px");
        assert!(plan.style_vars().contains("--corner-radius: 8px;"));

        state.select_label_position("sideways");
        state.set_corner_radius_input("wide");
        state.set_corner_radius(500.0);
        let plan = state.render();
        assert_eq!(plan.capture_class, "capture-area labels-below");
        assert_eq!(plan.corner_radius, "50px");
    }

    #[test]
    fn export_slot_is_exclusive() {
        let mut state = ViewState::default();
        assert!(!state.begin_export());

        state.set_birth_date("1990-05-17", NOW);
        assert!(state.begin_export());
        assert!(!state.begin_export());
        assert!(!state.render().export_enabled);

        state.finish_export();
        assert!(state.render().export_enabled);
    }
}

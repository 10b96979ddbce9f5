//! Caption selection.
//!
//! Two pools of four templates, split at 50% progress. The birth day-of-month
//! picks the template, so the caption stays put for a given birthday across
//! re-renders instead of shuffling.

use time::OffsetDateTime;

use crate::core::format::{format_percent, format_remaining};
use crate::core::progress::BirthDate;
use crate::t;

pub const POOL_SIZE: usize = 4;
pub const LATE_TIER_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Progress below 50%.
    Early,
    /// Progress at or above 50%.
    Late,
}

impl Tier {
    pub fn for_progress(progress: f64) -> Self {
        if progress < LATE_TIER_THRESHOLD {
            Tier::Early
        } else {
            Tier::Late
        }
    }
}

/// A selected template plus the already-formatted values it interpolates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tier: Tier,
    pub index: usize,
    pub progress: String,
    pub remaining: String,
    pub age: i32,
}

/// Pick the caption for a progress value and birth date.
pub fn select_message(progress: f64, birth: BirthDate, now: OffsetDateTime) -> Message {
    Message {
        tier: Tier::for_progress(progress),
        index: usize::from(birth.day()) % POOL_SIZE,
        progress: format_percent(progress),
        remaining: format_remaining(progress),
        age: birth.approximate_age(now),
    }
}

impl Message {
    /// Localized caption text in the active language.
    pub fn text(&self) -> String {
        let progress = self.progress.as_str();
        let remaining = self.remaining.as_str();
        match (self.tier, self.index) {
            (Tier::Early, 0) => t!("message-early-0", progress = progress, remaining = remaining),
            (Tier::Early, 1) => t!("message-early-1", progress = progress),
            (Tier::Early, 2) => t!("message-early-2", remaining = remaining),
            (Tier::Early, _) => t!("message-early-3", progress = progress),
            (Tier::Late, 0) => t!("message-late-0", age = self.age),
            (Tier::Late, 1) => t!("message-late-1", progress = progress),
            (Tier::Late, 2) => t!("message-late-2", remaining = remaining),
            (Tier::Late, _) => t!("message-late-3"),
        }
    }
}

//! Pure, platform-agnostic calculations shared by every launcher.

pub mod color;
pub mod format;
pub mod platform;
pub mod progress;

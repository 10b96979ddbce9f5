//! The life progress widget: caption selection, view state and component.

mod export_flow;
mod message;
mod state;
mod view;

pub use export_flow::{settle, ExportStatus, Settled};
pub use message::{select_message, Message, Tier, LATE_TIER_THRESHOLD, POOL_SIZE};
pub use state::{
    LabelPosition, RenderPlan, ViewState, DEFAULT_CORNER_RADIUS_PX, MAX_CORNER_RADIUS_PX,
};
pub use view::LifeProgress;

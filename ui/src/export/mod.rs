//! PNG export of the capture region.
//!
//! The export never photographs the on-screen widget directly. A copy of the
//! capture region is mounted off-screen at a fixed logical width, rasterized at
//! a fixed scale, and discarded again, so the image does not depend on the
//! size of the window it was taken from.
//!
//! - `pipeline`: platform-neutral flow, `CaptureHost` / `Rasterizer` seams.
//! - `scene`: SVG description of the capture region (native rasterization).
//! - `fonts`: text metrics used to lay out the SVG scene.
//! - `download`: hands the finished file to the user.
//! - `web` / `desktop`: concrete hosts and rasterizers per target.

mod download;
mod fonts;
mod pipeline;
mod scene;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;
#[cfg(target_arch = "wasm32")]
mod web;

pub use download::deliver;
pub use pipeline::{
    export_png, CaptureHost, CaptureOptions, ExportError, ExportOutcome, OffscreenClone, PngFile,
    Rasterizer,
};
pub use scene::{CaptureScene, SvgDocument};

use crate::widget::ViewState;

pub const EXPORT_FILENAME: &str = "life-progress.png";
/// Logical width of the off-screen copy, independent of the viewport.
pub const EXPORT_WIDTH: u32 = 800;
/// Device pixels per logical unit in the output image.
pub const EXPORT_SCALE: f32 = 4.0;
/// DOM id of the on-screen capture region.
pub const CAPTURE_AREA_ID: &str = "captureArea";

/// Run the export for the current view with this target's host and rasterizer.
pub async fn export_current(state: &ViewState) -> ExportOutcome {
    #[cfg(target_arch = "wasm32")]
    {
        let host = web::DomCaptureHost::new(CAPTURE_AREA_ID);
        export_png(state, &host, &web::Html2Canvas).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let host = desktop::SceneCaptureHost::new(CaptureScene::from_state(state));
        export_png(state, &host, &desktop::ResvgRasterizer::default()).await
    }
}

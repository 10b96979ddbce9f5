use dioxus::logger::tracing::{debug, error, info};
use futures::future::LocalBoxFuture;

use super::{EXPORT_FILENAME, EXPORT_SCALE, EXPORT_WIDTH};
use crate::widget::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("{0} unavailable")]
    Unavailable(String),
    #[error("unable to stage capture copy: {0}")]
    Clone(String),
    #[error("rasterization failed: {0}")]
    Rasterize(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("unable to save image: {0}")]
    Delivery(String),
}

/// Options handed to the rasterizer alongside the node to capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Pixel density multiplier.
    pub scale: f32,
    /// Leave the background transparent instead of filling it.
    pub transparent: bool,
    pub width: u32,
    pub height: Option<u32>,
    /// Viewport width the rasterizer should pretend to have.
    pub window_width: Option<u32>,
    pub allow_cross_origin: bool,
}

impl CaptureOptions {
    pub fn fixed_width(width: u32, height: Option<u32>) -> Self {
        Self {
            scale: EXPORT_SCALE,
            transparent: true,
            width,
            height,
            window_width: Some(width),
            allow_cross_origin: true,
        }
    }
}

/// Owns the surface the capture region lives on and can stage an off-screen
/// copy of it.
pub trait CaptureHost {
    type Node;

    fn clone_offscreen(&self, width: u32) -> Result<Self::Node, ExportError>;

    /// Laid-out height of a staged copy, if the host can measure it.
    fn measured_height(&self, node: &Self::Node) -> Option<u32>;

    fn remove(&self, node: &Self::Node);
}

/// External collaborator turning a staged node into PNG bytes. Resolves once.
pub trait Rasterizer<N> {
    fn capture<'a>(
        &'a self,
        node: &'a N,
        options: &'a CaptureOptions,
    ) -> LocalBoxFuture<'a, Result<Vec<u8>, ExportError>>;
}

/// A staged off-screen copy; removed from its host when dropped.
pub struct OffscreenClone<'h, H: CaptureHost> {
    host: &'h H,
    node: H::Node,
}

impl<'h, H: CaptureHost> OffscreenClone<'h, H> {
    pub fn mount(host: &'h H, width: u32) -> Result<Self, ExportError> {
        let node = host.clone_offscreen(width)?;
        Ok(Self { host, node })
    }

    pub fn node(&self) -> &H::Node {
        &self.node
    }
}

impl<H: CaptureHost> Drop for OffscreenClone<'_, H> {
    fn drop(&mut self) {
        self.host.remove(&self.node);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No birth date selected; nothing was captured.
    Skipped,
    Saved(PngFile),
    Failed(ExportError),
}

/// Capture the widget as a PNG.
///
/// Does nothing without a date. Failures are logged and returned, never
/// propagated as panics; the staged copy is gone by the time this resolves.
pub async fn export_png<H, R>(state: &ViewState, host: &H, rasterizer: &R) -> ExportOutcome
where
    H: CaptureHost,
    R: Rasterizer<H::Node>,
{
    if !state.has_date() {
        debug!("export skipped: no birth date selected");
        return ExportOutcome::Skipped;
    }

    match capture_fixed_width(host, rasterizer).await {
        Ok(bytes) => {
            info!("export captured ({} bytes)", bytes.len());
            ExportOutcome::Saved(PngFile {
                filename: EXPORT_FILENAME.to_string(),
                bytes,
            })
        }
        Err(err) => {
            error!("Export failed: {err}");
            ExportOutcome::Failed(err)
        }
    }
}

async fn capture_fixed_width<H, R>(host: &H, rasterizer: &R) -> Result<Vec<u8>, ExportError>
where
    H: CaptureHost,
    R: Rasterizer<H::Node>,
{
    let clone = OffscreenClone::mount(host, EXPORT_WIDTH)?;
    let options = CaptureOptions::fixed_width(EXPORT_WIDTH, host.measured_height(clone.node()));
    rasterizer.capture(clone.node(), &options).await
}

//! Native capture: the scene is staged as an SVG document and rasterized with
//! resvg onto a transparent pixmap.

use std::sync::Arc;

use futures::future::{FutureExt, LocalBoxFuture};
use once_cell::sync::Lazy;
use usvg::fontdb;

use super::pipeline::{CaptureHost, CaptureOptions, ExportError, Rasterizer};
use super::scene::{CaptureScene, SvgDocument};

static FONT_DB: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Stages the capture region by laying the scene out at the requested width.
/// The staged document is plain owned data, so removal has nothing to release.
pub struct SceneCaptureHost {
    scene: CaptureScene,
}

impl SceneCaptureHost {
    pub fn new(scene: CaptureScene) -> Self {
        Self { scene }
    }
}

impl CaptureHost for SceneCaptureHost {
    type Node = SvgDocument;

    fn clone_offscreen(&self, width: u32) -> Result<SvgDocument, ExportError> {
        if width == 0 {
            return Err(ExportError::Clone("zero-width capture".into()));
        }
        Ok(self.scene.to_svg(width))
    }

    fn measured_height(&self, node: &SvgDocument) -> Option<u32> {
        Some(node.height)
    }

    fn remove(&self, _node: &SvgDocument) {}
}

#[derive(Default)]
pub struct ResvgRasterizer;

impl Rasterizer<SvgDocument> for ResvgRasterizer {
    fn capture<'a>(
        &'a self,
        node: &'a SvgDocument,
        options: &'a CaptureOptions,
    ) -> LocalBoxFuture<'a, Result<Vec<u8>, ExportError>> {
        futures::future::ready(rasterize(node, options)).boxed_local()
    }
}

fn rasterize(doc: &SvgDocument, options: &CaptureOptions) -> Result<Vec<u8>, ExportError> {
    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb = FONT_DB.clone();

    let tree = usvg::Tree::from_str(&doc.markup, &usvg_options)
        .map_err(|err| ExportError::Rasterize(err.to_string()))?;

    let logical_height = options.height.unwrap_or(doc.height);
    let width = (options.width as f32 * options.scale).round() as u32;
    let height = (logical_height as f32 * options.scale).round() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ExportError::Rasterize(format!("invalid canvas size {width}x{height}")))?;
    if !options.transparent {
        pixmap.fill(tiny_skia::Color::WHITE);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pixmap.as_mut(),
    );

    encode_png(&pixmap)
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::Encode(err.to_string()))?
            .write_image_data(&rgba)
            .map_err(|err| ExportError::Encode(err.to_string()))?;
    }

    Ok(buffer)
}

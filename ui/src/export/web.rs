//! Browser capture: the DOM capture region is deep-cloned off-screen and handed
//! to `html2canvas`, which the web launcher loads as a script.

use base64::Engine;
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::pipeline::{CaptureHost, CaptureOptions, ExportError, Rasterizer};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(node: &HtmlElement, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

pub struct DomCaptureHost {
    region_id: &'static str,
}

impl DomCaptureHost {
    pub fn new(region_id: &'static str) -> Self {
        Self { region_id }
    }
}

impl CaptureHost for DomCaptureHost {
    type Node = HtmlElement;

    fn clone_offscreen(&self, width: u32) -> Result<HtmlElement, ExportError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Unavailable("document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| ExportError::Unavailable("document body".into()))?;
        let source = document
            .get_element_by_id(self.region_id)
            .ok_or_else(|| ExportError::Unavailable(format!("#{}", self.region_id)))?;

        let clone: HtmlElement = source
            .clone_node_with_deep(true)
            .map_err(|err| ExportError::Clone(describe(&err)))?
            .dyn_into()
            .map_err(|_| ExportError::Clone("capture region is not an HTML element".into()))?;

        clone.remove_attribute("id").ok();
        let style = clone.style();
        for (property, value) in [
            ("position", "absolute".to_string()),
            ("left", "-10000px".to_string()),
            ("top", "0".to_string()),
            ("width", format!("{width}px")),
            ("max-width", "none".to_string()),
        ] {
            style
                .set_property(property, &value)
                .map_err(|err| ExportError::Clone(describe(&err)))?;
        }

        body.append_child(&clone)
            .map_err(|err| ExportError::Clone(describe(&err)))?;
        Ok(clone)
    }

    fn measured_height(&self, node: &HtmlElement) -> Option<u32> {
        u32::try_from(node.offset_height()).ok().filter(|h| *h > 0)
    }

    fn remove(&self, node: &HtmlElement) {
        node.remove();
    }
}

pub struct Html2Canvas;

impl Rasterizer<HtmlElement> for Html2Canvas {
    fn capture<'a>(
        &'a self,
        node: &'a HtmlElement,
        options: &'a CaptureOptions,
    ) -> LocalBoxFuture<'a, Result<Vec<u8>, ExportError>> {
        capture_canvas(node, options).boxed_local()
    }
}

async fn capture_canvas(
    node: &HtmlElement,
    options: &CaptureOptions,
) -> Result<Vec<u8>, ExportError> {
    let js_options = options_object(options)?;
    let promise = html2canvas(node, &js_options)
        .map_err(|err| ExportError::Unavailable(format!("html2canvas ({})", describe(&err))))?;

    let canvas: HtmlCanvasElement = JsFuture::from(promise)
        .await
        .map_err(|err| ExportError::Rasterize(describe(&err)))?
        .dyn_into()
        .map_err(|_| ExportError::Rasterize("capture did not produce a canvas".into()))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|err| ExportError::Encode(describe(&err)))?;
    let payload = data_url
        .split(',')
        .nth(1)
        .ok_or_else(|| ExportError::Encode("Malformed data URL".into()))?;

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| ExportError::Encode(err.to_string()))
}

fn options_object(options: &CaptureOptions) -> Result<JsValue, ExportError> {
    let object = js_sys::Object::new();
    let background = if options.transparent {
        JsValue::NULL
    } else {
        JsValue::from_str("#ffffff")
    };

    set_option(&object, "scale", JsValue::from_f64(f64::from(options.scale)))?;
    set_option(&object, "backgroundColor", background)?;
    set_option(&object, "logging", JsValue::FALSE)?;
    set_option(&object, "width", JsValue::from(options.width))?;
    if let Some(height) = options.height {
        set_option(&object, "height", JsValue::from(height))?;
    }
    if let Some(window_width) = options.window_width {
        set_option(&object, "windowWidth", JsValue::from(window_width))?;
    }
    set_option(&object, "useCORS", JsValue::from_bool(options.allow_cross_origin))?;

    Ok(object.into())
}

fn set_option(object: &js_sys::Object, key: &str, value: JsValue) -> Result<(), ExportError> {
    js_sys::Reflect::set(object, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|_| ExportError::Rasterize(format!("unable to set capture option {key}")))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

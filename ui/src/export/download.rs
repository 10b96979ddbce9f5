use super::pipeline::{ExportError, PngFile};

#[cfg(target_arch = "wasm32")]
const PNG_MIME: &str = "image/png";

/// Hand a finished export to the user.
///
/// Web builds trigger a browser download and return `None`; native builds
/// write into the app's data directory and return the saved path.
pub async fn deliver(file: &PngFile) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(PNG_MIME);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Delivery("Failed to create blob".into()))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Delivery("Unable to create download".into()))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Unavailable("document".into()))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Delivery("Unable to create anchor".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Delivery("Anchor cast failed".into()))?;
        anchor.set_href(&url);
        anchor.set_download(&file.filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| ExportError::Unavailable("document body".into()))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| ExportError::Delivery(err.to_string()))?;
        let path = dir.join(&file.filename);
        fs::write(&path, &file.bytes).map_err(|err| ExportError::Delivery(err.to_string()))?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Lifebar", "Lifebar")
        .ok_or_else(|| ExportError::Unavailable("export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}

//! Small per-target glue helpers.

/// Blocking user notice. Natively there is no modal primitive, so the caller's
/// inline notice is the only surface and this is a no-op.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            window.alert_with_message(message).ok();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

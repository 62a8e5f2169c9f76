//! Spiral galaxy - animated particle galaxy with live parameter controls
//!
//! Generates a few hundred thousand stars along elliptical branches,
//! swirls them on the GPU and rebuilds the cloud from a parameter panel.
//! The `core` module has no UI dependencies; the egui frontend runs on
//! native (`--features native`) and in the browser (`--features wasm`).

pub mod core;
pub mod time;

#[cfg(any(feature = "wasm", feature = "native"))]
pub mod app;
#[cfg(any(feature = "wasm", feature = "native"))]
mod galaxy;
#[cfg(any(feature = "wasm", feature = "native"))]
mod theme;

#[cfg(any(feature = "wasm", feature = "native"))]
pub use app::GalaxyApp;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::core::GalaxyConfig;
    use crate::GalaxyApp;

    /// Config JSON set by the host page before the module loads
    const CONFIG_GLOBAL: &str = "window.__galaxy_config";

    fn page_config() -> GalaxyConfig {
        match js_sys::eval(CONFIG_GLOBAL).ok().and_then(|v| v.as_string()) {
            Some(json) => GalaxyConfig::or_default(GalaxyConfig::from_json(&json), CONFIG_GLOBAL),
            None => GalaxyConfig::default(),
        }
    }

    fn canvas() -> Result<web_sys::HtmlCanvasElement, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .ok_or_else(|| JsValue::from_str("no canvas element"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("not a canvas element"))
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let config = page_config();
        let canvas = canvas()?;
        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async move {
            let started = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(GalaxyApp::new(cc, config, false)))),
                )
                .await;
            if let Err(e) = started {
                tracing::error!(error = ?e, "Failed to start eframe");
            }
        });
        Ok(())
    }
}

//! Runtime Configuration
//!
//! Optional `window.HMS_CONFIG` object set by the hosting page, e.g.
//! `{ client: { base_url: "/api" }, toast_dismiss_ms: 5000, log_level: "debug" }`.
//! Every field has a default.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use list_view::ClientConfig;

const GLOBAL_NAME: &str = "HMS_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// How long a toast stays up
    pub toast_dismiss_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            toast_dismiss_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

/// Read `window.HMS_CONFIG`. Absent means defaults; malformed is an error.
pub fn load() -> Result<AppConfig, String> {
    let Some(window) = web_sys::window() else {
        return Ok(AppConfig::default());
    };
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME))
        .map_err(|e| format!("{:?}", e))?;
    if raw.is_undefined() || raw.is_null() {
        return Ok(AppConfig::default());
    }
    serde_wasm_bindgen::from_value(raw).map_err(|e| e.to_string())
}

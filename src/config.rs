//! Configuration for the CV viewer
//!
//! Every field has a default matching the stock page layout, so the host page
//! only passes the options it wants to override.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::Result;

/// pdf.js worker shipped alongside the pdf.js build the page loads
pub const DEFAULT_WORKER_SRC: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.worker.min.js";

/// Oversampling factor used when rasterizing pages
pub const DEFAULT_RENDER_SCALE: f64 = 2.0;

/// Share of the window height a page occupies on screen
pub const VIEWPORT_HEIGHT_RATIO: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub pdf_url: String,
    pub links_url: String,
    pub worker_src: String,
    pub render_scale: f64,
    pub viewport_height_ratio: f64,
    pub elements: ElementIds,
    /// `EnvFilter` directive, e.g. `info` or `cv_viewer=debug`
    pub log_level: String,
}

/// Ids of the host page elements the viewer drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub loading: String,
    pub error: String,
    pub pdf_container: String,
    pub link_previews: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            pdf_url: "CV_Remi_Heneault.pdf".to_string(),
            links_url: "links.json".to_string(),
            worker_src: DEFAULT_WORKER_SRC.to_string(),
            render_scale: DEFAULT_RENDER_SCALE,
            viewport_height_ratio: VIEWPORT_HEIGHT_RATIO,
            elements: ElementIds::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        ElementIds {
            loading: "loading".to_string(),
            error: "error".to_string(),
            pdf_container: "pdf-container".to_string(),
            link_previews: "link-previews".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Build a config from a JS options object; `undefined`/`null` yields defaults
    pub fn from_js(options: JsValue) -> Result<Self> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(options)?)
    }

    pub fn to_js(&self) -> Result<JsValue> {
        Ok(serde_wasm_bindgen::to_value(self)?)
    }
}

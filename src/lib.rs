//! CV Viewer
//!
//! A WASM module that renders a PDF CV in the browser with pdf.js and makes
//! its embedded links usable:
//! - one canvas per page, rasterized at 2x and shown at 90% of the window height
//! - clickable overlays positioned over every link annotation
//! - a sidebar of link previews, cross-highlighted with the overlays on hover

use wasm_bindgen::prelude::*;

pub mod annotation;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod geometry;
pub mod highlight;
pub mod links;
pub mod logging;
pub mod pdfjs;
pub mod render;

// Re-export common types
pub use config::{ElementIds, ViewerConfig};
pub use error::{Result, ViewerError};
pub use links::{LinkDescriptor, LinkDescriptors, LinkStyle};
pub use render::{RenderOptions, RenderOutcome};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in debug mode
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Viewer for one page session
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CvViewer {
    config: ViewerConfig,
}

#[wasm_bindgen]
impl CvViewer {
    /// Create a viewer; `options` may override any field of the default config
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> std::result::Result<CvViewer, JsValue> {
        let config = ViewerConfig::from_js(options)?;
        logging::init(&config.log_level);
        Ok(Self { config })
    }

    /// Effective configuration as a plain JS object
    #[wasm_bindgen(js_name = "config")]
    pub fn config_js(&self) -> std::result::Result<JsValue, JsValue> {
        Ok(self.config.to_js()?)
    }

    /// Build the sidebar, then render every page of the PDF
    ///
    /// The returned promise rejects only when the sidebar cannot be built;
    /// PDF failures are shown through the page's error element instead.
    #[wasm_bindgen(js_name = "load")]
    pub fn load_js(&self) -> js_sys::Promise {
        let viewer = self.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            viewer.load().await?;
            Ok(JsValue::UNDEFINED)
        })
    }
}

impl CvViewer {
    pub fn with_config(config: ViewerConfig) -> Self {
        logging::init(&config.log_level);
        Self { config }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Build the sidebar, then render every page of the PDF
    pub async fn load(&self) -> Result<RenderOutcome> {
        let viewer = dom::DomViewer::new(self.config.elements.clone())?;

        let descriptors =
            links::load_link_descriptors(&fetch::WindowFetch, &self.config.links_url).await;
        viewer.build_sidebar(&descriptors)?;

        let options = RenderOptions {
            source: self.config.pdf_url.clone(),
            scale: self.config.render_scale,
            viewport_height_ratio: self.config.viewport_height_ratio,
        };

        // a missing pdf.js global surfaces as a load failure below
        if let Err(e) = pdfjs::configure_worker(&self.config.worker_src) {
            tracing::warn!("Cannot configure pdf.js worker: {}", e);
        }

        Ok(render::render_document(&pdfjs::PdfJs, &viewer, &options).await)
    }
}

/// Load the default CV into the default page layout
#[wasm_bindgen(js_name = "loadPdf")]
pub async fn load_pdf() -> std::result::Result<(), JsValue> {
    CvViewer::with_config(ViewerConfig::default()).load().await?;
    Ok(())
}

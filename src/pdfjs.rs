//! JavaScript bindings for pdf.js
//!
//! The host page loads pdf.js as a classic script, which exposes the
//! `pdfjsLib` global. Only the handful of calls the viewer needs are bound.

use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::annotation::Annotation;
use crate::engine::{PdfDocument, PdfEngine, PdfPage};
use crate::error::{Result, ViewerError};
use crate::geometry::RasterSize;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = pdfjsLib, js_name = getDocument, catch)]
    fn get_document(src: &str) -> std::result::Result<PdfLoadingTask, JsValue>;

    type PdfLoadingTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &PdfLoadingTask) -> Promise;

    /// `PDFDocumentProxy`
    pub type PdfDocumentProxy;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    fn num_pages(this: &PdfDocumentProxy) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocumentProxy, number: u32) -> Promise;

    /// `PDFPageProxy`
    pub type PdfPageProxy;

    #[wasm_bindgen(method, js_name = getViewport)]
    fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> PageViewport;

    #[wasm_bindgen(method, js_name = render, catch)]
    fn start_render(this: &PdfPageProxy, params: &JsValue) -> std::result::Result<RenderTask, JsValue>;

    #[wasm_bindgen(method, js_name = getAnnotations)]
    fn get_annotations(this: &PdfPageProxy) -> Promise;

    type PageViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PageViewport) -> f64;

    type RenderTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &RenderTask) -> Promise;
}

/// Point `pdfjsLib.GlobalWorkerOptions.workerSrc` at the worker script
pub fn configure_worker(worker_src: &str) -> Result<()> {
    let lib = Reflect::get(&js_sys::global(), &JsValue::from_str("pdfjsLib"))?;
    if lib.is_undefined() {
        return Err(ViewerError::engine("pdfjsLib is not loaded"));
    }
    let options = Reflect::get(&lib, &JsValue::from_str("GlobalWorkerOptions"))?;
    Reflect::set(&options, &JsValue::from_str("workerSrc"), &JsValue::from_str(worker_src))?;
    Ok(())
}

fn viewport_params(scale: f64) -> Result<JsValue> {
    let params = Object::new();
    Reflect::set(&params, &JsValue::from_str("scale"), &JsValue::from_f64(scale))?;
    Ok(params.into())
}

/// pdf.js backed [`PdfEngine`] rendering into `<canvas>` elements
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfJs;

#[async_trait(?Send)]
impl PdfEngine<HtmlCanvasElement> for PdfJs {
    type Document = PdfDocumentProxy;

    async fn open(&self, source: &str) -> Result<PdfDocumentProxy> {
        let task = get_document(source)?;
        let document = JsFuture::from(task.promise()).await?;
        Ok(document.unchecked_into())
    }
}

#[async_trait(?Send)]
impl PdfDocument<HtmlCanvasElement> for PdfDocumentProxy {
    type Page = PdfPageProxy;

    fn page_count(&self) -> u32 {
        self.num_pages()
    }

    async fn page(&self, number: u32) -> Result<PdfPageProxy> {
        let page = JsFuture::from(self.get_page(number)).await?;
        Ok(page.unchecked_into())
    }
}

#[async_trait(?Send)]
impl PdfPage<HtmlCanvasElement> for PdfPageProxy {
    fn raster_size(&self, scale: f64) -> Result<RasterSize> {
        let viewport = self.get_viewport(&viewport_params(scale)?);
        Ok(RasterSize {
            width: viewport.width(),
            height: viewport.height(),
        })
    }

    async fn render(&self, canvas: &HtmlCanvasElement, scale: f64) -> Result<()> {
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| ViewerError::dom("Canvas has no 2d context"))?
            .dyn_into()
            .map_err(|_| ViewerError::dom("Canvas context is not 2d"))?;

        let viewport = self.get_viewport(&viewport_params(scale)?);

        let params = Object::new();
        Reflect::set(&params, &JsValue::from_str("canvasContext"), &context)?;
        Reflect::set(&params, &JsValue::from_str("viewport"), &viewport)?;

        let task = self.start_render(&params)?;
        JsFuture::from(task.promise()).await?;
        Ok(())
    }

    async fn annotations(&self) -> Result<Vec<Annotation>> {
        let value = JsFuture::from(self.get_annotations()).await?;
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

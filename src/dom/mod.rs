//! DOM adapter
//!
//! Builds the sidebar and page elements and wires their event handlers to a
//! shared [`Highlighter`]. One [`DomViewer`] exists per page session.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, Window};

use crate::annotation::LinkTarget;
use crate::config::ElementIds;
use crate::engine::PageSurface;
use crate::error::{Result, ViewerError};
use crate::geometry::{PageLayout, RasterSize};
use crate::highlight::{HighlightChange, Highlighter};

mod page;
mod sidebar;

const ACTIVE_CLASS: &str = "active";

/// Highlight state plus the preview elements it refers to
#[derive(Default)]
struct Session {
    highlighter: RefCell<Highlighter>,
    previews: RefCell<Vec<Element>>,
}

impl Session {
    fn apply(&self, changes: Vec<HighlightChange>) {
        let previews = self.previews.borrow();
        for change in changes {
            let (id, result) = match change {
                HighlightChange::Activate(id) => (
                    id,
                    previews.get(id.0).map(|el| el.class_list().add_1(ACTIVE_CLASS)),
                ),
                HighlightChange::Deactivate(id) => (
                    id,
                    previews.get(id.0).map(|el| el.class_list().remove_1(ACTIVE_CLASS)),
                ),
            };
            match result {
                Some(Ok(())) => {}
                Some(Err(e)) => tracing::warn!(preview = id.0, "Failed to toggle highlight: {:?}", e),
                None => tracing::warn!(preview = id.0, "Highlight for unknown preview"),
            }
        }
    }
}

/// Browser-backed sidebar and page surface
pub struct DomViewer {
    window: Window,
    document: Document,
    ids: ElementIds,
    session: Rc<Session>,
}

impl DomViewer {
    pub fn new(ids: ElementIds) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| ViewerError::dom("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| ViewerError::dom("No document"))?;
        Ok(Self {
            window,
            document,
            ids,
            session: Rc::new(Session::default()),
        })
    }

    fn element(&self, id: &str) -> Result<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ViewerError::dom(format!("Element #{} not found", id)))?
            .dyn_into()
            .map_err(|_| ViewerError::dom(format!("Element #{} is not an HTML element", id)))
    }

    fn create(&self, tag: &str, class: &str) -> Result<HtmlElement> {
        let element: HtmlElement = self
            .document
            .create_element(tag)?
            .dyn_into()
            .map_err(|_| ViewerError::dom(format!("<{}> is not an HTML element", tag)))?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn set_display(&self, id: &str, display: &str) {
        let result = self
            .element(id)
            .and_then(|el| Ok(el.style().set_property("display", display)?));
        if let Err(e) = result {
            tracing::warn!("Cannot set display of #{}: {}", id, e);
        }
    }
}

/// Open `url` in a new browsing context
fn open_in_new_tab(window: &Window, url: &str) {
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        tracing::warn!(url, "window.open failed: {:?}", e);
    }
}

/// Register `handler` for `event`; handlers live as long as the page
fn listen(target: &EventTarget, event: &str, handler: impl FnMut() + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

impl PageSurface for DomViewer {
    type Canvas = HtmlCanvasElement;

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default()
    }

    fn hide_loading(&self) {
        self.set_display(&self.ids.loading, "none");
    }

    fn show_error(&self) {
        self.set_display(&self.ids.error, "block");
    }

    fn create_canvas(&self, raster: RasterSize) -> Result<HtmlCanvasElement> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| ViewerError::dom("<canvas> is not a canvas element"))?;
        let (width, height) = raster.canvas_dimensions();
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    fn mount_page(
        &self,
        page_number: u32,
        canvas: HtmlCanvasElement,
        layout: &PageLayout,
        links: &[LinkTarget],
    ) -> Result<()> {
        self.mount(page_number, canvas, layout, links)
    }
}

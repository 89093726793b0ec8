//! Page containers and link overlays

use std::rc::Rc;

use web_sys::{HtmlCanvasElement, HtmlElement};

use super::{listen, open_in_new_tab, DomViewer};
use crate::annotation::LinkTarget;
use crate::error::Result;
use crate::geometry::{css_px, OverlayRect, PageLayout};

impl DomViewer {
    pub(super) fn mount(
        &self,
        page_number: u32,
        canvas: HtmlCanvasElement,
        layout: &PageLayout,
        links: &[LinkTarget],
    ) -> Result<()> {
        let container = self.element(&self.ids.pdf_container)?;

        let wrapper = self.create("div", "page-wrapper")?;
        let page = self.create("div", "pdf-page")?;
        page.set_id(&format!("page-{}", page_number));

        let width = css_px(layout.display.width);
        let height = css_px(layout.display.height);
        // the canvas backing store stays at raster size; only the CSS box shrinks
        for style in [canvas.style(), page.style()] {
            style.set_property("width", &width)?;
            style.set_property("height", &height)?;
        }
        page.append_child(&canvas)?;

        for link in links {
            let overlay = self.link_overlay(link, layout.overlay_rect(link.rect))?;
            page.append_child(&overlay)?;
        }

        wrapper.append_child(&page)?;
        container.append_child(&wrapper)?;
        Ok(())
    }

    fn link_overlay(&self, link: &LinkTarget, rect: OverlayRect) -> Result<HtmlElement> {
        let overlay = self.create("div", "link-overlay")?;
        overlay.set_attribute("data-url", &link.url)?;

        let style = overlay.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &css_px(rect.left))?;
        style.set_property("top", &css_px(rect.top))?;
        style.set_property("width", &css_px(rect.width))?;
        style.set_property("height", &css_px(rect.height))?;

        let window = self.window.clone();
        let url = link.url.clone();
        listen(&overlay, "click", move || open_in_new_tab(&window, &url))?;

        let session = Rc::clone(&self.session);
        let url = link.url.clone();
        listen(&overlay, "mouseenter", move || {
            let changes = session.highlighter.borrow_mut().enter_overlay(&url);
            session.apply(changes);
        })?;

        let session = Rc::clone(&self.session);
        listen(&overlay, "mouseleave", move || {
            let changes = session.highlighter.borrow_mut().leave_overlay();
            session.apply(changes);
        })?;

        Ok(overlay)
    }
}

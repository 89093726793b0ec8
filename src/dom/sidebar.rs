//! Link preview sidebar

use std::rc::Rc;

use web_sys::HtmlElement;

use super::{listen, open_in_new_tab, DomViewer};
use crate::error::Result;
use crate::highlight::{PreviewId, PreviewTarget};
use crate::links::{LinkDescriptors, SidebarEntry, SidebarItem, SidebarPlan};

impl DomViewer {
    /// Replace the sidebar content with one preview per descriptor
    pub fn build_sidebar(&self, descriptors: &LinkDescriptors) -> Result<usize> {
        let container = self.element(&self.ids.link_previews)?;
        container.set_inner_html("");

        let plan = SidebarPlan::build(descriptors);
        self.session.previews.borrow_mut().clear();
        self.session.highlighter.borrow_mut().reset(
            plan.entries()
                .map(|entry| PreviewTarget {
                    key: entry.key.clone(),
                    url: entry.url.clone(),
                })
                .collect(),
        );

        let mut next_id = 0;
        for item in &plan.items {
            match item {
                SidebarItem::Separator => {
                    let separator = self.create("div", "link-separator")?;
                    container.append_child(&separator)?;
                }
                SidebarItem::Entry(entry) => {
                    let preview = self.preview(entry, PreviewId(next_id))?;
                    container.append_child(&preview)?;
                    self.session.previews.borrow_mut().push(preview.into());
                    next_id += 1;
                }
            }
        }

        tracing::debug!(previews = next_id, "Built link sidebar");
        Ok(next_id)
    }

    fn preview(&self, entry: &SidebarEntry, id: PreviewId) -> Result<HtmlElement> {
        let class = if entry.is_other {
            "link-preview other"
        } else {
            "link-preview"
        };
        let preview = self.create("div", class)?;
        preview.set_attribute("data-key", &entry.key)?;
        preview.set_attribute("data-url", &entry.url)?;

        let title = self.create("h3", "")?;
        title.set_text_content(Some(&entry.title));
        preview.append_child(&title)?;

        let description = self.create("p", "")?;
        description.set_text_content(Some(&entry.description));
        preview.append_child(&description)?;

        if !entry.tools.is_empty() {
            let tools = self.create("div", "tools")?;
            for tool in &entry.tools {
                let chip = self.create("span", "tool-item")?;
                chip.set_text_content(Some(tool));
                tools.append_child(&chip)?;
            }
            preview.append_child(&tools)?;
        }

        let window = self.window.clone();
        let url = entry.url.clone();
        listen(&preview, "click", move || open_in_new_tab(&window, &url))?;

        let session = Rc::clone(&self.session);
        listen(&preview, "mouseenter", move || {
            let changes = session.highlighter.borrow_mut().enter_preview(id);
            session.apply(changes);
        })?;

        let session = Rc::clone(&self.session);
        listen(&preview, "mouseleave", move || {
            let changes = session.highlighter.borrow_mut().leave_preview(id);
            session.apply(changes);
        })?;

        Ok(preview)
    }
}

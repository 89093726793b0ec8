//! Sidebar layout planning
//!
//! Decides what the sidebar shows and in which order, independent of the DOM.

use super::{resolve_url, LinkDescriptors, LinkStyle};

/// A preview entry as it will be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub key: String,
    /// Absolute URL opened on click
    pub url: String,
    pub title: String,
    pub description: String,
    pub tools: Vec<String>,
    /// Rendered with the secondary `other` style
    pub is_other: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SidebarItem {
    Entry(SidebarEntry),
    Separator,
}

/// Ordered sidebar content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SidebarPlan {
    pub items: Vec<SidebarItem>,
}

impl SidebarPlan {
    /// Main entries first, then other entries, with a single separator
    /// between the two groups when both are non-empty.
    pub fn build(descriptors: &LinkDescriptors) -> Self {
        let (main, other): (Vec<_>, Vec<_>) = descriptors
            .iter()
            .partition(|(_, descriptor)| descriptor.style == LinkStyle::Main);

        let separator = !main.is_empty() && !other.is_empty();

        let mut items = Vec::with_capacity(descriptors.len() + usize::from(separator));
        items.extend(main.into_iter().map(|(key, d)| SidebarItem::Entry(SidebarEntry {
            key: key.to_string(),
            url: resolve_url(key),
            title: d.title.clone(),
            description: d.description.clone(),
            tools: d.tools.clone().unwrap_or_default(),
            is_other: false,
        })));
        if separator {
            items.push(SidebarItem::Separator);
        }
        items.extend(other.into_iter().map(|(key, d)| SidebarItem::Entry(SidebarEntry {
            key: key.to_string(),
            url: resolve_url(key),
            title: d.title.clone(),
            description: d.description.clone(),
            tools: d.tools.clone().unwrap_or_default(),
            is_other: true,
        })));

        Self { items }
    }

    /// Entries in render order, separators skipped
    pub fn entries(&self) -> impl Iterator<Item = &SidebarEntry> {
        self.items.iter().filter_map(|item| match item {
            SidebarItem::Entry(entry) => Some(entry),
            SidebarItem::Separator => None,
        })
    }

    pub fn has_separator(&self) -> bool {
        self.items.iter().any(|item| matches!(item, SidebarItem::Separator))
    }
}

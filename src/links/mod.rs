//! Link descriptors
//!
//! The sidebar is driven by a JSON object mapping a domain or URL to a short
//! description of what lives there. Key order in the document is the order
//! entries appear in the sidebar, so the map is kept as an ordered list.

use std::fmt;

use async_trait::async_trait;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod sidebar;

pub use sidebar::{SidebarEntry, SidebarItem, SidebarPlan};

/// Grouping of a sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    Main,
    /// Any style other than `"main"`, including a missing one
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for LinkStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let style = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match style {
            Some(serde_json::Value::String(s)) if s == "main" => LinkStyle::Main,
            _ => LinkStyle::Other,
        })
    }
}

/// One entry of the descriptor file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkDescriptor {
    #[serde(deserialize_with = "display_text")]
    pub title: String,
    #[serde(deserialize_with = "display_text")]
    pub description: String,
    pub style: LinkStyle,
    #[serde(deserialize_with = "tool_list")]
    pub tools: Option<Vec<String>>,
}

/// Strings are used as-is; any other JSON value is shown in its JSON form
fn display_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// `tools` only counts when it is an array; anything else renders no chips
fn tool_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Descriptor map in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkDescriptors {
    entries: Vec<(String, LinkDescriptor)>,
}

impl LinkDescriptors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON descriptor document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Insert or replace; a replaced key keeps its original position
    pub fn insert(&mut self, key: String, descriptor: LinkDescriptor) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = descriptor,
            None => self.entries.push((key, descriptor)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&LinkDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }
}

impl FromIterator<(String, LinkDescriptor)> for LinkDescriptors {
    fn from_iter<I: IntoIterator<Item = (String, LinkDescriptor)>>(iter: I) -> Self {
        let mut descriptors = Self::new();
        for (key, descriptor) in iter {
            descriptors.insert(key, descriptor);
        }
        descriptors
    }
}

impl<'de> Deserialize<'de> for LinkDescriptors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = LinkDescriptors;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping link keys to descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut descriptors = LinkDescriptors::new();
                while let Some((key, descriptor)) = map.next_entry::<String, LinkDescriptor>()? {
                    descriptors.insert(key, descriptor);
                }
                Ok(descriptors)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Absolute URL for a descriptor key
///
/// Keys that already carry an http(s) scheme are used as-is; bare domains
/// get `https://` prepended.
pub fn resolve_url(key: &str) -> String {
    if key.starts_with("http") {
        key.to_string()
    } else {
        format!("https://{}", key)
    }
}

/// Where descriptor text comes from
#[async_trait(?Send)]
pub trait DescriptorSource {
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Fetch and parse the descriptor file
///
/// Never fails: a fetch or parse error is logged and an empty map returned,
/// so the sidebar simply renders nothing.
pub async fn load_link_descriptors<S: DescriptorSource + ?Sized>(
    source: &S,
    path: &str,
) -> LinkDescriptors {
    let loaded = match source.fetch_text(path).await {
        Ok(text) => LinkDescriptors::from_json(&text),
        Err(e) => Err(e),
    };

    match loaded {
        Ok(descriptors) => {
            tracing::debug!(path, count = descriptors.len(), "Loaded link descriptors");
            descriptors
        }
        Err(e) => {
            tracing::error!(path, "Error loading {}: {}", path, e);
            LinkDescriptors::new()
        }
    }
}

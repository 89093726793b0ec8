//! Page annotations as reported by the PDF engine

use serde::{Deserialize, Serialize};

use crate::geometry::PdfRect;

/// The subset of a pdf.js annotation the viewer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub subtype: String,
    /// `[x1, y1, x2, y2]` in PDF points
    pub rect: [f64; 4],
    #[serde(default)]
    pub url: Option<String>,
}

/// An external link to overlay on the page
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    pub url: String,
    pub rect: PdfRect,
}

impl Annotation {
    /// Some(target) for `Link` annotations with a non-empty URL
    pub fn link_target(&self) -> Option<LinkTarget> {
        if self.subtype != "Link" {
            return None;
        }
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        Some(LinkTarget {
            url: url.to_string(),
            rect: PdfRect::from(self.rect),
        })
    }
}

/// Link targets in annotation order
pub fn link_targets(annotations: &[Annotation]) -> Vec<LinkTarget> {
    annotations.iter().filter_map(Annotation::link_target).collect()
}

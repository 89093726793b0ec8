//! PDF engine and page surface seams
//!
//! The render loop only talks to these traits. In the browser they are backed
//! by pdf.js and the DOM; tests back them with in-memory fakes.

use async_trait::async_trait;

use crate::annotation::{Annotation, LinkTarget};
use crate::error::Result;
use crate::geometry::{PageLayout, RasterSize};

/// Document loader
///
/// `C` is the drawing surface pages render into.
#[async_trait(?Send)]
pub trait PdfEngine<C> {
    type Document: PdfDocument<C>;

    async fn open(&self, source: &str) -> Result<Self::Document>;
}

#[async_trait(?Send)]
pub trait PdfDocument<C> {
    type Page: PdfPage<C>;

    fn page_count(&self) -> u32;

    /// Fetch a page (1-indexed)
    async fn page(&self, number: u32) -> Result<Self::Page>;
}

#[async_trait(?Send)]
pub trait PdfPage<C> {
    /// Raster size of the page at the given scale
    fn raster_size(&self, scale: f64) -> Result<RasterSize>;

    /// Draw the page into `canvas`, resolving once drawing has finished
    async fn render(&self, canvas: &C, scale: f64) -> Result<()>;

    async fn annotations(&self) -> Result<Vec<Annotation>>;
}

/// Where rendered pages end up
pub trait PageSurface {
    type Canvas;

    /// Height available to the viewer, in CSS pixels
    fn viewport_height(&self) -> f64;

    fn hide_loading(&self);

    fn show_error(&self);

    /// A blank drawing surface with a backing store of exactly `raster`
    fn create_canvas(&self, raster: RasterSize) -> Result<Self::Canvas>;

    /// Attach a rendered page and its link overlays to the document
    fn mount_page(
        &self,
        page_number: u32,
        canvas: Self::Canvas,
        layout: &PageLayout,
        links: &[LinkTarget],
    ) -> Result<()>;
}

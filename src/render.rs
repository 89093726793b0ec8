//! Sequential page rendering
//!
//! Pages are rendered one at a time in page order: raster first, then
//! annotations, then the page is mounted before the next one starts. Any
//! failure stops the run and flips the surface into its error state.

use crate::annotation::link_targets;
use crate::engine::{PageSurface, PdfDocument, PdfEngine, PdfPage};
use crate::error::Result;
use crate::geometry::PageLayout;

/// Settings for one render run
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub source: String,
    pub scale: f64,
    pub viewport_height_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed { pages: u32 },
    Failed { pages_mounted: u32 },
}

/// Render every page of `options.source` onto `surface`
///
/// Never returns an error; failures are logged and shown through
/// [`PageSurface::show_error`].
pub async fn render_document<E, S>(engine: &E, surface: &S, options: &RenderOptions) -> RenderOutcome
where
    S: PageSurface,
    E: PdfEngine<S::Canvas>,
{
    let mut mounted = 0;
    match render_pages(engine, surface, options, &mut mounted).await {
        Ok(pages) => {
            tracing::info!(source = %options.source, pages, "Rendered PDF");
            RenderOutcome::Completed { pages }
        }
        Err(e) => {
            tracing::error!(source = %options.source, "Error loading PDF: {}", e);
            surface.hide_loading();
            surface.show_error();
            RenderOutcome::Failed {
                pages_mounted: mounted,
            }
        }
    }
}

async fn render_pages<E, S>(
    engine: &E,
    surface: &S,
    options: &RenderOptions,
    mounted: &mut u32,
) -> Result<u32>
where
    S: PageSurface,
    E: PdfEngine<S::Canvas>,
{
    let document = engine.open(&options.source).await?;
    surface.hide_loading();

    let page_count = document.page_count();
    for number in 1..=page_count {
        let page = document.page(number).await?;

        let raster = page.raster_size(options.scale)?;
        let canvas = surface.create_canvas(raster)?;
        page.render(&canvas, options.scale).await?;

        let layout = PageLayout::fit_height(
            raster,
            options.scale,
            surface.viewport_height(),
            options.viewport_height_ratio,
        );

        let annotations = page.annotations().await?;
        let links = link_targets(&annotations);
        tracing::debug!(page = number, links = links.len(), "Rendered page");

        surface.mount_page(number, canvas, &layout, &links)?;
        *mounted += 1;
    }

    Ok(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotation, LinkTarget};
    use crate::error::ViewerError;
    use crate::geometry::{PdfRect, RasterSize};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Stage at which the fake engine rejects
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum FailAt {
        Never,
        Open,
        Render(u32),
        Annotations(u32),
    }

    struct FakeEngine {
        pages: u32,
        fail: FailAt,
        log: Rc<RefCell<Vec<String>>>,
    }

    struct FakeDocument {
        pages: u32,
        fail: FailAt,
        log: Rc<RefCell<Vec<String>>>,
    }

    struct FakePage {
        number: u32,
        fail: FailAt,
        log: Rc<RefCell<Vec<String>>>,
    }

    #[derive(Debug)]
    struct FakeCanvas {
        width: u32,
        height: u32,
    }

    #[async_trait(?Send)]
    impl PdfEngine<FakeCanvas> for FakeEngine {
        type Document = FakeDocument;

        async fn open(&self, source: &str) -> Result<FakeDocument> {
            self.log.borrow_mut().push(format!("open {}", source));
            if self.fail == FailAt::Open {
                return Err(ViewerError::Js("Missing PDF".to_string()));
            }
            Ok(FakeDocument {
                pages: self.pages,
                fail: self.fail,
                log: Rc::clone(&self.log),
            })
        }
    }

    #[async_trait(?Send)]
    impl PdfDocument<FakeCanvas> for FakeDocument {
        type Page = FakePage;

        fn page_count(&self) -> u32 {
            self.pages
        }

        async fn page(&self, number: u32) -> Result<FakePage> {
            self.log.borrow_mut().push(format!("page {}", number));
            Ok(FakePage {
                number,
                fail: self.fail,
                log: Rc::clone(&self.log),
            })
        }
    }

    #[async_trait(?Send)]
    impl PdfPage<FakeCanvas> for FakePage {
        fn raster_size(&self, scale: f64) -> Result<RasterSize> {
            Ok(RasterSize {
                width: 300.0 * scale,
                height: 400.0 * scale,
            })
        }

        async fn render(&self, canvas: &FakeCanvas, _scale: f64) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("render {} {}x{}", self.number, canvas.width, canvas.height));
            if self.fail == FailAt::Render(self.number) {
                return Err(ViewerError::Js("Rendering cancelled".to_string()));
            }
            Ok(())
        }

        async fn annotations(&self) -> Result<Vec<Annotation>> {
            self.log.borrow_mut().push(format!("annotations {}", self.number));
            if self.fail == FailAt::Annotations(self.number) {
                return Err(ViewerError::Js("Bad annotation dictionary".to_string()));
            }
            Ok(vec![
                Annotation {
                    subtype: "Link".to_string(),
                    rect: [50.0, 700.0, 150.0, 750.0],
                    url: Some(format!("https://example.org/{}", self.number)),
                },
                Annotation {
                    subtype: "Text".to_string(),
                    rect: [0.0, 0.0, 10.0, 10.0],
                    url: None,
                },
            ])
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        loading_hidden: RefCell<bool>,
        error_shown: RefCell<bool>,
        mounted: RefCell<Vec<(u32, PageLayout, Vec<LinkTarget>)>>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl PageSurface for FakeSurface {
        type Canvas = FakeCanvas;

        fn viewport_height(&self) -> f64 {
            1000.0
        }

        fn hide_loading(&self) {
            *self.loading_hidden.borrow_mut() = true;
        }

        fn show_error(&self) {
            *self.error_shown.borrow_mut() = true;
        }

        fn create_canvas(&self, raster: RasterSize) -> Result<FakeCanvas> {
            let (width, height) = raster.canvas_dimensions();
            Ok(FakeCanvas { width, height })
        }

        fn mount_page(
            &self,
            page_number: u32,
            _canvas: FakeCanvas,
            layout: &PageLayout,
            links: &[LinkTarget],
        ) -> Result<()> {
            self.log.borrow_mut().push(format!("mount {}", page_number));
            self.mounted
                .borrow_mut()
                .push((page_number, *layout, links.to_vec()));
            Ok(())
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            source: "cv.pdf".to_string(),
            scale: 2.0,
            viewport_height_ratio: 0.9,
        }
    }

    fn run(pages: u32, fail: FailAt) -> (RenderOutcome, FakeSurface) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let engine = FakeEngine {
            pages,
            fail,
            log: Rc::clone(&log),
        };
        let surface = FakeSurface {
            log,
            ..Default::default()
        };
        let outcome = block_on(render_document(&engine, &surface, &options()));
        (outcome, surface)
    }

    #[test]
    fn test_pages_render_in_order() {
        let (outcome, surface) = run(2, FailAt::Never);
        assert_eq!(outcome, RenderOutcome::Completed { pages: 2 });
        assert!(*surface.loading_hidden.borrow());
        assert!(!*surface.error_shown.borrow());

        assert_eq!(
            *surface.log.borrow(),
            vec![
                "open cv.pdf",
                "page 1",
                "render 1 600x800",
                "annotations 1",
                "mount 1",
                "page 2",
                "render 2 600x800",
                "annotations 2",
                "mount 2",
            ]
        );
    }

    #[test]
    fn test_mounted_layout_and_links() {
        let (_, surface) = run(1, FailAt::Never);
        let mounted = surface.mounted.borrow();
        let (number, layout, links) = &mounted[0];

        assert_eq!(*number, 1);
        assert_eq!(layout.display.height, 900.0);
        assert_eq!(layout.display.width, 675.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.org/1");
        assert_eq!(links[0].rect, PdfRect::from([50.0, 700.0, 150.0, 750.0]));
    }

    #[test]
    fn test_open_failure_shows_error() {
        let (outcome, surface) = run(3, FailAt::Open);
        assert_eq!(outcome, RenderOutcome::Failed { pages_mounted: 0 });
        assert!(*surface.loading_hidden.borrow());
        assert!(*surface.error_shown.borrow());
        assert!(surface.mounted.borrow().is_empty());
    }

    #[test]
    fn test_render_failure_stops_remaining_pages() {
        let (outcome, surface) = run(3, FailAt::Render(2));
        assert_eq!(outcome, RenderOutcome::Failed { pages_mounted: 1 });
        assert!(*surface.error_shown.borrow());
        assert!(!surface.log.borrow().iter().any(|l| l == "page 3"));
    }

    #[test]
    fn test_annotation_failure_does_not_mount_page() {
        let (outcome, surface) = run(2, FailAt::Annotations(1));
        assert_eq!(outcome, RenderOutcome::Failed { pages_mounted: 0 });
        assert!(surface.mounted.borrow().is_empty());
        assert!(!surface.log.borrow().iter().any(|l| l == "page 2"));
    }

    #[test]
    fn test_empty_document() {
        let (outcome, surface) = run(0, FailAt::Never);
        assert_eq!(outcome, RenderOutcome::Completed { pages: 0 });
        assert!(*surface.loading_hidden.borrow());
    }
}

//! Page sizing and PDF-to-screen coordinate mapping
//!
//! Pages are rasterized at an oversampling scale and then shown in a smaller
//! CSS box whose height is a fixed share of the window height. Link
//! annotation rectangles arrive in PDF user space (points, origin at the
//! bottom-left) and are mapped onto that CSS box (pixels, origin top-left).

/// Canvas backing store size, in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSize {
    pub width: f64,
    pub height: f64,
}

impl RasterSize {
    /// Pixel dimensions of the canvas backing store; fractional sizes truncate
    pub fn canvas_dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

/// On-screen size, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// Annotation rectangle `[x1, y1, x2, y2]` in PDF points, bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl From<[f64; 4]> for PdfRect {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Absolutely positioned overlay box inside the page container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Render state for one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub raster: RasterSize,
    pub display: DisplaySize,
    /// Oversampling factor the raster was produced at
    pub scale: f64,
}

impl PageLayout {
    /// Height-constrained layout preserving the raster aspect ratio
    pub fn fit_height(raster: RasterSize, scale: f64, viewport_height: f64, height_ratio: f64) -> Self {
        let height = viewport_height * height_ratio;
        let width = (raster.width / raster.height) * height;
        Self {
            raster,
            display: DisplaySize { width, height },
            scale,
        }
    }

    /// Map a PDF-space rectangle onto the display box
    ///
    /// Results are not clamped; rectangles outside the page map outside the box.
    pub fn overlay_rect(&self, rect: PdfRect) -> OverlayRect {
        let scale_x = self.display.width / self.raster.width;
        let scale_y = self.display.height / self.raster.height;

        let left = rect.x1 * self.scale * scale_x;
        let bottom = rect.y1 * self.scale * scale_y;
        let width = (rect.x2 - rect.x1) * self.scale * scale_x;
        let height = (rect.y2 - rect.y1) * self.scale * scale_y;

        OverlayRect {
            left,
            top: self.display.height - bottom - height,
            width,
            height,
        }
    }
}

/// CSS pixel length, e.g. `112.5px`
pub fn css_px(value: f64) -> String {
    format!("{}px", value)
}

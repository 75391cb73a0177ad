//! Single-page printing of the canvas raster.
//!
//! A [`PrintDocument`] pairs the raster with the placement offset. Its
//! page callback, [`PrintDocument::print_page`], draws onto any
//! [`PrintSurface`]: the preview and the spooler both use a [`PageImage`].

mod job;
mod preview;

use egui::{Color32, Pos2, Vec2};
use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasRaster, to_rgba};

pub use job::{JobReceipt, PrintJob, save_png};
pub use preview::{PreviewAction, PrintPreview};

/// Physical page described in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
}

impl Default for PageSetup {
    /// US Letter at 100 dpi
    fn default() -> Self {
        Self {
            width: 850,
            height: 1100,
        }
    }
}

impl PageSetup {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Target of a print-page callback
pub trait PrintSurface {
    /// Draw `image` with its top-left corner at `pos`, stretched to `size`.
    /// Anything outside the surface is clipped.
    fn draw_image(&mut self, image: &RgbaImage, pos: Pos2, size: Vec2);
}

/// A raster placed at an offset, ready to be printed
#[derive(Debug, Clone, Copy)]
pub struct PrintDocument<'a> {
    raster: Option<&'a CanvasRaster>,
    offset: Pos2,
}

impl<'a> PrintDocument<'a> {
    pub fn new(raster: Option<&'a CanvasRaster>, offset: Pos2) -> Self {
        Self { raster, offset }
    }

    pub fn offset(&self) -> Pos2 {
        self.offset
    }

    pub fn raster(&self) -> Option<&'a CanvasRaster> {
        self.raster
    }

    /// Render the only page: the raster at the offset, at native size.
    pub fn print_page(&self, surface: &mut dyn PrintSurface) {
        let Some(raster) = self.raster else {
            log::debug!("Print page requested with no canvas; leaving page blank");
            return;
        };

        let size = Vec2::new(raster.width() as f32, raster.height() as f32);
        surface.draw_image(raster.pixels(), self.offset, size);
    }

    /// Convenience: render the page into a fresh [`PageImage`]
    pub fn render(&self, page: PageSetup) -> PageImage {
        let mut image = PageImage::new(page);
        self.print_page(&mut image);
        image
    }
}

/// Page-sized bitmap that print output is composited onto
#[derive(Clone)]
pub struct PageImage {
    pixels: RgbaImage,
}

impl std::fmt::Debug for PageImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageImage")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl PageImage {
    pub fn new(page: PageSetup) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(page.width, page.height, to_rgba(Color32::WHITE)),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.pixels.width() as usize, self.pixels.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

impl PrintSurface for PageImage {
    fn draw_image(&mut self, image: &RgbaImage, pos: Pos2, size: Vec2) {
        let width = size.x.round().max(0.0) as u32;
        let height = size.y.round().max(0.0) as u32;
        if width == 0 || height == 0 {
            return;
        }

        let x = pos.x.round() as i64;
        let y = pos.y.round() as i64;

        if (width, height) == image.dimensions() {
            imageops::overlay(&mut self.pixels, image, x, y);
        } else {
            let scaled = imageops::resize(image, width, height, imageops::FilterType::Nearest);
            imageops::overlay(&mut self.pixels, &scaled, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Pen;

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<(Pos2, Vec2, (u32, u32))>,
    }

    impl PrintSurface for RecordingSurface {
        fn draw_image(&mut self, image: &RgbaImage, pos: Pos2, size: Vec2) {
            self.calls.push((pos, size, image.dimensions()));
        }
    }

    fn dotted_raster() -> CanvasRaster {
        let mut raster = CanvasRaster::blank(30, 20).unwrap();
        raster.draw_polyline(&[Pos2::new(0.0, 0.0), Pos2::new(3.0, 0.0)], Pen::default());
        raster
    }

    #[test]
    fn test_print_page_uses_offset_and_native_size() {
        let raster = dotted_raster();
        let document = PrintDocument::new(Some(&raster), Pos2::new(-20.0, 130.0));
        let mut surface = RecordingSurface::default();

        document.print_page(&mut surface);

        assert_eq!(
            surface.calls,
            vec![(Pos2::new(-20.0, 130.0), Vec2::new(30.0, 20.0), (30, 20))]
        );
    }

    #[test]
    fn test_print_page_without_raster_draws_nothing() {
        let document = PrintDocument::new(None, Pos2::new(100.0, 100.0));
        let mut surface = RecordingSurface::default();
        document.print_page(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_page_image_places_raster_at_offset() {
        let raster = dotted_raster();
        let document = PrintDocument::new(Some(&raster), Pos2::new(100.0, 50.0));
        let page = document.render(PageSetup { width: 200, height: 100 });

        assert_eq!(page.pixel(101, 50), Some(Color32::BLACK));
        assert_eq!(page.pixel(1, 0), Some(Color32::WHITE));
    }

    #[test]
    fn test_page_image_clips_off_page_content() {
        let raster = dotted_raster();
        let document = PrintDocument::new(Some(&raster), Pos2::new(190.0, 95.0));
        let page = document.render(PageSetup { width: 200, height: 100 });

        assert_eq!(page.pixel(191, 95), Some(Color32::BLACK));
        assert_eq!(page.pixels().dimensions(), (200, 100));
    }

    #[test]
    fn test_page_image_fully_off_page_stays_blank() {
        let raster = dotted_raster();
        let document = PrintDocument::new(Some(&raster), Pos2::new(-500.0, -500.0));
        let page = document.render(PageSetup { width: 50, height: 50 });
        assert!(page.pixels().pixels().all(|p| *p == to_rgba(Color32::WHITE)));
    }
}

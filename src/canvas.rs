use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

use crate::error::CanvasError;
use crate::stroke::Pen;

pub const BACKGROUND: Color32 = Color32::WHITE;

// Shared across rasters so a fresh canvas never reuses a stale texture version
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// The persistent bitmap that completed strokes are flattened into
#[derive(Clone)]
pub struct CanvasRaster {
    pixels: RgbaImage,
    /// Changes on every pixel change so the GPU texture can be refreshed lazily
    version: u64,
}

impl std::fmt::Debug for CanvasRaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRaster")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("version", &self.version)
            .finish()
    }
}

pub(crate) fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

impl CanvasRaster {
    /// Allocate a blank raster filled with the background colour
    pub fn blank(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }

        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(BACKGROUND)),
            version: next_version(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Render `points` as a connected line. Returns false (and leaves the
    /// raster untouched) when there are fewer than two points.
    pub fn draw_polyline(&mut self, points: &[Pos2], pen: Pen) -> bool {
        if points.len() < 2 {
            return false;
        }

        let color = to_rgba(pen.color);
        let radius = (pen.thickness * 0.5).max(std::f32::consts::FRAC_1_SQRT_2);

        for segment in points.windows(2) {
            self.draw_segment(segment[0], segment[1], radius, color);
        }

        self.version = next_version();
        log::debug!(
            "Flattened {} points into canvas (version {})",
            points.len(),
            self.version
        );
        true
    }

    /// Stamp discs along the segment at one-pixel spacing
    fn draw_segment(&mut self, start: Pos2, end: Pos2, radius: f32, color: Rgba<u8>) {
        let delta = end - start;
        let steps = delta.length().ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(start + delta * t, radius, color);
        }
    }

    fn stamp(&mut self, center: Pos2, radius: f32, color: Rgba<u8>) {
        let width = self.width() as i64;
        let height = self.height() as i64;

        let min_x = ((center.x - radius).floor() as i64).max(0);
        let max_x = ((center.x + radius).ceil() as i64).min(width - 1);
        let min_y = ((center.y - radius).floor() as i64).max(0);
        let max_y = ((center.y + radius).ceil() as i64).min(height - 1);

        if min_x > max_x || min_y > max_y {
            return;
        }

        let radius_sq = radius * radius;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.pixels.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }

    pub fn is_uniform(&self, color: Color32) -> bool {
        let expected = to_rgba(color);
        self.pixels.pixels().all(|p| *p == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_white() {
        let raster = CanvasRaster::blank(20, 10).unwrap();
        assert_eq!(raster.size(), [20, 10]);
        assert!(raster.is_uniform(Color32::WHITE));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            CanvasRaster::blank(0, 5).unwrap_err(),
            CanvasError::InvalidSize { width: 0, height: 5 }
        );
    }

    #[test]
    fn test_single_point_is_noop() {
        let mut raster = CanvasRaster::blank(10, 10).unwrap();
        let version = raster.version();
        assert!(!raster.draw_polyline(&[Pos2::new(5.0, 5.0)], Pen::default()));
        assert!(!raster.draw_polyline(&[], Pen::default()));
        assert!(raster.is_uniform(Color32::WHITE));
        assert_eq!(raster.version(), version);
    }

    #[test]
    fn test_horizontal_line_covers_endpoints_and_midpoint() {
        let mut raster = CanvasRaster::blank(40, 20).unwrap();
        let version = raster.version();
        let points = [Pos2::new(5.0, 10.0), Pos2::new(30.0, 10.0)];
        assert!(raster.draw_polyline(&points, Pen::default()));

        assert_eq!(raster.pixel(5, 10), Some(Color32::BLACK));
        assert_eq!(raster.pixel(17, 10), Some(Color32::BLACK));
        assert_eq!(raster.pixel(30, 10), Some(Color32::BLACK));
        // Far from the line stays background
        assert_eq!(raster.pixel(17, 2), Some(Color32::WHITE));
        assert_ne!(raster.version(), version);
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let mut raster = CanvasRaster::blank(10, 10).unwrap();
        let points = [Pos2::new(-50.0, 5.0), Pos2::new(50.0, 5.0)];
        assert!(raster.draw_polyline(&points, Pen::default()));
        assert_eq!(raster.pixel(0, 5), Some(Color32::BLACK));
        assert_eq!(raster.pixel(9, 5), Some(Color32::BLACK));
    }

    #[test]
    fn test_fresh_rasters_get_distinct_versions() {
        let a = CanvasRaster::blank(4, 4).unwrap();
        let b = CanvasRaster::blank(4, 4).unwrap();
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn test_color_image_matches_dimensions() {
        let raster = CanvasRaster::blank(7, 3).unwrap();
        let image = raster.to_color_image();
        assert_eq!(image.size, [7, 3]);
        assert!(image.pixels.iter().all(|p| *p == Color32::WHITE));
    }
}

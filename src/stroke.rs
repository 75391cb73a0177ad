use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// Colour and width used to draw strokes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color32,
    pub thickness: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            thickness: 2.0,
        }
    }
}

impl Pen {
    pub fn to_egui_stroke(self) -> egui::Stroke {
        egui::Stroke::new(self.thickness, self.color)
    }
}

/// The in-progress pointer path, in surface-local coordinates.
///
/// Only holds the stroke currently being drawn; completed strokes live in
/// the canvas raster.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuffer {
    points: Vec<Pos2>,
    pen: Pen,
}

impl StrokeBuffer {
    pub fn new(pen: Pen) -> Self {
        Self {
            points: Vec::new(),
            pen,
        }
    }

    // Add a point to the stroke
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A single point never renders a line.
    pub fn is_drawable(&self) -> bool {
        self.points.len() > 1
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Points shifted into screen space for the live overlay
    pub fn translated(&self, origin: Pos2) -> Vec<Pos2> {
        self.points.iter().map(|p| origin + p.to_vec2()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pen_matches_black_two_pixel() {
        let pen = Pen::default();
        assert_eq!(pen.color, Color32::BLACK);
        assert_eq!(pen.thickness, 2.0);
    }

    #[test]
    fn test_drawable_needs_two_points() {
        let mut buffer = StrokeBuffer::default();
        assert!(!buffer.is_drawable());

        buffer.add_point(Pos2::new(1.0, 1.0));
        assert!(!buffer.is_drawable());

        buffer.add_point(Pos2::new(2.0, 2.0));
        assert!(buffer.is_drawable());

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_translated_offsets_every_point() {
        let mut buffer = StrokeBuffer::default();
        buffer.add_point(Pos2::new(1.0, 2.0));
        buffer.add_point(Pos2::new(3.0, 4.0));

        let moved = buffer.translated(Pos2::new(10.0, 20.0));
        assert_eq!(moved, vec![Pos2::new(11.0, 22.0), Pos2::new(13.0, 24.0)]);
    }
}

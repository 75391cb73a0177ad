use egui::{Painter, PointerButton, Pos2, Rect, Vec2};

use crate::canvas::CanvasRaster;
use crate::error::CanvasError;
use crate::state::StrokeState;
use crate::stroke::{Pen, StrokeBuffer};

/// The freehand drawing area: an in-progress stroke on top of a raster of
/// everything drawn so far.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    raster: Option<CanvasRaster>,
    buffer: StrokeBuffer,
    state: StrokeState,
}

impl DrawingSurface {
    pub fn new(pen: Pen) -> Self {
        Self {
            raster: None,
            buffer: StrokeBuffer::new(pen),
            state: StrokeState::Idle,
        }
    }

    pub fn raster(&self) -> Option<&CanvasRaster> {
        self.raster.as_ref()
    }

    pub fn buffer(&self) -> &StrokeBuffer {
        &self.buffer
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// Allocate the first raster once the panel size is known.
    pub fn ensure_raster(&mut self, size: [u32; 2]) -> Result<(), CanvasError> {
        if self.raster.is_none() {
            self.raster = Some(CanvasRaster::blank(size[0], size[1])?);
            log::debug!("Allocated initial canvas {}x{}", size[0], size[1]);
        }
        Ok(())
    }

    /// Discard the current raster and start over with a blank one of `size`.
    pub fn clear(&mut self, size: [u32; 2]) -> Result<(), CanvasError> {
        let raster = CanvasRaster::blank(size[0], size[1])?;
        self.raster = Some(raster);
        self.buffer.clear();
        self.state = StrokeState::Idle;
        log::info!("Cleared canvas to {}x{}", size[0], size[1]);
        Ok(())
    }

    pub fn pointer_down(&mut self, pos: Pos2, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        self.state = StrokeState::Drawing;
        self.buffer.add_point(pos);
    }

    /// Returns true when the surface needs repainting.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        if !self.state.is_drawing() {
            return false;
        }
        self.buffer.add_point(pos);
        true
    }

    /// Flatten the buffered stroke into the raster and empty the buffer.
    /// Returns true if any pixels were drawn.
    pub fn pointer_up(&mut self, _pos: Pos2) -> bool {
        self.state = StrokeState::Idle;

        let drawn = match &mut self.raster {
            Some(raster) => raster.draw_polyline(self.buffer.points(), self.buffer.pen()),
            None => {
                if !self.buffer.is_empty() {
                    log::warn!("Dropping stroke of {} points: no canvas yet", self.buffer.len());
                }
                false
            }
        };

        self.buffer.clear();
        drawn
    }

    /// Draw the raster at `rect.min`, then the live stroke over it.
    pub fn paint(&self, painter: &Painter, rect: Rect, texture: Option<egui::TextureId>) {
        if let (Some(raster), Some(texture_id)) = (&self.raster, texture) {
            let size = Vec2::new(raster.width() as f32, raster.height() as f32);
            painter.image(
                texture_id,
                Rect::from_min_size(rect.min, size),
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if self.state.is_drawing() && self.buffer.is_drawable() {
            painter.add(egui::Shape::line(
                self.buffer.translated(rect.min),
                self.buffer.pen().to_egui_stroke(),
            ));
        }
    }
}

use egui::{Pos2, Vec2};

pub const DEFAULT_NUDGE_STEP: f32 = 10.0;

/// A directional nudge applied to the print offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
    Up,
    Down,
}

impl Nudge {
    pub const ALL: [Nudge; 4] = [Nudge::Left, Nudge::Right, Nudge::Up, Nudge::Down];

    pub fn label(self) -> &'static str {
        match self {
            Nudge::Left => "←",
            Nudge::Right => "→",
            Nudge::Up => "↑",
            Nudge::Down => "↓",
        }
    }

    /// Unit direction in screen space (y grows downward)
    pub fn direction(self) -> Vec2 {
        match self {
            Nudge::Left => Vec2::new(-1.0, 0.0),
            Nudge::Right => Vec2::new(1.0, 0.0),
            Nudge::Up => Vec2::new(0.0, -1.0),
            Nudge::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Where the raster lands on the printed page. Unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    offset: Pos2,
    step: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Pos2::new(100.0, 100.0), DEFAULT_NUDGE_STEP)
    }
}

impl Placement {
    pub fn new(offset: Pos2, step: f32) -> Self {
        Self { offset, step }
    }

    pub fn offset(&self) -> Pos2 {
        self.offset
    }

    pub fn nudge(&mut self, nudge: Nudge) {
        self.offset += nudge.direction() * self.step;
        log::info!(
            "Nudged {:?}: offset is now ({}, {})",
            nudge,
            self.offset.x,
            self.offset.y
        );
    }
}

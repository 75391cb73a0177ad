/// Per-stroke state machine of the drawing surface.
///
/// `Idle -> Drawing` on primary pointer-down, `Drawing -> Drawing` on move,
/// `Drawing -> Idle` on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing,
}

impl StrokeState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing => "Drawing",
        }
    }
}

use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer events relative to the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed inside the surface
    PointerDown { position: Pos2, button: PointerButton },
    /// Mouse moved while a press that started on the surface is held
    PointerMove { position: Pos2 },
    /// Mouse button was released after a press that started on the surface
    PointerUp { position: Pos2, button: PointerButton },
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Handles converting raw egui pointer input into surface-local InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Button whose press started on the surface, if still held
    captured: Option<PointerButton>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Read this frame's pointer state and translate it for a surface
    /// occupying `surface_rect`.
    pub fn process_input(&mut self, ctx: &Context, surface_rect: Rect) -> Vec<InputEvent> {
        let snapshot = ctx.input(|input| PointerSnapshot {
            position: input.pointer.interact_pos(),
            pressed: BUTTONS
                .iter()
                .copied()
                .find(|&b| input.pointer.button_pressed(b)),
            released: BUTTONS
                .iter()
                .copied()
                .find(|&b| input.pointer.button_released(b)),
        });
        self.translate(snapshot, surface_rect)
    }

    fn translate(&mut self, snapshot: PointerSnapshot, surface_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let origin = surface_rect.min.to_vec2();

        let Some(pos) = snapshot.position.or(self.last_pointer_pos) else {
            return events;
        };

        if let Some(button) = snapshot.pressed {
            if self.captured.is_none() && surface_rect.contains(pos) {
                self.captured = Some(button);
                events.push(InputEvent::PointerDown {
                    position: pos - origin,
                    button,
                });
            }
        } else if self.captured.is_some() && Some(pos) != self.last_pointer_pos {
            events.push(InputEvent::PointerMove {
                position: pos - origin,
            });
        }

        if let Some(button) = snapshot.released {
            if self.captured == Some(button) {
                self.captured = None;
                events.push(InputEvent::PointerUp {
                    position: pos - origin,
                    button,
                });
            }
        }

        self.last_pointer_pos = Some(pos);
        events
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerSnapshot {
    position: Option<Pos2>,
    pressed: Option<PointerButton>,
    released: Option<PointerButton>,
}

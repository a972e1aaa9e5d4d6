use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer input in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved, with or without the button held
    PointerMove { pos: Pos2 },
    /// Primary button released after a press that started on the canvas
    PointerUp { pos: Pos2 },
    DoubleClick { pos: Pos2 },
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// A press started on the canvas and has not been released yet
    pressed_on_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate this frame's pointer input.
    ///
    /// `canvas_rect` is the canvas in screen coordinates. `canvas_hovered`
    /// should be false while another widget covers the canvas. Once a press
    /// starts on the canvas, moves and the release are reported even outside it.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        canvas_hovered: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_canvas = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        ctx.input(|input| {
            let pointer = &input.pointer;
            let Some(pos) = pointer.latest_pos() else {
                return;
            };
            let over_canvas = canvas_hovered && canvas_rect.contains(pos);

            if Some(pos) != self.last_pointer_pos && (over_canvas || self.pressed_on_canvas) {
                events.push(InputEvent::PointerMove { pos: to_canvas(pos) });
            }
            self.last_pointer_pos = Some(pos);

            if pointer.button_pressed(PointerButton::Primary) && over_canvas {
                self.pressed_on_canvas = true;
                events.push(InputEvent::PointerDown { pos: to_canvas(pos) });
            }
            if pointer.button_double_clicked(PointerButton::Primary) && over_canvas {
                events.push(InputEvent::DoubleClick { pos: to_canvas(pos) });
            }
            if pointer.button_released(PointerButton::Primary) && self.pressed_on_canvas {
                self.pressed_on_canvas = false;
                events.push(InputEvent::PointerUp { pos: to_canvas(pos) });
            }
        });

        events
    }
}

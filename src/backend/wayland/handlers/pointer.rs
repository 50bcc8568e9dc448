// Feeds pointer events into the stroke session and tracks the position the
// trail animator samples.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use trailpen::{
    draw::Coordinate,
    input::{ButtonState, InputEvent, MouseButton},
};

use super::super::state::WaylandState;

fn to_coordinate(position: (f64, f64)) -> Coordinate {
    Coordinate::new(position.0 as i32, position.1 as i32)
}

fn to_button(code: u32) -> Option<MouseButton> {
    match code {
        BTN_LEFT => Some(MouseButton::Left),
        BTN_MIDDLE => Some(MouseButton::Middle),
        BTN_RIGHT => Some(MouseButton::Right),
        _ => None,
    }
}

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let position = to_coordinate(event.position);
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at {}", position);
                    self.pointer_position = position;
                    self.pointer_focus = true;
                    // Compositors reset the cursor image on enter.
                    self.refresh_cursor();
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                    self.pointer_focus = false;
                }
                PointerEventKind::Motion { .. } => {
                    self.pointer_position = position;
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Button {} pressed at {}", button, position);
                    self.pointer_position = position;
                    if let Some(button) = to_button(button) {
                        self.dispatch_input(InputEvent::PointerButton {
                            button,
                            position,
                            state: ButtonState::Pressed,
                        });
                    }
                }
                PointerEventKind::Release { button, .. } => {
                    debug!("Button {} released at {}", button, position);
                    self.pointer_position = position;
                    if let Some(button) = to_button(button) {
                        self.dispatch_input(InputEvent::PointerButton {
                            button,
                            position,
                            state: ButtonState::Released,
                        });
                    }
                }
                PointerEventKind::Axis { .. } => {}
            }
        }
    }
}

//! Gamepad buttons forwarded as keyboard codes

use gilrs::{Button, EventType, Gilrs};
use pico_runtime::HostEvent;

/// Key code a gamepad button stands in for
pub fn button_code(button: Button) -> Option<&'static str> {
    match button {
        Button::DPadLeft => Some("ArrowLeft"),
        Button::DPadRight => Some("ArrowRight"),
        Button::DPadUp => Some("ArrowUp"),
        Button::DPadDown => Some("ArrowDown"),
        Button::South => Some("KeyZ"),
        Button::East => Some("KeyX"),
        Button::Start => Some("Enter"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Pressed,
    Repeated,
    Released,
}

fn button_event(button: Button, edge: Edge) -> Option<HostEvent> {
    let code = button_code(button)?;
    Some(match edge {
        Edge::Pressed => HostEvent::key_down(code),
        Edge::Repeated => HostEvent::key_repeat(code),
        Edge::Released => HostEvent::key_up(code),
    })
}

/// Translate one gilrs event; auto-repeats are reported with `repeat` set
pub fn translate(event: &EventType) -> Option<HostEvent> {
    match event {
        EventType::ButtonPressed(button, _) => button_event(*button, Edge::Pressed),
        EventType::ButtonRepeated(button, _) => button_event(*button, Edge::Repeated),
        EventType::ButtonReleased(button, _) => button_event(*button, Edge::Released),
        _ => None,
    }
}

/// Polls connected gamepads. Missing gamepad support is not an error.
pub struct GamepadInput {
    gilrs: Option<Gilrs>,
}

impl GamepadInput {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (_, pad) in gilrs.gamepads() {
                    log::info!("Gamepad connected: {}", pad.name());
                }
                Some(gilrs)
            }
            Err(e) => {
                log::warn!("Gamepad support unavailable: {}", e);
                None
            }
        };
        Self { gilrs }
    }

    /// Drain pending gamepad events into `sink`
    pub fn poll(&mut self, mut sink: impl FnMut(HostEvent)) {
        let Some(gilrs) = &mut self.gilrs else {
            return;
        };
        while let Some(event) = gilrs.next_event() {
            match &event.event {
                EventType::Connected => log::info!("Gamepad {:?} connected", event.id),
                EventType::Disconnected => log::info!("Gamepad {:?} disconnected", event.id),
                other => {
                    if let Some(host_event) = translate(other) {
                        sink(host_event);
                    }
                }
            }
        }
    }
}

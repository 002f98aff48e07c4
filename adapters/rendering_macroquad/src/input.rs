//! Conversion from window keys, mouse and touches into logical input events.

use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_key_released, is_mouse_button_down, is_mouse_button_pressed,
    is_mouse_button_released, mouse_position, touches, KeyCode, MouseButton, TouchPhase,
};
use mobile_strike_core::{InputEvent, Key, PointerId, ScreenSize};

/// Physical keys and the logical key each one drives.
const KEY_BINDINGS: [(KeyCode, Key); 11] = [
    (KeyCode::W, Key::Forward),
    (KeyCode::S, Key::Backward),
    (KeyCode::A, Key::StrafeLeft),
    (KeyCode::D, Key::StrafeRight),
    (KeyCode::Left, Key::TurnLeft),
    (KeyCode::Right, Key::TurnRight),
    (KeyCode::Space, Key::Fire),
    (KeyCode::R, Key::Reload),
    (KeyCode::Key1, Key::SelectGun),
    (KeyCode::Q, Key::SelectKnife),
    (KeyCode::M, Key::ToggleMute),
];

/// The mouse acts as one more pointer; touch identifiers are shifted past it.
const MOUSE_POINTER: PointerId = PointerId::new(0);

/// Uniform scale and centring that fits the logical surface inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Letterbox {
    scale: f32,
    offset: Vec2,
    logical: Vec2,
}

impl Letterbox {
    pub(crate) fn fit(screen: ScreenSize, window_width: f32, window_height: f32) -> Self {
        let logical = Vec2::new(screen.width() as f32, screen.height() as f32);
        let scale = (window_width / logical.x).min(window_height / logical.y);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let window = Vec2::new(window_width, window_height);
        let offset = ((window - logical * scale) * 0.5).max(Vec2::ZERO);
        Self {
            scale,
            offset,
            logical,
        }
    }

    pub(crate) fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Window-space size of the scaled surface.
    pub(crate) fn size(&self) -> Vec2 {
        self.logical * self.scale
    }

    pub(crate) fn to_logical(&self, window: Vec2) -> Vec2 {
        (window - self.offset) / self.scale
    }

    pub(crate) fn to_window(&self, logical: Vec2) -> Vec2 {
        logical * self.scale + self.offset
    }
}

/// Polls macroquad's input state once per frame.
#[derive(Debug, Default)]
pub(crate) struct InputCollector {
    mouse_held: bool,
    touch_seen: bool,
}

impl InputCollector {
    /// Reports whether the window has ever delivered a touch contact.
    pub(crate) fn touch_seen(&self) -> bool {
        self.touch_seen
    }

    pub(crate) fn poll(&mut self, letterbox: &Letterbox) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for (code, key) in KEY_BINDINGS {
            if is_key_pressed(code) {
                events.push(InputEvent::KeyDown(key));
            }
            if is_key_released(code) {
                events.push(InputEvent::KeyUp(key));
            }
        }

        let (mouse_x, mouse_y) = mouse_position();
        let position = letterbox.to_logical(Vec2::new(mouse_x, mouse_y));
        if is_mouse_button_pressed(MouseButton::Left) {
            self.mouse_held = true;
            events.push(InputEvent::PointerDown {
                id: MOUSE_POINTER,
                position,
            });
        } else if self.mouse_held && is_mouse_button_down(MouseButton::Left) {
            events.push(InputEvent::PointerMove {
                id: MOUSE_POINTER,
                position,
            });
        }
        if self.mouse_held && is_mouse_button_released(MouseButton::Left) {
            self.mouse_held = false;
            events.push(InputEvent::PointerUp { id: MOUSE_POINTER });
        }

        for touch in touches() {
            self.touch_seen = true;
            let position = letterbox.to_logical(Vec2::new(touch.position.x, touch.position.y));
            events.extend(touch_event(touch.id, touch.phase, position));
        }
        events
    }
}

fn touch_event(id: u64, phase: TouchPhase, position: Vec2) -> Option<InputEvent> {
    let id = PointerId::new(id.wrapping_add(1));
    match phase {
        TouchPhase::Started => Some(InputEvent::PointerDown { id, position }),
        TouchPhase::Moved => Some(InputEvent::PointerMove { id, position }),
        TouchPhase::Stationary => None,
        TouchPhase::Ended => Some(InputEvent::PointerUp { id }),
        TouchPhase::Cancelled => Some(InputEvent::PointerCancel { id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn letterbox_centres_a_wider_window() {
        let letterbox = Letterbox::fit(ScreenSize::new(320, 200), 1280.0, 600.0);

        assert_eq!(letterbox.scale(), 3.0);
        assert_eq!(letterbox.offset(), Vec2::new(160.0, 0.0));
        assert_eq!(letterbox.size(), Vec2::new(960.0, 600.0));
        assert_eq!(
            letterbox.to_logical(Vec2::new(640.0, 300.0)),
            Vec2::new(160.0, 100.0)
        );
        assert_eq!(
            letterbox.to_window(Vec2::new(0.0, 200.0)),
            Vec2::new(160.0, 600.0)
        );
    }

    #[test]
    fn collapsed_window_keeps_unit_scale() {
        let letterbox = Letterbox::fit(ScreenSize::new(320, 200), 0.0, 0.0);

        assert_eq!(letterbox.scale(), 1.0);
        assert_eq!(letterbox.offset(), Vec2::ZERO);
    }

    #[test]
    fn touches_never_share_the_mouse_pointer() {
        let down = touch_event(0, TouchPhase::Started, Vec2::new(5.0, 6.0));
        assert_eq!(
            down,
            Some(InputEvent::PointerDown {
                id: PointerId::new(1),
                position: Vec2::new(5.0, 6.0),
            })
        );
        assert_eq!(touch_event(0, TouchPhase::Stationary, Vec2::ZERO), None);
        assert_eq!(
            touch_event(4, TouchPhase::Cancelled, Vec2::ZERO),
            Some(InputEvent::PointerCancel {
                id: PointerId::new(5)
            })
        );
    }

    #[test]
    fn every_logical_key_has_one_binding() {
        let keys: HashSet<Key> = KEY_BINDINGS.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys.len(), KEY_BINDINGS.len());
    }
}

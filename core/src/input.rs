//! Raw input events, the per-tick intent snapshot, and on-screen touch geometry.

use glam::Vec2;

use crate::{ScreenSize, Tuning, Weapon};

/// Logical keys the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Walk along the facing direction.
    Forward,
    /// Walk against the facing direction.
    Backward,
    /// Step sideways to the left.
    StrafeLeft,
    /// Step sideways to the right.
    StrafeRight,
    /// Rotate counter-clockwise.
    TurnLeft,
    /// Rotate clockwise.
    TurnRight,
    /// Attack with the equipped weapon while held.
    Fire,
    /// Reload the gun.
    Reload,
    /// Equip the gun.
    SelectGun,
    /// Equip the knife.
    SelectKnife,
    /// Flip the mute state.
    ToggleMute,
}

/// Stable identifier of a single pointer contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(u64);

impl PointerId {
    /// Creates a pointer identifier from the host's contact identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Host contact identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Raw input delivered by the host surface.
///
/// Pointer positions are expressed in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// A contact touched the surface.
    PointerDown {
        /// Contact identifier.
        id: PointerId,
        /// Logical position of the contact.
        position: Vec2,
    },
    /// A contact moved.
    PointerMove {
        /// Contact identifier.
        id: PointerId,
        /// Logical position of the contact.
        position: Vec2,
    },
    /// A contact lifted.
    PointerUp {
        /// Contact identifier.
        id: PointerId,
    },
    /// The host aborted a contact.
    PointerCancel {
        /// Contact identifier.
        id: PointerId,
    },
}

/// Normalised input snapshot consumed by exactly one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intent {
    /// Forward key held.
    pub forward: bool,
    /// Backward key held.
    pub backward: bool,
    /// Strafe-left key held.
    pub strafe_left: bool,
    /// Strafe-right key held.
    pub strafe_right: bool,
    /// Turn-left key held.
    pub turn_left: bool,
    /// Turn-right key held.
    pub turn_right: bool,
    /// Joystick deflection in screen axes, scaled to at most unit length.
    ///
    /// `None` while no joystick contact is active or the handle sits in the dead zone.
    pub joystick: Option<Vec2>,
    /// Signed rotation requested by look dragging, in radians.
    pub look_rotation: f32,
    /// Fire key or shoot button held.
    pub fire: bool,
    /// Reload requested since the previous tick.
    pub reload: bool,
    /// Explicit weapon selection requested since the previous tick.
    pub select_weapon: Option<Weapon>,
    /// Weapon toggle button tapped since the previous tick.
    pub toggle_weapon: bool,
    /// Mute toggle requested since the previous tick.
    pub toggle_mute: bool,
    /// The very first input interaction happened since the previous tick.
    pub first_interaction: bool,
}

/// Axis-aligned rectangle in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Reports whether the point lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x > self.origin.x && point.x < max.x && point.y > self.origin.y && point.y < max.y
    }
}

/// Circle in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Centre of the circle.
    pub center: Vec2,
    /// Radius of the circle.
    pub radius: f32,
}

impl Circle {
    /// Reports whether the point lies strictly inside the circle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// Role a new contact takes, decided once when it touches down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchRegion {
    /// Left part of the screen that spawns the virtual joystick.
    Joystick,
    /// Weapon toggle button.
    SwitchWeapon,
    /// Reload button.
    Reload,
    /// Shoot button.
    Shoot,
    /// Anywhere else on the right side.
    Look,
}

/// Placement of the on-screen touch controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchLayout {
    /// Contacts starting left of this x coordinate claim the joystick.
    pub joystick_boundary: f32,
    /// Radius the joystick handle is clamped to.
    pub joystick_base_radius: f32,
    /// Drawn radius of the joystick handle.
    pub joystick_handle_radius: f32,
    /// Weapon toggle button.
    pub switch_button: Rect,
    /// Reload button, only active while the gun is equipped.
    pub reload_button: Circle,
    /// Shoot button.
    pub shoot_button: Circle,
}

impl TouchLayout {
    /// Lays the controls out for the provided surface.
    #[must_use]
    pub fn new(screen: ScreenSize, tuning: &Tuning) -> Self {
        let width = screen.width() as f32;
        let height = screen.height() as f32;
        Self {
            joystick_boundary: width * tuning.joystick_region,
            joystick_base_radius: tuning.joystick_base_radius,
            joystick_handle_radius: tuning.joystick_handle_radius,
            switch_button: Rect {
                origin: Vec2::new(width - 40.0, 10.0),
                size: Vec2::new(30.0, 30.0),
            },
            reload_button: Circle {
                center: Vec2::new(width - 65.0, height - 120.0),
                radius: 25.0,
            },
            shoot_button: Circle {
                center: Vec2::new(width - 55.0, height - 55.0),
                radius: 35.0,
            },
        }
    }

    /// Classifies a contact by where it started.
    ///
    /// Buttons are tested in order: weapon toggle, reload (only when
    /// `reload_enabled`), then shoot.
    #[must_use]
    pub fn classify(&self, position: Vec2, reload_enabled: bool) -> TouchRegion {
        if position.x < self.joystick_boundary {
            return TouchRegion::Joystick;
        }
        if self.switch_button.contains(position) {
            return TouchRegion::SwitchWeapon;
        }
        if reload_enabled && self.reload_button.contains(position) {
            return TouchRegion::Reload;
        }
        if self.shoot_button.contains(position) {
            return TouchRegion::Shoot;
        }
        TouchRegion::Look
    }
}

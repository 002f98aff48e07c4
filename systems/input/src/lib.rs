#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input aggregation system that folds raw key and pointer events into a
//! stable per-tick [`Intent`].
//!
//! Events may arrive at any time between ticks. They only update buffered
//! state here; the simulation reads that state once per tick through
//! [`InputAggregator::take_intent`], so a single tick never observes a
//! half-applied burst of events.

use std::collections::HashSet;

use glam::Vec2;
use mobile_strike_core::{
    InputEvent, Intent, Key, PointerId, ScreenSize, TouchLayout, TouchRegion, Tuning, Weapon,
};

/// Player facts that decide how a new contact is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputContext {
    /// Equipped weapon; the reload button only responds to the gun.
    pub weapon: Weapon,
    /// Dead players cannot claim or drag contacts.
    pub alive: bool,
}

/// Configuration parameters required to construct the aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    layout: TouchLayout,
    look_sensitivity: f32,
    look_damping: f32,
    look_rest_threshold: f32,
    dead_zone: f32,
}

impl Config {
    /// Derives the control layout and look parameters for the provided surface.
    #[must_use]
    pub fn new(screen: ScreenSize, tuning: &Tuning) -> Self {
        Self {
            layout: TouchLayout::new(screen, tuning),
            look_sensitivity: tuning.look_sensitivity,
            look_damping: tuning.look_damping,
            look_rest_threshold: tuning.look_rest_threshold,
            dead_zone: tuning.joystick_dead_zone(),
        }
    }
}

/// Active joystick contact, as drawn by touch overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickContact {
    id: PointerId,
    center: Vec2,
    handle: Vec2,
}

impl JoystickContact {
    /// Point where the contact started; the centre of the base ring.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Handle position, clamped to the base radius.
    #[must_use]
    pub const fn handle(&self) -> Vec2 {
        self.handle
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LookContact {
    id: PointerId,
    last: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Latched {
    fire: bool,
    reload: bool,
    select_weapon: Option<Weapon>,
    toggle_weapon: bool,
    toggle_mute: bool,
    first_interaction: bool,
}

/// Folds raw input into intents, tracking each pointer contact by role.
#[derive(Debug)]
pub struct InputAggregator {
    config: Config,
    held: HashSet<Key>,
    joystick: Option<JoystickContact>,
    look: Option<LookContact>,
    shoot: Option<PointerId>,
    look_delta: f32,
    latched: Latched,
    interacted: bool,
}

impl InputAggregator {
    /// Creates an aggregator with no held keys and no active contacts.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            held: HashSet::new(),
            joystick: None,
            look: None,
            shoot: None,
            look_delta: 0.0,
            latched: Latched::default(),
            interacted: false,
        }
    }

    /// Placement of the on-screen controls.
    #[must_use]
    pub const fn layout(&self) -> &TouchLayout {
        &self.config.layout
    }

    /// Joystick contact currently held, if any.
    #[must_use]
    pub const fn joystick(&self) -> Option<JoystickContact> {
        self.joystick
    }

    /// Reports whether a contact is holding the shoot button.
    #[must_use]
    pub const fn is_shoot_held(&self) -> bool {
        self.shoot.is_some()
    }

    /// Buffers a single raw event.
    pub fn handle(&mut self, event: InputEvent, context: InputContext) {
        match event {
            InputEvent::KeyDown(key) => {
                self.note_interaction();
                let _ = self.held.insert(key);
                match key {
                    Key::Fire => self.latched.fire = true,
                    Key::Reload => self.latched.reload = true,
                    Key::SelectGun => self.latched.select_weapon = Some(Weapon::Gun),
                    Key::SelectKnife => self.latched.select_weapon = Some(Weapon::Knife),
                    Key::ToggleMute => self.latched.toggle_mute = true,
                    _ => {}
                }
            }
            InputEvent::KeyUp(key) => {
                let _ = self.held.remove(&key);
            }
            InputEvent::PointerDown { id, position } => {
                self.note_interaction();
                if context.alive {
                    self.claim(id, position, context.weapon);
                }
            }
            InputEvent::PointerMove { id, position } => {
                if context.alive {
                    self.drag(id, position);
                }
            }
            InputEvent::PointerUp { id } | InputEvent::PointerCancel { id } => self.release(id),
        }
    }

    /// Produces the intent for the next tick and clears every latched tap.
    pub fn take_intent(&mut self) -> Intent {
        let latched = std::mem::take(&mut self.latched);
        let held = |key| self.held.contains(&key);

        let select_weapon = latched.select_weapon.or(if held(Key::SelectGun) {
            Some(Weapon::Gun)
        } else if held(Key::SelectKnife) {
            Some(Weapon::Knife)
        } else {
            None
        });

        let intent = Intent {
            forward: held(Key::Forward),
            backward: held(Key::Backward),
            strafe_left: held(Key::StrafeLeft),
            strafe_right: held(Key::StrafeRight),
            turn_left: held(Key::TurnLeft),
            turn_right: held(Key::TurnRight),
            joystick: self.joystick_deflection(),
            look_rotation: 0.0,
            fire: latched.fire || held(Key::Fire) || self.shoot.is_some(),
            reload: latched.reload || held(Key::Reload),
            select_weapon,
            toggle_weapon: latched.toggle_weapon,
            toggle_mute: latched.toggle_mute,
            first_interaction: latched.first_interaction,
        };

        Intent {
            look_rotation: self.drain_look(),
            ..intent
        }
    }

    fn note_interaction(&mut self) {
        if !self.interacted {
            self.interacted = true;
            self.latched.first_interaction = true;
        }
    }

    fn claim(&mut self, id: PointerId, position: Vec2, weapon: Weapon) {
        let region = self
            .config
            .layout
            .classify(position, weapon == Weapon::Gun);
        match region {
            TouchRegion::Joystick => {
                if self.joystick.is_none() {
                    self.joystick = Some(JoystickContact {
                        id,
                        center: position,
                        handle: position,
                    });
                }
            }
            TouchRegion::SwitchWeapon => self.latched.toggle_weapon = true,
            TouchRegion::Reload => self.latched.reload = true,
            TouchRegion::Shoot if self.shoot.is_none() => self.shoot = Some(id),
            TouchRegion::Shoot | TouchRegion::Look => {
                if self.look.is_none() {
                    self.look = Some(LookContact { id, last: position });
                    self.look_delta = 0.0;
                }
            }
        }
    }

    fn drag(&mut self, id: PointerId, position: Vec2) {
        let base_radius = self.config.layout.joystick_base_radius;
        if let Some(joystick) = self.joystick.as_mut().filter(|contact| contact.id == id) {
            let offset = (position - joystick.center).clamp_length_max(base_radius);
            joystick.handle = joystick.center + offset;
        } else if let Some(look) = self.look.as_mut().filter(|contact| contact.id == id) {
            self.look_delta += position.x - look.last.x;
            look.last = position;
        }
    }

    fn release(&mut self, id: PointerId) {
        if self.joystick.is_some_and(|contact| contact.id == id) {
            self.joystick = None;
        } else if self.look.is_some_and(|contact| contact.id == id) {
            self.look = None;
        } else if self.shoot == Some(id) {
            self.shoot = None;
        }
    }

    fn joystick_deflection(&self) -> Option<Vec2> {
        let contact = self.joystick?;
        let offset = contact.handle - contact.center;
        let distance = offset.length();
        if distance <= self.config.dead_zone {
            return None;
        }
        let magnitude = (distance / self.config.layout.joystick_base_radius).min(1.0);
        Some(offset / distance * magnitude)
    }

    /// Converts the accumulated drag into a rotation, then resets the delta
    /// while the finger is down or damps it once the finger has lifted.
    fn drain_look(&mut self) -> f32 {
        let held = self.look.is_some();
        if !held && self.look_delta.abs() <= self.config.look_rest_threshold {
            return 0.0;
        }

        let rotation = -self.look_delta * self.config.look_sensitivity;
        if held {
            self.look_delta = 0.0;
        } else {
            self.look_delta *= self.config.look_damping;
        }
        rotation
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that turns an intent into one movement and one rotation request.

use glam::Vec2;
use mobile_strike_core::{Command, Intent, Tuning};
use mobile_strike_world::Player;

/// Pure system that combines keyboard, joystick, and look input.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    move_speed: f32,
    joystick_speed: f32,
    rotation_speed: f32,
}

impl Movement {
    /// Creates the system from the movement constants.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            joystick_speed: tuning.move_speed * tuning.joystick_speed_factor,
            rotation_speed: tuning.rotation_speed,
        }
    }

    /// Emits at most one `MovePlayer` followed by at most one `RotatePlayer`.
    ///
    /// Keys move along the facing direction and camera plane; the joystick's
    /// screen-space deflection is projected onto the same axes, with screen-up
    /// meaning forward.
    pub fn handle(&self, intent: &Intent, player: &Player, out: &mut Vec<Command>) {
        let camera = player.camera();
        let mut delta = Vec2::ZERO;
        let mut moving = false;

        for (held, axis) in [
            (intent.forward, camera.direction),
            (intent.backward, -camera.direction),
            (intent.strafe_left, -camera.plane),
            (intent.strafe_right, camera.plane),
        ] {
            if held {
                delta += axis * self.move_speed;
                moving = true;
            }
        }

        if let Some(stick) = intent.joystick {
            let forward = -stick.y * self.joystick_speed;
            let strafe = stick.x * self.joystick_speed;
            delta += camera.direction * forward + camera.plane * strafe;
            moving = true;
        }

        if moving {
            out.push(Command::MovePlayer { delta });
        }

        let mut angle = intent.look_rotation;
        if intent.turn_left {
            angle += self.rotation_speed;
        }
        if intent.turn_right {
            angle -= self.rotation_speed;
        }
        if angle != 0.0 {
            out.push(Command::RotatePlayer { angle });
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hostile AI system that decides pursuit, steps chasers, and requests attacks.

use mobile_strike_core::{Command, Tuning};
use mobile_strike_world::{Entity, HostileState, Player};

/// Pure system re-evaluating every living hostile once per tick.
#[derive(Clone, Copy, Debug)]
pub struct HostileAi {
    detection_range: f32,
    minimum_distance: f32,
    speed: f32,
    attack_range: f32,
}

impl HostileAi {
    /// Creates the system from the hostile constants.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            detection_range: tuning.detection_range,
            minimum_distance: tuning.minimum_pursuit_distance,
            speed: tuning.hostile_speed,
            attack_range: tuning.hostile_attack_range,
        }
    }

    /// Emits pursuit changes, chase steps, and attack attempts.
    ///
    /// A hostile pursues while the player is closer than the detection range
    /// but farther than the minimum distance. Distances are measured before
    /// the step, so the attack test uses the same reading as the pursuit test.
    pub fn handle(&self, player: &Player, entities: &[Entity], out: &mut Vec<Command>) {
        let target = player.position();
        let player_vulnerable = player.is_alive() && !player.is_immune();

        for entity in entities {
            let Some(hostile) = entity.as_hostile() else {
                continue;
            };
            if !hostile.is_targetable() {
                continue;
            }

            let offset = target - entity.position();
            let distance = offset.length();
            let pursuing = distance < self.detection_range && distance > self.minimum_distance;
            if pursuing != (hostile.state() == HostileState::Pursuing) {
                out.push(Command::SetHostilePursuit {
                    hostile: entity.id(),
                    pursuing,
                });
            }
            if !pursuing {
                continue;
            }

            out.push(Command::StepHostile {
                hostile: entity.id(),
                delta: offset / distance * self.speed,
            });
            if player_vulnerable
                && distance < self.attack_range
                && hostile.attack_cooldown() == 0
            {
                out.push(Command::HostileAttack {
                    hostile: entity.id(),
                });
            }
        }
    }
}

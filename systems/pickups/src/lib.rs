#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pickup system that requests healing when the player stands on a medkit.

use mobile_strike_core::{Command, Tuning};
use mobile_strike_world::{Entity, Player};

/// Pure system emitting consumption requests for reachable pickups.
#[derive(Clone, Copy, Debug)]
pub struct Pickups {
    range: f32,
}

impl Pickups {
    /// Creates the system from the pickup constants.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            range: tuning.pickup_range,
        }
    }

    /// Emits a [`Command::ConsumePickup`] for the nearest available pickup in range.
    ///
    /// A player at full health leaves pickups where they are.
    pub fn handle(&self, player: &Player, entities: &[Entity], out: &mut Vec<Command>) {
        if !player.is_alive() || player.health() >= player.max_health() {
            return;
        }

        let origin = player.position();
        let nearest = entities
            .iter()
            .filter(|entity| entity.as_pickup().is_some_and(|pickup| pickup.is_available()))
            .map(|entity| (entity.id(), entity.position().distance(origin)))
            .filter(|&(_, distance)| distance < self.range)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((pickup, _)) = nearest {
            out.push(Command::ConsumePickup { pickup });
        }
    }
}

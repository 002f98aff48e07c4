#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat system that requests reloads and weapon swaps and resolves attack targets.

use mobile_strike_core::{Camera, Command, EntityId, Intent, ScreenSize, Tuning, Weapon};
use mobile_strike_world::{Entity, Player};

/// Pure system translating attack intent into world commands.
#[derive(Clone, Copy, Debug)]
pub struct Combat {
    screen: ScreenSize,
    knife_range: f32,
}

impl Combat {
    /// Creates the system for the provided render surface.
    #[must_use]
    pub fn new(screen: ScreenSize, tuning: &Tuning) -> Self {
        Self {
            screen,
            knife_range: tuning.knife_range,
        }
    }

    /// Emits reload, weapon-switch and attack requests for a living player.
    pub fn handle(
        &self,
        intent: &Intent,
        player: &Player,
        entities: &[Entity],
        out: &mut Vec<Command>,
    ) {
        if intent.reload && player.weapon() == Weapon::Gun {
            out.push(Command::StartReload);
        }
        if let Some(weapon) = intent.select_weapon {
            out.push(Command::SwitchWeapon { weapon });
        }
        if intent.toggle_weapon {
            out.push(Command::SwitchWeapon {
                weapon: player.weapon().other(),
            });
        }

        if !intent.fire {
            return;
        }
        match player.weapon() {
            Weapon::Gun => out.push(Command::FireWeapon {
                target: ranged_target(player.camera(), entities, self.screen),
            }),
            Weapon::Knife => out.push(Command::SwingMelee {
                targets: melee_targets(player, entities, self.knife_range),
            }),
        }
    }
}

/// Selects the hostile a hitscan shot lands on.
///
/// A hostile is eligible when its projected half-width strictly contains the
/// centre column; among eligible hostiles the smallest camera depth wins, and
/// the lower id wins a tie.
#[must_use]
pub fn ranged_target(camera: &Camera, entities: &[Entity], screen: ScreenSize) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for entity in entities {
        if !entity.as_hostile().is_some_and(|hostile| hostile.is_targetable()) {
            continue;
        }
        let Some(depth) = camera.crosshair_depth(entity.position(), screen) else {
            continue;
        };
        if best.map_or(true, |(_, nearest)| depth < nearest) {
            best = Some((entity.id(), depth));
        }
    }
    best.map(|(id, _)| id)
}

/// Lists every hostile a knife swing reaches.
#[must_use]
pub fn melee_targets(player: &Player, entities: &[Entity], reach: f32) -> Vec<EntityId> {
    let origin = player.position();
    entities
        .iter()
        .filter(|entity| {
            entity
                .as_hostile()
                .is_some_and(|hostile| hostile.is_targetable())
                && entity.position().distance(origin) < reach
        })
        .map(Entity::id)
        .collect()
}

//! Translates world queries into the renderer's scene description.

use mobile_strike_core::SoundSink;
use mobile_strike_rendering::{
    HostilePose, JoystickView, Scene, SceneEntity, SceneEntityKind, ScenePlayer, SceneSwitch,
    TouchControls,
};
use mobile_strike_simulation::GameLoop;
use mobile_strike_system_input::InputAggregator;
use mobile_strike_world::{query, Entity, HostileState, LifeState, Player};

/// Builds the scene for the current world state.
///
/// Touch controls are included once the backend has seen a touch contact.
pub(crate) fn populate<S: SoundSink>(game: &GameLoop<S>, touch_active: bool) -> Scene {
    let world = game.simulation().world();
    let mut scene = Scene::new(
        query::tile_map(world).clone(),
        scene_player(query::player(world)),
    );
    scene.tick = query::tick(world);
    scene.entities = query::entities(world)
        .iter()
        .filter_map(scene_entity)
        .collect();
    if touch_active {
        scene.touch = Some(touch_controls(game.input()));
    }
    scene
}

fn scene_player(player: &Player) -> ScenePlayer {
    let timers = player.timers();
    let mut scene = ScenePlayer::new(*player.camera(), player.max_health(), player.max_ammo());
    scene.health = player.health();
    scene.ammo = player.ammo();
    scene.score = player.score();
    scene.weapon = player.weapon();
    scene.respawn_in = match player.life() {
        LifeState::Alive => None,
        LifeState::Dead { respawn_in } => Some(respawn_in),
    };
    scene.immune = player.is_immune();
    scene.reload_remaining = player.reload();
    scene.switch = player.switch().map(|switch| SceneSwitch {
        remaining: switch.remaining(),
        previous: switch.previous(),
    });
    scene.recoil = player.recoil();
    scene.moving = player.is_moving();
    scene.muzzle_flash = timers.muzzle_flash();
    scene.slash = timers.slash();
    scene.damage_flash = timers.damage_flash();
    scene.empty_click = timers.empty_click();
    scene.ammo_blink = timers.ammo_blink();
    scene
}

fn scene_entity(entity: &Entity) -> Option<SceneEntity> {
    let kind = if let Some(hostile) = entity.as_hostile() {
        let pose = match hostile.state() {
            HostileState::Idle => HostilePose::Idle,
            HostileState::Pursuing => HostilePose::Chasing,
            HostileState::Expiring { remaining } => HostilePose::Expiring { remaining },
            HostileState::Inactive { .. } => return None,
        };
        SceneEntityKind::Hostile {
            name: hostile.name().to_owned(),
            health: hostile.health(),
            pose,
        }
    } else if entity.as_pickup()?.is_available() {
        SceneEntityKind::Medkit
    } else {
        return None;
    };
    Some(SceneEntity {
        position: entity.position(),
        kind,
    })
}

fn touch_controls(input: &InputAggregator) -> TouchControls {
    TouchControls {
        layout: *input.layout(),
        joystick: input.joystick().map(|contact| JoystickView {
            center: contact.center(),
            handle: contact.handle(),
        }),
        shoot_held: input.is_shoot_held(),
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Mobile Strike.
//!
//! The world owns the tile map, the player, and the entity store. Every
//! mutation flows through [`apply`], which re-checks the guards of the
//! requested action before touching state, so repeated or stale commands are
//! harmless no-ops.

mod entity;
mod layout;
mod player;

use glam::Vec2;
use mobile_strike_core::{
    Camera, Command, DamageSource, EntityId, Event, MapError, TileMap, Tuning, Weapon,
    LOGICAL_SCREEN,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub use entity::{Entity, EntityKind, Hostile, HostileState, Pickup, PickupState};
pub use layout::Layout;
pub use player::{LifeState, Player, PlayerTimers, WeaponSwitch};

/// Seed used to shuffle hostile names when the caller has no preference.
pub const DEFAULT_NAME_SEED: u64 = 0x5eed_0f_c1_7e5;

/// Reasons a layout cannot be turned into a world.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WorldError {
    /// The tile grid failed validation.
    #[error("invalid tile map: {0}")]
    Map(#[from] MapError),
    /// The spawn direction and camera plane are parallel.
    #[error("spawn camera basis is degenerate")]
    DegenerateCamera,
    /// The player would spawn inside a wall or outside the grid.
    #[error("spawn point {position} is not on an open tile")]
    BlockedSpawn {
        /// Offending spawn position.
        position: Vec2,
    },
    /// An entity origin lies outside the grid.
    #[error("entity origin {position} lies outside the map")]
    OriginOutOfBounds {
        /// Offending origin.
        position: Vec2,
    },
}

/// Represents the authoritative Mobile Strike world state.
#[derive(Clone, Debug)]
pub struct World {
    map: TileMap,
    spawn: Camera,
    player: Player,
    entities: Vec<Entity>,
    tick: u64,
    tuning: Tuning,
}

impl World {
    /// Builds a world from a layout, validating its geometry.
    ///
    /// Hostile names are drawn from the layout roster after a shuffle seeded
    /// with `seed`, so equal seeds produce equal worlds.
    pub fn new(layout: Layout, tuning: Tuning, seed: u64) -> Result<Self, WorldError> {
        let map = TileMap::new(&layout.tiles)?;
        let spawn = layout.spawn;
        if spawn.direction.perp_dot(spawn.plane).abs() <= f32::EPSILON {
            return Err(WorldError::DegenerateCamera);
        }
        if !map.is_open_at(spawn.position.x, spawn.position.y) {
            return Err(WorldError::BlockedSpawn {
                position: spawn.position,
            });
        }
        for &origin in layout.hostile_origins.iter().chain(&layout.pickup_origins) {
            if !within_bounds(&map, origin) {
                return Err(WorldError::OriginOutOfBounds { position: origin });
            }
            if !map.is_open_at(origin.x, origin.y) {
                warn!(%origin, "entity origin sits inside a wall");
            }
        }

        let mut roster = layout.roster;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        roster.shuffle(&mut rng);

        let mut entities =
            Vec::with_capacity(layout.hostile_origins.len() + layout.pickup_origins.len());
        let mut next_id = 0;
        for (index, origin) in layout.hostile_origins.into_iter().enumerate() {
            let name = match roster.get(index % roster.len().max(1)) {
                Some(name) => name.clone(),
                None => format!("Hostile {}", index + 1),
            };
            entities.push(Entity::hostile(
                EntityId::new(next_id),
                origin,
                name,
                tuning.hostile_health,
            ));
            next_id += 1;
        }
        for origin in layout.pickup_origins {
            entities.push(Entity::pickup(EntityId::new(next_id), origin));
            next_id += 1;
        }

        info!(
            columns = map.columns(),
            rows = map.rows(),
            entities = entities.len(),
            seed,
            "world constructed"
        );

        let player = Player::spawn(
            spawn,
            tuning.player_max_health,
            tuning.max_ammo,
            tuning.spawn_immunity_duration,
        );
        Ok(Self {
            map,
            spawn,
            player,
            entities,
            tick: 0,
            tuning,
        })
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    fn advance_tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick = self.tick.saturating_add(1);
        out_events.push(Event::TickAdvanced { tick: self.tick });
        self.advance_player(out_events);
        self.advance_entities(out_events);
    }

    fn advance_player(&mut self, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        let player = &mut self.player;

        player.moving = false;
        player.timers.decay();
        if player.recoil > 0.0 {
            player.recoil *= tuning.recoil_damping;
        }

        if player.immunity > 0 {
            player.immunity -= 1;
            if player.immunity == 0 {
                out_events.push(Event::ImmunityExpired);
            }
        }

        if let Some(mut switch) = player.switch {
            switch.remaining = switch.remaining.saturating_sub(1);
            player.switch = (switch.remaining > 0).then_some(switch);
        }

        if let Some(remaining) = player.reload {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                player.reload = None;
                player.ammo = player.max_ammo;
                out_events.push(Event::ReloadCompleted { ammo: player.ammo });
            } else {
                let rack_at = tuning
                    .reload_duration
                    .checked_sub(tuning.reload_rack_delay);
                if rack_at == Some(remaining) {
                    out_events.push(Event::ReloadRacked);
                }
                player.reload = Some(remaining);
            }
        }

        if let LifeState::Dead { respawn_in } = player.life {
            let respawn_in = respawn_in.saturating_sub(1);
            if respawn_in == 0 {
                player.respawn(self.spawn, tuning.spawn_immunity_duration);
                debug!(tick = self.tick, "player respawned");
                out_events.push(Event::PlayerRespawned);
            } else {
                player.life = LifeState::Dead { respawn_in };
            }
        }
    }

    fn advance_entities(&mut self, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        for entity in &mut self.entities {
            match &mut entity.kind {
                EntityKind::Hostile(hostile) => {
                    hostile.attack_cooldown = hostile.attack_cooldown.saturating_sub(1);
                    match hostile.state {
                        HostileState::Expiring { remaining } => {
                            let remaining = remaining.saturating_sub(1);
                            hostile.state = if remaining == 0 {
                                out_events.push(Event::HostileExpired { hostile: entity.id });
                                HostileState::Inactive {
                                    respawn_in: tuning.hostile_respawn_duration,
                                }
                            } else {
                                HostileState::Expiring { remaining }
                            };
                        }
                        HostileState::Inactive { respawn_in } => {
                            let respawn_in = respawn_in.saturating_sub(1);
                            if respawn_in == 0 {
                                hostile.state = HostileState::Idle;
                                hostile.health = tuning.hostile_health;
                                entity.position = entity.origin;
                                debug!(hostile = entity.id.get(), "hostile respawned");
                                out_events.push(Event::EntityRespawned { entity: entity.id });
                            } else {
                                hostile.state = HostileState::Inactive { respawn_in };
                            }
                        }
                        HostileState::Idle | HostileState::Pursuing => {}
                    }
                }
                EntityKind::Pickup(pickup) => {
                    if let PickupState::Inactive { respawn_in } = pickup.state {
                        let respawn_in = respawn_in.saturating_sub(1);
                        if respawn_in == 0 {
                            pickup.state = PickupState::Idle;
                            entity.position = entity.origin;
                            out_events.push(Event::EntityRespawned { entity: entity.id });
                        } else {
                            pickup.state = PickupState::Inactive { respawn_in };
                        }
                    }
                }
            }
        }
    }

    fn move_player(&mut self, delta: Vec2, out_events: &mut Vec<Event>) {
        if !self.player.is_alive() {
            trace!("movement rejected: player is dead");
            return;
        }

        let stride = !self.player.moving
            && self.tick.checked_rem(self.tuning.footstep_interval) == Some(0);
        self.player.moving = true;
        self.player.camera.position = slide(&self.map, self.player.camera.position, delta);
        if stride {
            out_events.push(Event::Footstep);
        }
    }

    fn start_reload(&mut self, out_events: &mut Vec<Event>) {
        let player = &mut self.player;
        if !player.is_alive()
            || player.weapon != Weapon::Gun
            || player.ammo >= player.max_ammo
            || player.is_reloading()
            || player.is_switching()
        {
            trace!("reload rejected");
            return;
        }

        player.reload = Some(self.tuning.reload_duration);
        out_events.push(Event::ReloadStarted);
    }

    fn switch_weapon(&mut self, weapon: Weapon, out_events: &mut Vec<Event>) {
        let player = &mut self.player;
        if !player.is_alive() || player.is_switching() || player.weapon == weapon {
            trace!(?weapon, "weapon switch rejected");
            return;
        }

        let from = player.weapon;
        player.switch = Some(WeaponSwitch {
            remaining: self.tuning.switch_duration,
            previous: from,
        });
        player.weapon = weapon;
        out_events.push(Event::WeaponSwitched { from, to: weapon });
    }

    fn fire_weapon(&mut self, target: Option<EntityId>, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        if !player.is_alive()
            || player.weapon != Weapon::Gun
            || player.is_switching()
            || player.is_reloading()
        {
            trace!("trigger pull rejected");
            return;
        }

        if player.ammo > 0 && player.timers.fire_cooldown == 0 {
            player.ammo -= 1;
            player.timers.fire_cooldown = tuning.fire_cooldown;
            player.timers.muzzle_flash = tuning.muzzle_flash_duration;
            player.recoil = tuning.recoil_kick;
            out_events.push(Event::ShotFired { ammo: player.ammo });

            let camera = player.camera;
            let damage = tuning.gun_damage;
            let points = tuning.score_per_kill;
            let Some(target) = target else {
                return;
            };
            let under_crosshair = self.entities.iter().any(|entity| {
                entity.id == target
                    && camera
                        .crosshair_depth(entity.position, LOGICAL_SCREEN)
                        .is_some()
            });
            if !under_crosshair {
                trace!(target = target.get(), "shot target is not under the crosshair");
                return;
            }
            if self.damage_hostile(target, damage, DamageSource::Ranged, out_events) == Some(true)
            {
                self.award(points, out_events);
            }
        } else if player.ammo == 0 && player.timers.empty_click_cooldown == 0 {
            player.timers.empty_click_cooldown = tuning.fire_cooldown;
            player.timers.empty_click = tuning.empty_click_duration;
            player.timers.ammo_blink = tuning.ammo_blink_duration;
            out_events.push(Event::DryFired);
        }
    }

    fn swing_melee(&mut self, mut targets: Vec<EntityId>, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        if !player.is_alive()
            || player.weapon != Weapon::Knife
            || player.is_switching()
            || player.timers.melee_cooldown > 0
        {
            trace!("melee swing rejected");
            return;
        }

        player.timers.melee_cooldown = tuning.melee_cooldown;
        player.timers.slash = tuning.slash_duration();
        out_events.push(Event::MeleeSwung);

        let origin = player.position();
        let reach = tuning.knife_range;
        let damage = tuning.knife_damage;
        let points = tuning.score_per_kill;

        targets.sort_unstable();
        targets.dedup();
        let mut kills = 0;
        let mut hits = 0;
        for target in targets {
            let in_reach = self
                .entities
                .iter()
                .any(|entity| entity.id == target && entity.position.distance(origin) < reach);
            if !in_reach {
                continue;
            }
            match self.damage_hostile(target, damage, DamageSource::Melee, out_events) {
                Some(true) => kills += 1,
                Some(false) => hits += 1,
                None => {}
            }
        }

        self.award(points.saturating_mul(kills), out_events);
        out_events.push(Event::MeleeResolved { kills, hits });
    }

    /// Returns `Some(true)` on a kill, `Some(false)` on a survivable hit and
    /// `None` when the target cannot be damaged.
    fn damage_hostile(
        &mut self,
        id: EntityId,
        damage: u32,
        source: DamageSource,
        out_events: &mut Vec<Event>,
    ) -> Option<bool> {
        let death_duration = self.tuning.death_duration;
        let entity = self.entity_mut(id)?;
        let EntityKind::Hostile(hostile) = &mut entity.kind else {
            return None;
        };
        if !hostile.is_targetable() {
            return None;
        }

        hostile.health = hostile.health.saturating_sub(damage);
        if hostile.health == 0 {
            hostile.state = HostileState::Expiring {
                remaining: death_duration,
            };
            debug!(hostile = id.get(), ?source, "hostile killed");
            out_events.push(Event::HostileKilled {
                hostile: id,
                source,
            });
            Some(true)
        } else {
            out_events.push(Event::HostileDamaged {
                hostile: id,
                health: hostile.health,
                source,
            });
            Some(false)
        }
    }

    fn award(&mut self, points: u32, out_events: &mut Vec<Event>) {
        if points == 0 {
            return;
        }
        self.player.score = self.player.score.saturating_add(points);
        out_events.push(Event::ScoreChanged {
            score: self.player.score,
        });
    }

    fn consume_pickup(&mut self, id: EntityId, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        if !player.is_alive() || player.health >= player.max_health {
            trace!(pickup = id.get(), "pickup rejected");
            return;
        }

        let origin = player.position();
        let Some(entity) = self.entities.iter_mut().find(|entity| entity.id == id) else {
            return;
        };
        if entity.position.distance(origin) >= tuning.pickup_range {
            return;
        }
        let EntityKind::Pickup(pickup) = &mut entity.kind else {
            return;
        };
        if !pickup.is_available() {
            return;
        }

        pickup.state = PickupState::Inactive {
            respawn_in: tuning.pickup_respawn_duration,
        };
        player.health = player
            .health
            .saturating_add(tuning.pickup_heal)
            .min(player.max_health);
        out_events.push(Event::PickupConsumed {
            pickup: id,
            health: player.health,
        });
    }

    fn set_pursuit(&mut self, id: EntityId, pursuing: bool) {
        let Some(entity) = self.entity_mut(id) else {
            return;
        };
        if let EntityKind::Hostile(hostile) = &mut entity.kind {
            if hostile.is_targetable() {
                hostile.state = if pursuing {
                    HostileState::Pursuing
                } else {
                    HostileState::Idle
                };
            }
        }
    }

    fn step_hostile(&mut self, id: EntityId, delta: Vec2) {
        let map = &self.map;
        let Some(entity) = self.entities.iter_mut().find(|entity| entity.id == id) else {
            return;
        };
        let pursuing = matches!(
            entity.kind,
            EntityKind::Hostile(Hostile {
                state: HostileState::Pursuing,
                ..
            })
        );
        if pursuing {
            entity.position = slide(map, entity.position, delta);
        }
    }

    fn hostile_attack(&mut self, id: EntityId, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        if !player.is_alive() || player.is_immune() {
            trace!(hostile = id.get(), "attack rejected: player is dead or immune");
            return;
        }

        let target = player.position();
        let Some(entity) = self.entities.iter_mut().find(|entity| entity.id == id) else {
            return;
        };
        if entity.position.distance(target) >= tuning.hostile_attack_range {
            return;
        }
        let EntityKind::Hostile(hostile) = &mut entity.kind else {
            return;
        };
        if hostile.state != HostileState::Pursuing || hostile.attack_cooldown > 0 {
            return;
        }

        hostile.attack_cooldown = tuning.hostile_attack_cooldown;
        player.health = player.health.saturating_sub(tuning.hostile_damage);
        player.timers.damage_flash = tuning.damage_flash_duration;
        out_events.push(Event::PlayerDamaged {
            hostile: id,
            health: player.health,
        });

        if player.health == 0 {
            player.life = LifeState::Dead {
                respawn_in: tuning.player_respawn_duration,
            };
            debug!(hostile = id.get(), score = player.score, "player died");
            out_events.push(Event::PlayerDied);
        }
    }
}

/// Moves `from` by `delta` one axis at a time, skipping any axis whose
/// destination tile is a wall.
fn slide(map: &TileMap, from: Vec2, delta: Vec2) -> Vec2 {
    let mut to = from;
    if map.is_open_at(to.x + delta.x, to.y) {
        to.x += delta.x;
    }
    if map.is_open_at(to.x, to.y + delta.y) {
        to.y += delta.y;
    }
    to
}

fn within_bounds(map: &TileMap, point: Vec2) -> bool {
    point.x >= 0.0
        && point.y >= 0.0
        && point.x < map.columns() as f32
        && point.y < map.rows() as f32
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.advance_tick(out_events),
        Command::MovePlayer { delta } => world.move_player(delta, out_events),
        Command::RotatePlayer { angle } => {
            if world.player.is_alive() {
                world.player.camera = world.player.camera.rotated(angle);
            }
        }
        Command::StartReload => world.start_reload(out_events),
        Command::SwitchWeapon { weapon } => world.switch_weapon(weapon, out_events),
        Command::FireWeapon { target } => world.fire_weapon(target, out_events),
        Command::SwingMelee { targets } => world.swing_melee(targets, out_events),
        Command::ConsumePickup { pickup } => world.consume_pickup(pickup, out_events),
        Command::SetHostilePursuit { hostile, pursuing } => world.set_pursuit(hostile, pursuing),
        Command::StepHostile { hostile, delta } => world.step_hostile(hostile, delta),
        Command::HostileAttack { hostile } => world.hostile_attack(hostile, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use mobile_strike_core::{Camera, EntityId, TileMap, Tuning};

    use super::{Entity, Player, World};

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Lists every entity in id order.
    #[must_use]
    pub fn entities(world: &World) -> &[Entity] {
        &world.entities
    }

    /// Looks up a single entity.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<&Entity> {
        world.entities.iter().find(|entity| entity.id() == id)
    }

    /// Provides read-only access to the validated tile map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.map
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Gameplay constants the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Camera the player respawns with.
    #[must_use]
    pub fn spawn(world: &World) -> &Camera {
        &world.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(hostiles: &[(f32, f32)], pickups: &[(f32, f32)]) -> Layout {
        let mut tiles = vec![vec![0; 16]; 16];
        for (row, line) in tiles.iter_mut().enumerate() {
            for (column, tile) in line.iter_mut().enumerate() {
                if row == 0 || column == 0 || row == 15 || column == 15 {
                    *tile = 1;
                }
            }
        }
        Layout {
            tiles,
            spawn: Camera::new(
                Vec2::new(8.5, 8.5),
                Vec2::new(-1.0, 0.0),
                Vec2::new(0.0, 0.66),
            ),
            hostile_origins: hostiles.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            pickup_origins: pickups.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            roster: vec!["Vex".to_owned(), "Jynx".to_owned()],
        }
    }

    fn world_with(layout: Layout, tuning: Tuning) -> World {
        World::new(layout, tuning, DEFAULT_NAME_SEED).expect("valid layout")
    }

    fn tick(world: &mut World, events: &mut Vec<Event>) {
        apply(world, Command::Tick, events);
    }

    fn hostile(world: &World, id: u32) -> &Hostile {
        query::entity(world, EntityId::new(id))
            .and_then(Entity::as_hostile)
            .expect("hostile exists")
    }

    #[test]
    fn city_layout_populates_hostiles_then_pickups() {
        let world = world_with(Layout::city(), Tuning::default());
        let entities = query::entities(&world);

        assert_eq!(entities.len(), 13);
        assert!(entities[..8].iter().all(|entity| entity.as_hostile().is_some()));
        assert!(entities[8..].iter().all(|entity| entity.as_pickup().is_some()));
        assert_eq!(entities[8].id(), EntityId::new(8));
        assert_eq!(query::tile_map(&world).columns(), 24);
    }

    #[test]
    fn name_shuffle_is_deterministic_per_seed() {
        let names = |seed| {
            let world = World::new(Layout::city(), Tuning::default(), seed).expect("city");
            query::entities(&world)
                .iter()
                .filter_map(Entity::as_hostile)
                .map(|hostile| hostile.name().to_owned())
                .collect::<Vec<_>>()
        };

        assert_eq!(names(3), names(3));
        assert_eq!(names(3).len(), 8);
    }

    #[test]
    fn open_border_is_rejected() {
        let mut layout = arena(&[], &[]);
        layout.tiles[0][4] = 0;

        let error = World::new(layout, Tuning::default(), 0).expect_err("open border");
        assert!(matches!(error, WorldError::Map(MapError::OpenBorder { .. })));
    }

    #[test]
    fn spawn_inside_wall_is_rejected() {
        let mut layout = arena(&[], &[]);
        layout.tiles[8][8] = 3;

        let error = World::new(layout, Tuning::default(), 0).expect_err("blocked spawn");
        assert_eq!(
            error,
            WorldError::BlockedSpawn {
                position: Vec2::new(8.5, 8.5),
            }
        );
    }

    #[test]
    fn origins_outside_the_map_are_rejected() {
        let layout = arena(&[(40.0, 2.0)], &[]);

        let error = World::new(layout, Tuning::default(), 0).expect_err("out of bounds");
        assert!(matches!(error, WorldError::OriginOutOfBounds { .. }));
    }

    #[test]
    fn switching_to_the_equipped_weapon_is_a_no_op() {
        let mut world = world_with(arena(&[], &[]), Tuning::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SwitchWeapon {
                weapon: Weapon::Gun,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(!query::player(&world).is_switching());
    }

    #[test]
    fn switch_locks_further_switches_until_it_completes() {
        let tuning = Tuning::default();
        let duration = tuning.switch_duration;
        let mut world = world_with(arena(&[], &[]), tuning);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SwitchWeapon {
                weapon: Weapon::Knife,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SwitchWeapon {
                weapon: Weapon::Gun,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::WeaponSwitched {
                from: Weapon::Gun,
                to: Weapon::Knife,
            }]
        );
        assert_eq!(query::player(&world).weapon(), Weapon::Knife);

        for _ in 0..duration {
            tick(&mut world, &mut events);
        }
        assert!(!query::player(&world).is_switching());
    }

    #[test]
    fn reload_racks_midway_and_refills_on_completion() {
        let tuning = Tuning::default();
        let duration = tuning.reload_duration;
        let rack_delay = tuning.reload_rack_delay;
        let mut world = world_with(arena(&[], &[]), tuning);
        let mut events = Vec::new();

        apply(&mut world, Command::FireWeapon { target: None }, &mut events);
        apply(&mut world, Command::StartReload, &mut events);
        apply(&mut world, Command::StartReload, &mut events);
        assert_eq!(
            events,
            vec![Event::ShotFired { ammo: 29 }, Event::ReloadStarted]
        );

        let mut racked_at = None;
        let mut completed_at = None;
        for elapsed in 1..=duration {
            events.clear();
            tick(&mut world, &mut events);
            if events.contains(&Event::ReloadRacked) {
                racked_at = Some(elapsed);
            }
            if events.contains(&Event::ReloadCompleted { ammo: 30 }) {
                completed_at = Some(elapsed);
            }
        }

        assert_eq!(racked_at, Some(rack_delay));
        assert_eq!(completed_at, Some(duration));
        assert_eq!(query::player(&world).ammo(), 30);
    }

    #[test]
    fn full_magazine_cannot_reload() {
        let mut world = world_with(arena(&[], &[]), Tuning::default());
        let mut events = Vec::new();

        apply(&mut world, Command::StartReload, &mut events);

        assert!(events.is_empty());
        assert!(!query::player(&world).is_reloading());
    }

    #[test]
    fn dry_fire_is_gated_by_its_own_cooldown() {
        let tuning = Tuning {
            max_ammo: 1,
            ..Tuning::default()
        };
        let cooldown = tuning.fire_cooldown;
        let mut world = world_with(arena(&[], &[]), tuning);
        let mut events = Vec::new();

        apply(&mut world, Command::FireWeapon { target: None }, &mut events);
        for _ in 0..cooldown {
            tick(&mut world, &mut events);
        }
        events.clear();

        apply(&mut world, Command::FireWeapon { target: None }, &mut events);
        apply(&mut world, Command::FireWeapon { target: None }, &mut events);

        assert_eq!(events, vec![Event::DryFired]);
        let timers = *query::player(&world).timers();
        assert_eq!(timers.ammo_blink(), 30);
        assert_eq!(timers.empty_click(), 10);
        assert_eq!(query::player(&world).ammo(), 0);
    }

    #[test]
    fn shot_damages_the_hostile_under_the_crosshair() {
        let mut world = world_with(arena(&[(5.5, 8.5)], &[]), Tuning::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::FireWeapon {
                target: Some(EntityId::new(0)),
            },
            &mut events,
        );

        assert_eq!(hostile(&world, 0).health(), 1);
        assert!(events.contains(&Event::HostileDamaged {
            hostile: EntityId::new(0),
            health: 1,
            source: DamageSource::Ranged,
        }));
    }

    #[test]
    fn shot_ignores_targets_off_the_crosshair() {
        let mut world = world_with(arena(&[(8.5, 3.5)], &[]), Tuning::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::FireWeapon {
                target: Some(EntityId::new(0)),
            },
            &mut events,
        );

        assert_eq!(hostile(&world, 0).health(), 2);
        assert_eq!(events, vec![Event::ShotFired { ammo: 29 }]);
    }

    #[test]
    fn hostile_lifecycle_round_trips_to_origin() {
        let tuning = Tuning {
            knife_damage: 5,
            ..Tuning::default()
        };
        let death = tuning.death_duration;
        let respawn = tuning.hostile_respawn_duration;
        let mut world = world_with(arena(&[(7.5, 8.5)], &[]), tuning);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SwitchWeapon {
                weapon: Weapon::Knife,
            },
            &mut events,
        );
        world.player.switch = None;
        apply(
            &mut world,
            Command::SetHostilePursuit {
                hostile: EntityId::new(0),
                pursuing: true,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::StepHostile {
                hostile: EntityId::new(0),
                delta: Vec2::new(0.25, 0.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SwingMelee {
                targets: vec![EntityId::new(0)],
            },
            &mut events,
        );
        assert_eq!(
            hostile(&world, 0).state(),
            HostileState::Expiring { remaining: death }
        );

        for _ in 1..death {
            tick(&mut world, &mut events);
        }
        assert!(matches!(
            hostile(&world, 0).state(),
            HostileState::Expiring { .. }
        ));
        tick(&mut world, &mut events);
        assert_eq!(
            hostile(&world, 0).state(),
            HostileState::Inactive {
                respawn_in: respawn
            }
        );

        for _ in 1..respawn {
            tick(&mut world, &mut events);
        }
        assert!(matches!(
            hostile(&world, 0).state(),
            HostileState::Inactive { .. }
        ));
        tick(&mut world, &mut events);

        let entity = query::entity(&world, EntityId::new(0)).expect("hostile");
        assert_eq!(hostile(&world, 0).state(), HostileState::Idle);
        assert_eq!(hostile(&world, 0).health(), 2);
        assert_eq!(entity.position(), entity.origin());
    }

    #[test]
    fn melee_kills_and_hits_every_hostile_in_reach() {
        let mut world = world_with(
            arena(&[(7.5, 8.5), (9.5, 8.5), (8.5, 9.5), (3.5, 3.5)], &[]),
            Tuning::default(),
        );
        for id in [2, 3] {
            if let Some(EntityKind::Hostile(hostile)) = world
                .entity_mut(EntityId::new(id))
                .map(|entity| &mut entity.kind)
            {
                hostile.health = 3;
            }
        }
        world.player.weapon = Weapon::Knife;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SwingMelee {
                targets: (0..4).map(EntityId::new).collect(),
            },
            &mut events,
        );

        assert!(matches!(
            hostile(&world, 0).state(),
            HostileState::Expiring { .. }
        ));
        assert!(matches!(
            hostile(&world, 1).state(),
            HostileState::Expiring { .. }
        ));
        assert_eq!(hostile(&world, 2).state(), HostileState::Idle);
        assert_eq!(hostile(&world, 2).health(), 1);
        assert_eq!(hostile(&world, 3).health(), 3);
        assert_eq!(query::player(&world).score(), 2);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::ScoreChanged { .. }))
                .count(),
            1
        );
        assert_eq!(events.last(), Some(&Event::MeleeResolved { kills: 2, hits: 1 }));
    }

    #[test]
    fn immune_player_ignores_attacks() {
        let mut world = world_with(arena(&[(7.5, 8.5)], &[]), Tuning::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SetHostilePursuit {
                hostile: EntityId::new(0),
                pursuing: true,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::HostileAttack {
                hostile: EntityId::new(0),
            },
            &mut events,
        );

        let player = query::player(&world);
        assert!(player.is_immune());
        assert_eq!(player.health(), 100);
        assert_eq!(player.timers().damage_flash(), 0);
        assert!(events.is_empty());
        assert_eq!(hostile(&world, 0).attack_cooldown(), 0);
    }

    #[test]
    fn lethal_attack_kills_then_respawns_the_player() {
        let tuning = Tuning {
            hostile_damage: 60,
            hostile_attack_cooldown: 1,
            ..Tuning::default()
        };
        let respawn = tuning.player_respawn_duration;
        let mut world = world_with(arena(&[(7.5, 8.5)], &[]), tuning);
        world.player.immunity = 0;
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RotatePlayer { angle: 1.0 },
            &mut events,
        );

        apply(
            &mut world,
            Command::SetHostilePursuit {
                hostile: EntityId::new(0),
                pursuing: true,
            },
            &mut events,
        );
        for attack in 0..2 {
            if attack > 0 {
                tick(&mut world, &mut events);
            }
            apply(
                &mut world,
                Command::HostileAttack {
                    hostile: EntityId::new(0),
                },
                &mut events,
            );
        }

        assert!(events.contains(&Event::PlayerDied));
        assert_eq!(query::player(&world).health(), 0);
        assert!(!query::player(&world).is_alive());

        events.clear();
        for _ in 1..respawn {
            tick(&mut world, &mut events);
        }
        assert!(!events.contains(&Event::PlayerRespawned));

        tick(&mut world, &mut events);
        let player = query::player(&world);
        assert!(events.contains(&Event::PlayerRespawned));
        assert_eq!(player.health(), 100);
        assert_eq!(player.ammo(), 30);
        assert!(player.is_immune());
        assert_eq!(player.camera(), query::spawn(&world));
    }

    #[test]
    fn pickups_heal_only_when_hurt() {
        let tuning = Tuning::default();
        let respawn = tuning.pickup_respawn_duration;
        let mut world = world_with(arena(&[], &[(8.8, 8.5)]), tuning);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ConsumePickup {
                pickup: EntityId::new(0),
            },
            &mut events,
        );
        assert!(events.is_empty());

        world.player.health = 70;
        apply(
            &mut world,
            Command::ConsumePickup {
                pickup: EntityId::new(0),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PickupConsumed {
                pickup: EntityId::new(0),
                health: 100,
            }]
        );

        for _ in 0..respawn {
            tick(&mut world, &mut events);
        }
        let pickup = query::entity(&world, EntityId::new(0))
            .and_then(Entity::as_pickup)
            .expect("pickup");
        assert!(pickup.is_available());
    }

    #[test]
    fn movement_slides_along_walls() {
        let mut layout = arena(&[], &[]);
        layout.tiles[8][7] = 2;
        let mut world = world_with(layout, Tuning::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                delta: Vec2::new(-0.6, 0.25),
            },
            &mut events,
        );

        let position = query::player(&world).position();
        assert!((position.x - 8.5).abs() < 1e-6);
        assert!((position.y - 8.75).abs() < 1e-6);
        assert!(query::player(&world).is_moving());
    }

    #[test]
    fn footsteps_sound_on_interval_ticks_only() {
        let mut world = world_with(arena(&[], &[]), Tuning::default());
        let mut events = Vec::new();
        let mut footsteps = 0;

        for _ in 0..40 {
            events.clear();
            tick(&mut world, &mut events);
            apply(
                &mut world,
                Command::MovePlayer {
                    delta: Vec2::ZERO,
                },
                &mut events,
            );
            footsteps += events
                .iter()
                .filter(|event| **event == Event::Footstep)
                .count();
        }

        assert_eq!(footsteps, 2);
    }
}

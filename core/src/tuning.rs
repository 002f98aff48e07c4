//! Gameplay constants expressed in ticks and grid units.

use serde::{Deserialize, Serialize};

/// Every tunable gameplay constant.
///
/// Durations are measured in simulation ticks, speeds in grid units per tick
/// and distances in grid units. Missing keys in a deserialized document fall
/// back to [`Tuning::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player displacement per tick for keyboard movement.
    pub move_speed: f32,
    /// Multiplier applied to `move_speed` for joystick movement.
    pub joystick_speed_factor: f32,
    /// Keyboard rotation per tick, in radians.
    pub rotation_speed: f32,
    /// Radians of rotation per pixel of look drag.
    pub look_sensitivity: f32,
    /// Factor applied to residual look delta after the finger lifts.
    pub look_damping: f32,
    /// Residual look delta below which rotation stops, in pixels.
    pub look_rest_threshold: f32,
    /// Radius of the on-screen joystick base, in pixels.
    pub joystick_base_radius: f32,
    /// Radius of the on-screen joystick handle, in pixels.
    pub joystick_handle_radius: f32,
    /// Fraction of the screen width, from the left edge, that claims the joystick.
    pub joystick_region: f32,

    /// Magazine capacity.
    pub max_ammo: u32,
    /// Ticks between gun shots.
    pub fire_cooldown: u32,
    /// Ticks between knife swings.
    pub melee_cooldown: u32,
    /// Ticks a reload takes.
    pub reload_duration: u32,
    /// Ticks after a reload starts at which the magazine seats.
    pub reload_rack_delay: u32,
    /// Ticks the weapon-switch animation lasts.
    pub switch_duration: u32,
    /// Ticks the muzzle flash stays visible.
    pub muzzle_flash_duration: u32,
    /// Pixels of recoil kick per shot.
    pub recoil_kick: f32,
    /// Fraction of recoil kept each tick.
    pub recoil_damping: f32,
    /// Ticks the red damage overlay lasts.
    pub damage_flash_duration: u32,
    /// Ticks the empty-click jerk animation lasts.
    pub empty_click_duration: u32,
    /// Ticks the ammo counter blinks after a dry fire.
    pub ammo_blink_duration: u32,
    /// A footstep sounds on every tick divisible by this interval while moving.
    pub footstep_interval: u64,

    /// Player health ceiling.
    pub player_max_health: u32,
    /// Ticks the player stays dead before respawning.
    pub player_respawn_duration: u32,
    /// Ticks of immunity granted at spawn.
    pub spawn_immunity_duration: u32,

    /// Hostile health at spawn.
    pub hostile_health: u32,
    /// Hostile displacement per tick while pursuing.
    pub hostile_speed: f32,
    /// Distance within which hostiles notice the player.
    pub detection_range: f32,
    /// Distance below which hostiles stop closing in.
    pub minimum_pursuit_distance: f32,
    /// Ticks the death animation lasts.
    pub death_duration: u32,
    /// Ticks an inactive hostile waits before respawning.
    pub hostile_respawn_duration: u32,
    /// Health removed from the player per hostile attack.
    pub hostile_damage: u32,
    /// Ticks between hostile attacks.
    pub hostile_attack_cooldown: u32,
    /// Distance within which hostiles can strike.
    pub hostile_attack_range: f32,

    /// Health removed from a hostile per gun hit.
    pub gun_damage: u32,
    /// Health removed from each hostile caught in a knife swing.
    pub knife_damage: u32,
    /// Reach of a knife swing.
    pub knife_range: f32,
    /// Score awarded per kill.
    pub score_per_kill: u32,

    /// Health restored by a medkit.
    pub pickup_heal: u32,
    /// Ticks a consumed pickup waits before respawning.
    pub pickup_respawn_duration: u32,
    /// Distance within which pickups are consumed.
    pub pickup_range: f32,
}

impl Tuning {
    /// Ticks the knife slash animation lasts.
    #[must_use]
    pub const fn slash_duration(&self) -> u32 {
        self.melee_cooldown / 4
    }

    /// Joystick deflection below which no movement is produced, in pixels.
    #[must_use]
    pub fn joystick_dead_zone(&self) -> f32 {
        self.joystick_handle_radius / 4.0
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            joystick_speed_factor: 1.5,
            rotation_speed: 0.03,
            look_sensitivity: 0.0025,
            look_damping: 0.75,
            look_rest_threshold: 0.1,
            joystick_base_radius: 40.0,
            joystick_handle_radius: 25.0,
            joystick_region: 0.5,

            max_ammo: 30,
            fire_cooldown: 10,
            melee_cooldown: 20,
            reload_duration: 60,
            reload_rack_delay: 9,
            switch_duration: 20,
            muzzle_flash_duration: 3,
            recoil_kick: 10.0,
            recoil_damping: 0.7,
            damage_flash_duration: 10,
            empty_click_duration: 10,
            ammo_blink_duration: 30,
            footstep_interval: 20,

            player_max_health: 100,
            player_respawn_duration: 180,
            spawn_immunity_duration: 180,

            hostile_health: 2,
            hostile_speed: 0.02,
            detection_range: 8.0,
            minimum_pursuit_distance: 1.0,
            death_duration: 15,
            hostile_respawn_duration: 600,
            hostile_damage: 10,
            hostile_attack_cooldown: 60,
            hostile_attack_range: 1.2,

            gun_damage: 1,
            knife_damage: 2,
            knife_range: 1.5,
            score_per_kill: 1,

            pickup_heal: 50,
            pickup_respawn_duration: 900,
            pickup_range: 0.8,
        }
    }
}

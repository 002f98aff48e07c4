#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mobile Strike engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read world snapshots and
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values that the simulation turns into sound cues and score notifications.

mod camera;
mod input;
mod map;
mod tuning;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use camera::{Camera, ScreenSize, SpriteProjection};
pub use input::{Circle, InputEvent, Intent, Key, PointerId, Rect, TouchLayout, TouchRegion};
pub use map::{MapError, TileCode, TileMap};
pub use tuning::Tuning;

/// Number of simulation ticks executed per second of wall time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Wall-clock duration of a single simulation tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Logical render surface shared by the renderer, hit detection, and touch layout.
pub const LOGICAL_SCREEN: ScreenSize = ScreenSize::new(320, 200);

/// Weapons the player can equip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    /// Ranged hitscan pistol that consumes ammunition.
    Gun,
    /// Melee blade that strikes every hostile within reach.
    Knife,
}

impl Weapon {
    /// Reports whether the weapon resolves attacks at range.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Gun)
    }

    /// Returns the weapon the switch button toggles to.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Gun => Self::Knife,
            Self::Knife => Self::Gun,
        }
    }
}

/// Unique identifier assigned to an entity in the entity store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Attack category that inflicted damage on a hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// Single-target hitscan shot.
    Ranged,
    /// Area swing around the player.
    Melee,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the tick counter and decays every timer by one tick.
    Tick,
    /// Requests that the player move by the provided world-space delta.
    ///
    /// Each axis is applied independently and only when the destination tile is empty.
    MovePlayer {
        /// Combined world-space displacement requested for this tick.
        delta: Vec2,
    },
    /// Rotates the facing direction and camera plane together.
    RotatePlayer {
        /// Signed rotation in radians; positive turns counter-clockwise.
        angle: f32,
    },
    /// Requests that the equipped gun begin reloading.
    StartReload,
    /// Requests that the player equip the provided weapon.
    SwitchWeapon {
        /// Weapon the player wants to hold.
        weapon: Weapon,
    },
    /// Pulls the trigger of the equipped gun.
    FireWeapon {
        /// Hostile selected under the crosshair, if any.
        target: Option<EntityId>,
    },
    /// Swings the equipped knife.
    SwingMelee {
        /// Hostiles within reach of the swing.
        targets: Vec<EntityId>,
    },
    /// Requests that the player consume a pickup.
    ConsumePickup {
        /// Pickup the player is standing on.
        pickup: EntityId,
    },
    /// Updates whether a hostile is chasing the player.
    SetHostilePursuit {
        /// Hostile being re-evaluated.
        hostile: EntityId,
        /// Whether the hostile noticed the player this tick.
        pursuing: bool,
    },
    /// Requests that a pursuing hostile step by the provided delta.
    StepHostile {
        /// Hostile attempting to move.
        hostile: EntityId,
        /// World-space displacement, gated per axis like player movement.
        delta: Vec2,
    },
    /// Requests that a hostile strike the player.
    HostileAttack {
        /// Hostile attempting the attack.
        hostile: EntityId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TickAdvanced {
        /// Tick counter after advancing.
        tick: u64,
    },
    /// The moving player completed a stride on a footstep tick.
    Footstep,
    /// A reload began.
    ReloadStarted,
    /// The reload passed its midpoint and the magazine seated.
    ReloadRacked,
    /// A reload finished and the magazine was refilled.
    ReloadCompleted {
        /// Ammunition after refilling.
        ammo: u32,
    },
    /// The player changed weapons.
    WeaponSwitched {
        /// Weapon that was put away.
        from: Weapon,
        /// Weapon that is now equipped.
        to: Weapon,
    },
    /// The gun discharged a round.
    ShotFired {
        /// Rounds left after the shot.
        ammo: u32,
    },
    /// The trigger was pulled on an empty magazine.
    DryFired,
    /// A hostile lost health but survived.
    HostileDamaged {
        /// Hostile that was struck.
        hostile: EntityId,
        /// Health left after the hit.
        health: u32,
        /// Attack that delivered the hit.
        source: DamageSource,
    },
    /// A hostile took lethal damage and began expiring.
    HostileKilled {
        /// Hostile that was killed.
        hostile: EntityId,
        /// Attack that delivered the killing blow.
        source: DamageSource,
    },
    /// A knife swing started.
    MeleeSwung,
    /// Summarises a knife swing once every target was processed.
    MeleeResolved {
        /// Number of hostiles killed by the swing.
        kills: u32,
        /// Number of hostiles struck but left alive.
        hits: u32,
    },
    /// The cumulative score changed.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// A hostile finished its death animation and became inactive.
    HostileExpired {
        /// Hostile that expired.
        hostile: EntityId,
    },
    /// An inactive entity returned to its origin in the idle state.
    EntityRespawned {
        /// Entity that respawned.
        entity: EntityId,
    },
    /// The player consumed a pickup.
    PickupConsumed {
        /// Pickup that was consumed.
        pickup: EntityId,
        /// Player health after healing.
        health: u32,
    },
    /// The player took damage from a hostile.
    PlayerDamaged {
        /// Hostile responsible for the damage.
        hostile: EntityId,
        /// Player health after the hit.
        health: u32,
    },
    /// The player's health reached zero.
    PlayerDied,
    /// The player returned to the spawn point.
    PlayerRespawned,
    /// Spawn immunity wore off.
    ImmunityExpired,
}

/// Named fire-and-forget sound triggers understood by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Gun discharge.
    Gunshot,
    /// Player stride.
    Footstep,
    /// First half of the reload sound.
    ReloadEject,
    /// Second half of the reload sound.
    ReloadSeat,
    /// Weapon swap.
    WeaponSwitch,
    /// Knife swing.
    MeleeSwing,
    /// Hostile struck without dying.
    EntityHit,
    /// Hostile killed.
    EntityDeath,
    /// Player struck.
    PlayerHit,
    /// Player killed.
    PlayerDeath,
    /// Pickup consumed.
    Pickup,
    /// Trigger pulled on an empty magazine.
    EmptyClick,
    /// Background music should start.
    MusicStart,
    /// Background music should stop.
    MusicStop,
    /// Mute state should flip.
    MuteToggle,
}

/// Sink that receives sound cues fired by the simulation.
///
/// Cues carry no acknowledgement; implementations must not block.
pub trait SoundSink {
    /// Triggers the provided cue.
    fn play(&mut self, cue: SoundCue);
}

impl<F> SoundSink for F
where
    F: FnMut(SoundCue),
{
    fn play(&mut self, cue: SoundCue) {
        self(cue);
    }
}

/// Sound sink that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _cue: SoundCue) {}
}

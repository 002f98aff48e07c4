use glam::Vec2;
use mobile_strike_core::EntityId;

/// Lifecycle of a hostile.
///
/// Health is positive in `Idle` and `Pursuing`; the two countdown states
/// each carry their own timer so no state ever holds a stale one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostileState {
    /// Standing at its post.
    Idle,
    /// Chasing the player.
    Pursuing,
    /// Playing the death animation.
    Expiring {
        /// Ticks left in the animation.
        remaining: u32,
    },
    /// Removed from play until respawning.
    Inactive {
        /// Ticks left before respawning.
        respawn_in: u32,
    },
}

/// Enemy that patrols its origin and chases the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hostile {
    pub(crate) name: String,
    pub(crate) health: u32,
    pub(crate) attack_cooldown: u32,
    pub(crate) state: HostileState,
}

impl Hostile {
    /// Display name drawn above the silhouette.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Ticks until the hostile may attack again.
    #[must_use]
    pub const fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> HostileState {
        self.state
    }

    /// Reports whether attacks can still hurt the hostile.
    #[must_use]
    pub const fn is_targetable(&self) -> bool {
        matches!(self.state, HostileState::Idle | HostileState::Pursuing)
    }
}

/// Lifecycle of a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupState {
    /// Waiting to be consumed.
    Idle,
    /// Consumed and waiting to respawn.
    Inactive {
        /// Ticks left before respawning.
        respawn_in: u32,
    },
}

/// Medkit that heals the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pickup {
    pub(crate) state: PickupState,
}

impl Pickup {
    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PickupState {
        self.state
    }

    /// Reports whether the pickup can be consumed.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.state, PickupState::Idle)
    }
}

/// Variant-specific entity data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Enemy.
    Hostile(Hostile),
    /// Medkit.
    Pickup(Pickup),
}

/// Dynamic actor living in the entity store.
///
/// Entities are never removed; death and consumption are states.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) position: Vec2,
    pub(crate) origin: Vec2,
    pub(crate) kind: EntityKind,
}

impl Entity {
    pub(crate) fn hostile(id: EntityId, origin: Vec2, name: String, health: u32) -> Self {
        Self {
            id,
            position: origin,
            origin,
            kind: EntityKind::Hostile(Hostile {
                name,
                health,
                attack_cooldown: 0,
                state: HostileState::Idle,
            }),
        }
    }

    pub(crate) fn pickup(id: EntityId, origin: Vec2) -> Self {
        Self {
            id,
            position: origin,
            origin,
            kind: EntityKind::Pickup(Pickup {
                state: PickupState::Idle,
            }),
        }
    }

    /// Identifier of the entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Current position in grid units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Position the entity respawns at.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Variant-specific data.
    #[must_use]
    pub const fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Hostile data, if the entity is a hostile.
    #[must_use]
    pub const fn as_hostile(&self) -> Option<&Hostile> {
        match &self.kind {
            EntityKind::Hostile(hostile) => Some(hostile),
            EntityKind::Pickup(_) => None,
        }
    }

    /// Pickup data, if the entity is a pickup.
    #[must_use]
    pub const fn as_pickup(&self) -> Option<&Pickup> {
        match &self.kind {
            EntityKind::Pickup(pickup) => Some(pickup),
            EntityKind::Hostile(_) => None,
        }
    }
}

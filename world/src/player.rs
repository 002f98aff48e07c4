use glam::Vec2;
use mobile_strike_core::{Camera, Weapon};

/// Whether the player is in play or waiting to respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    /// The player can move and attack.
    Alive,
    /// The player is down and returns to spawn once the countdown ends.
    Dead {
        /// Ticks left before respawning.
        respawn_in: u32,
    },
}

/// Animation and cooldown countdowns that all decay by one per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerTimers {
    pub(crate) fire_cooldown: u32,
    pub(crate) melee_cooldown: u32,
    pub(crate) muzzle_flash: u32,
    pub(crate) slash: u32,
    pub(crate) damage_flash: u32,
    pub(crate) empty_click_cooldown: u32,
    pub(crate) empty_click: u32,
    pub(crate) ammo_blink: u32,
}

impl PlayerTimers {
    pub(crate) fn decay(&mut self) {
        for timer in [
            &mut self.fire_cooldown,
            &mut self.melee_cooldown,
            &mut self.muzzle_flash,
            &mut self.slash,
            &mut self.damage_flash,
            &mut self.empty_click_cooldown,
            &mut self.empty_click,
            &mut self.ammo_blink,
        ] {
            *timer = timer.saturating_sub(1);
        }
    }

    /// Ticks until the gun may fire again.
    #[must_use]
    pub const fn fire_cooldown(&self) -> u32 {
        self.fire_cooldown
    }

    /// Ticks until the knife may swing again.
    #[must_use]
    pub const fn melee_cooldown(&self) -> u32 {
        self.melee_cooldown
    }

    /// Ticks the muzzle flash remains visible.
    #[must_use]
    pub const fn muzzle_flash(&self) -> u32 {
        self.muzzle_flash
    }

    /// Ticks left in the knife slash animation.
    #[must_use]
    pub const fn slash(&self) -> u32 {
        self.slash
    }

    /// Ticks left in the red damage overlay.
    #[must_use]
    pub const fn damage_flash(&self) -> u32 {
        self.damage_flash
    }

    /// Ticks until another empty click may sound.
    #[must_use]
    pub const fn empty_click_cooldown(&self) -> u32 {
        self.empty_click_cooldown
    }

    /// Ticks left in the empty-click jerk animation.
    #[must_use]
    pub const fn empty_click(&self) -> u32 {
        self.empty_click
    }

    /// Ticks the ammo counter keeps blinking.
    #[must_use]
    pub const fn ammo_blink(&self) -> u32 {
        self.ammo_blink
    }
}

/// In-progress weapon swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponSwitch {
    pub(crate) remaining: u32,
    pub(crate) previous: Weapon,
}

impl WeaponSwitch {
    /// Ticks left in the swap animation.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Weapon being lowered.
    #[must_use]
    pub const fn previous(&self) -> Weapon {
        self.previous
    }
}

/// Mutable player aggregate owned by the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub(crate) camera: Camera,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) ammo: u32,
    pub(crate) max_ammo: u32,
    pub(crate) score: u32,
    pub(crate) weapon: Weapon,
    pub(crate) life: LifeState,
    pub(crate) immunity: u32,
    pub(crate) reload: Option<u32>,
    pub(crate) switch: Option<WeaponSwitch>,
    pub(crate) timers: PlayerTimers,
    pub(crate) recoil: f32,
    pub(crate) moving: bool,
}

impl Player {
    pub(crate) fn spawn(camera: Camera, max_health: u32, max_ammo: u32, immunity: u32) -> Self {
        Self {
            camera,
            health: max_health,
            max_health,
            ammo: max_ammo,
            max_ammo,
            score: 0,
            weapon: Weapon::Gun,
            life: LifeState::Alive,
            immunity,
            reload: None,
            switch: None,
            timers: PlayerTimers::default(),
            recoil: 0.0,
            moving: false,
        }
    }

    /// Resets the body to the spawn basis while keeping score and weapon.
    pub(crate) fn respawn(&mut self, camera: Camera, immunity: u32) {
        self.camera = camera;
        self.health = self.max_health;
        self.ammo = self.max_ammo;
        self.life = LifeState::Alive;
        self.immunity = immunity;
        self.reload = None;
    }

    /// Position and projection basis.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Eye position in grid units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.camera.position
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health ceiling.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Rounds in the magazine.
    #[must_use]
    pub const fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Magazine capacity.
    #[must_use]
    pub const fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> Weapon {
        self.weapon
    }

    /// Alive or dead.
    #[must_use]
    pub const fn life(&self) -> LifeState {
        self.life
    }

    /// Reports whether the player is in play.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self.life, LifeState::Alive)
    }

    /// Reports whether hostile attacks are currently ignored.
    #[must_use]
    pub const fn is_immune(&self) -> bool {
        self.immunity > 0
    }

    /// Ticks of immunity left.
    #[must_use]
    pub const fn immunity(&self) -> u32 {
        self.immunity
    }

    /// Ticks left in the current reload, if reloading.
    #[must_use]
    pub const fn reload(&self) -> Option<u32> {
        self.reload
    }

    /// Reports whether a reload is in progress.
    #[must_use]
    pub const fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// Weapon swap in progress, if any.
    #[must_use]
    pub const fn switch(&self) -> Option<WeaponSwitch> {
        self.switch
    }

    /// Reports whether a weapon swap is in progress.
    #[must_use]
    pub const fn is_switching(&self) -> bool {
        self.switch.is_some()
    }

    /// Cooldown and animation countdowns.
    #[must_use]
    pub const fn timers(&self) -> &PlayerTimers {
        &self.timers
    }

    /// Vertical recoil offset in pixels.
    #[must_use]
    pub const fn recoil(&self) -> f32 {
        self.recoil
    }

    /// Reports whether the player moved during the current tick.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }
}

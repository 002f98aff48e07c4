#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate orchestration of the Mobile Strike world and its systems.
//!
//! [`Simulation`] runs one tick: it applies the tick command, lets each
//! system read the world and answer with commands, applies those commands,
//! and turns the resulting events into sound cues and score notifications.
//! [`GameLoop`] feeds it from wall-clock time and buffered raw input.

mod game_loop;

use mobile_strike_core::{
    Command, DamageSource, Event, Intent, SoundCue, SoundSink, LOGICAL_SCREEN,
};
use mobile_strike_system_combat::Combat;
use mobile_strike_system_hostile_ai::HostileAi;
use mobile_strike_system_movement::Movement;
use mobile_strike_system_pickups::Pickups;
use mobile_strike_world::{self as world, query, World};
use tracing::trace;

pub use game_loop::{GameLoop, MAX_TICKS_PER_ADVANCE};

/// Callback notified whenever the cumulative score changes.
pub type ScoreCallback = Box<dyn FnMut(u32)>;

/// Owns the world, the pure systems, and the outbound collaborators.
pub struct Simulation<S> {
    world: World,
    movement: Movement,
    combat: Combat,
    pickups: Pickups,
    hostile_ai: HostileAi,
    sound: S,
    on_score: Option<ScoreCallback>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<S: SoundSink> Simulation<S> {
    /// Wires the systems to a world, configuring each from the world's tuning.
    #[must_use]
    pub fn new(world: World, sound: S) -> Self {
        let tuning = query::tuning(&world);
        let movement = Movement::new(tuning);
        let combat = Combat::new(LOGICAL_SCREEN, tuning);
        let pickups = Pickups::new(tuning);
        let hostile_ai = HostileAi::new(tuning);
        Self {
            world,
            movement,
            combat,
            pickups,
            hostile_ai,
            sound,
            on_score: None,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Registers the callback notified on every score change.
    #[must_use]
    pub fn with_score_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u32) + 'static,
    {
        self.on_score = Some(Box::new(callback));
        self
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events broadcast during the most recent step, in application order.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// The sound sink cues are forwarded to.
    #[must_use]
    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// Forwards a cue that is not derived from world events.
    pub fn play(&mut self, cue: SoundCue) {
        trace!(?cue, "sound cue");
        self.sound.play(cue);
    }

    /// Advances the world by exactly one tick using the provided intent.
    pub fn step(&mut self, intent: &Intent) {
        self.events.clear();
        if intent.first_interaction {
            self.play(SoundCue::MusicStart);
        }
        if intent.toggle_mute {
            self.play(SoundCue::MuteToggle);
        }

        self.commands.push(Command::Tick);
        self.flush();

        if query::player(&self.world).is_alive() {
            self.movement
                .handle(intent, query::player(&self.world), &mut self.commands);
            self.flush();

            self.combat.handle(
                intent,
                query::player(&self.world),
                query::entities(&self.world),
                &mut self.commands,
            );
            self.flush();
        }

        self.pickups.handle(
            query::player(&self.world),
            query::entities(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.hostile_ai.handle(
            query::player(&self.world),
            query::entities(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.dispatch();
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn dispatch(&mut self) {
        for event in &self.events {
            if let Some(cue) = cues_for(event) {
                trace!(?cue, "sound cue");
                self.sound.play(cue);
            }
            if let Event::ScoreChanged { score } = event {
                if let Some(callback) = self.on_score.as_mut() {
                    callback(*score);
                }
            }
        }
    }
}

impl<S> std::fmt::Debug for Simulation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &query::tick(&self.world))
            .field("pending_events", &self.events.len())
            .field("score_callback", &self.on_score.is_some())
            .finish_non_exhaustive()
    }
}

/// Maps a world event onto the sound cue it should trigger.
///
/// Per-target melee damage is silent; the swing summary carries the single
/// hit or death cue for the whole swing.
#[must_use]
pub fn cues_for(event: &Event) -> Option<SoundCue> {
    match event {
        Event::Footstep => Some(SoundCue::Footstep),
        Event::ReloadStarted => Some(SoundCue::ReloadEject),
        Event::ReloadRacked => Some(SoundCue::ReloadSeat),
        Event::WeaponSwitched { .. } => Some(SoundCue::WeaponSwitch),
        Event::ShotFired { .. } => Some(SoundCue::Gunshot),
        Event::DryFired => Some(SoundCue::EmptyClick),
        Event::HostileDamaged {
            source: DamageSource::Ranged,
            ..
        } => Some(SoundCue::EntityHit),
        Event::HostileKilled {
            source: DamageSource::Ranged,
            ..
        } => Some(SoundCue::EntityDeath),
        Event::MeleeSwung => Some(SoundCue::MeleeSwing),
        Event::MeleeResolved { kills, hits } => {
            if *kills > 0 {
                Some(SoundCue::EntityDeath)
            } else if *hits > 0 {
                Some(SoundCue::EntityHit)
            } else {
                None
            }
        }
        Event::PickupConsumed { .. } => Some(SoundCue::Pickup),
        Event::PlayerDamaged { .. } => Some(SoundCue::PlayerHit),
        Event::PlayerDied => Some(SoundCue::PlayerDeath),
        Event::HostileDamaged { .. }
        | Event::HostileKilled { .. }
        | Event::TickAdvanced { .. }
        | Event::ReloadCompleted { .. }
        | Event::ScoreChanged { .. }
        | Event::HostileExpired { .. }
        | Event::EntityRespawned { .. }
        | Event::PlayerRespawned
        | Event::ImmunityExpired => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobile_strike_core::EntityId;

    #[test]
    fn melee_damage_is_silent_but_the_summary_is_not() {
        let hostile = EntityId::new(3);
        assert_eq!(
            cues_for(&Event::HostileKilled {
                hostile,
                source: DamageSource::Melee,
            }),
            None
        );
        assert_eq!(
            cues_for(&Event::HostileKilled {
                hostile,
                source: DamageSource::Ranged,
            }),
            Some(SoundCue::EntityDeath)
        );
        assert_eq!(
            cues_for(&Event::MeleeResolved { kills: 2, hits: 1 }),
            Some(SoundCue::EntityDeath)
        );
        assert_eq!(
            cues_for(&Event::MeleeResolved { kills: 0, hits: 1 }),
            Some(SoundCue::EntityHit)
        );
        assert_eq!(cues_for(&Event::MeleeResolved { kills: 0, hits: 0 }), None);
    }

    #[test]
    fn reload_cues_come_in_two_parts() {
        assert_eq!(cues_for(&Event::ReloadStarted), Some(SoundCue::ReloadEject));
        assert_eq!(cues_for(&Event::ReloadRacked), Some(SoundCue::ReloadSeat));
        assert_eq!(cues_for(&Event::ReloadCompleted { ammo: 30 }), None);
    }
}

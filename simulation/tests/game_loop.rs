use std::time::Duration;

use mobile_strike_core::{
    InputEvent, Key, SoundCue, SoundSink, Tuning, LOGICAL_SCREEN, TICK_DURATION,
};
use mobile_strike_simulation::{GameLoop, Simulation, MAX_TICKS_PER_ADVANCE};
use mobile_strike_system_input::{Config, InputAggregator};
use mobile_strike_world::{query, Layout, World, DEFAULT_NAME_SEED};

#[derive(Debug, Default)]
struct Recorder(Vec<SoundCue>);

impl SoundSink for Recorder {
    fn play(&mut self, cue: SoundCue) {
        self.0.push(cue);
    }
}

fn game_loop() -> GameLoop<Recorder> {
    let tuning = Tuning::default();
    let input = InputAggregator::new(Config::new(LOGICAL_SCREEN, &tuning));
    let world = World::new(Layout::city(), tuning, DEFAULT_NAME_SEED).expect("city layout");
    GameLoop::new(Simulation::new(world, Recorder::default()), input)
}

fn tick(game: &GameLoop<Recorder>) -> u64 {
    query::tick(game.simulation().world())
}

#[test]
fn whole_ticks_are_run_from_accumulated_time() {
    let mut game = game_loop();

    assert_eq!(game.advance(TICK_DURATION / 2), 0);
    assert_eq!(game.advance(TICK_DURATION / 2), 1);
    assert_eq!(game.advance(TICK_DURATION * 3), 3);
    assert_eq!(tick(&game), 4);
}

#[test]
fn long_frames_are_capped_and_the_backlog_dropped() {
    let mut game = game_loop();

    assert_eq!(game.advance(Duration::from_secs(1)), MAX_TICKS_PER_ADVANCE);
    assert_eq!(game.advance(TICK_DURATION), 1);
    assert_eq!(tick(&game), u64::from(MAX_TICKS_PER_ADVANCE) + 1);
}

#[test]
fn pausing_freezes_time_and_gates_the_music() {
    let mut game = game_loop();
    assert_eq!(game.advance(TICK_DURATION / 2), 0);

    game.toggle_pause();
    assert!(game.is_paused());
    assert_eq!(game.advance(Duration::from_secs(3)), 0);

    game.toggle_pause();
    assert_eq!(game.advance(TICK_DURATION / 2), 0);
    assert_eq!(game.advance(TICK_DURATION / 2), 1);
    assert_eq!(
        game.simulation().sound().0,
        vec![SoundCue::MusicStop, SoundCue::MusicStart]
    );
}

#[test]
fn buffered_taps_reach_the_next_tick() {
    let mut game = game_loop();
    game.handle_input(InputEvent::KeyDown(Key::Fire));
    game.handle_input(InputEvent::KeyUp(Key::Fire));
    assert!(game.simulation().sound().0.is_empty());

    assert_eq!(game.advance(TICK_DURATION), 1);
    assert_eq!(
        game.simulation().sound().0,
        vec![SoundCue::MusicStart, SoundCue::Gunshot]
    );

    assert_eq!(game.advance(TICK_DURATION * 20), MAX_TICKS_PER_ADVANCE);
    assert_eq!(game.simulation().sound().0.len(), 2);
}

#[test]
fn taps_made_while_paused_are_dropped_on_resume() {
    let mut game = game_loop();
    game.toggle_pause();
    game.handle_input(InputEvent::KeyDown(Key::Fire));
    game.handle_input(InputEvent::KeyUp(Key::Fire));
    game.toggle_pause();

    assert_eq!(game.advance(TICK_DURATION), 1);
    assert_eq!(
        game.simulation().sound().0,
        vec![SoundCue::MusicStop, SoundCue::MusicStart]
    );

    game.toggle_pause();
    game.handle_input(InputEvent::KeyDown(Key::Fire));
    game.toggle_pause();
    assert_eq!(game.advance(TICK_DURATION), 1);
    let sound = &game.simulation().sound().0;
    assert_eq!(&sound[..3], &[SoundCue::MusicStop, SoundCue::MusicStart, SoundCue::MusicStop]);
    assert!(sound[3..].contains(&SoundCue::Gunshot));
}

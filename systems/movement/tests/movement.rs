use glam::Vec2;
use mobile_strike_core::{Command, Intent, Tuning};
use mobile_strike_system_movement::Movement;
use mobile_strike_world::{query, Layout, World, DEFAULT_NAME_SEED};

fn world() -> World {
    World::new(Layout::city(), Tuning::default(), DEFAULT_NAME_SEED).expect("city layout")
}

fn run(intent: &Intent) -> Vec<Command> {
    let world = world();
    let movement = Movement::new(query::tuning(&world));
    let mut commands = Vec::new();
    movement.handle(intent, query::player(&world), &mut commands);
    commands
}

fn moved_by(commands: &[Command]) -> Option<Vec2> {
    commands.iter().find_map(|command| match command {
        Command::MovePlayer { delta } => Some(*delta),
        _ => None,
    })
}

fn rotated_by(commands: &[Command]) -> Option<f32> {
    commands.iter().find_map(|command| match command {
        Command::RotatePlayer { angle } => Some(*angle),
        _ => None,
    })
}

#[test]
fn idle_intent_emits_nothing() {
    assert!(run(&Intent::default()).is_empty());
}

#[test]
fn keys_move_along_direction_and_plane() {
    let forward = run(&Intent {
        forward: true,
        ..Intent::default()
    });
    assert_eq!(moved_by(&forward), Some(Vec2::new(-0.05, 0.0)));

    let strafe = run(&Intent {
        strafe_right: true,
        ..Intent::default()
    });
    let delta = moved_by(&strafe).expect("strafe");
    assert!((delta - Vec2::new(0.0, 0.033)).length() < 1e-6);
}

#[test]
fn opposing_keys_still_count_as_moving() {
    let commands = run(&Intent {
        forward: true,
        backward: true,
        ..Intent::default()
    });

    assert_eq!(moved_by(&commands), Some(Vec2::ZERO));
}

#[test]
fn joystick_up_walks_forward_faster_than_keys() {
    let commands = run(&Intent {
        joystick: Some(Vec2::new(0.0, -1.0)),
        ..Intent::default()
    });

    let delta = moved_by(&commands).expect("joystick movement");
    assert!((delta - Vec2::new(-0.075, 0.0)).length() < 1e-6);
}

#[test]
fn keyboard_and_look_rotation_combine() {
    let commands = run(&Intent {
        turn_left: true,
        look_rotation: -0.01,
        ..Intent::default()
    });

    let angle = rotated_by(&commands).expect("rotation");
    assert!((angle - 0.02).abs() < 1e-6);
    assert!(moved_by(&commands).is_none());
}

#[test]
fn opposing_turn_keys_cancel_out() {
    let commands = run(&Intent {
        turn_left: true,
        turn_right: true,
        ..Intent::default()
    });

    assert!(rotated_by(&commands).is_none());
}

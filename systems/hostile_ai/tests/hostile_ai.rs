use glam::Vec2;
use mobile_strike_core::{Camera, Command, EntityId, Event, Tuning};
use mobile_strike_system_hostile_ai::HostileAi;
use mobile_strike_world::{self as world, query, HostileState, Layout, World};

fn arena(hostiles: &[(f32, f32)]) -> Layout {
    let mut tiles = vec![vec![1; 20]; 20];
    for row in tiles.iter_mut().take(19).skip(1) {
        for tile in row.iter_mut().take(19).skip(1) {
            *tile = 0;
        }
    }
    Layout {
        tiles,
        spawn: Camera::new(
            Vec2::new(10.5, 10.5),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.66),
        ),
        hostile_origins: hostiles.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        pickup_origins: Vec::new(),
        roster: vec!["Sova".to_owned()],
    }
}

fn plan(world: &World) -> Vec<Command> {
    let ai = HostileAi::new(query::tuning(world));
    let mut commands = Vec::new();
    ai.handle(query::player(world), query::entities(world), &mut commands);
    commands
}

fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn state(world: &World, id: u32) -> HostileState {
    query::entity(world, EntityId::new(id))
        .and_then(|entity| entity.as_hostile())
        .map(|hostile| hostile.state())
        .expect("hostile exists")
}

#[test]
fn hostiles_in_detection_range_give_chase() {
    let mut world = World::new(arena(&[(5.5, 10.5), (1.5, 1.5)]), Tuning::default(), 1)
        .expect("arena layout");

    let commands = plan(&world);
    assert_eq!(
        commands,
        vec![
            Command::SetHostilePursuit {
                hostile: EntityId::new(0),
                pursuing: true,
            },
            Command::StepHostile {
                hostile: EntityId::new(0),
                delta: Vec2::new(0.02, 0.0),
            },
        ]
    );

    let _ = run(&mut world, commands);
    assert_eq!(state(&world, 0), HostileState::Pursuing);
    assert_eq!(state(&world, 1), HostileState::Idle);
    let position = query::entity(&world, EntityId::new(0))
        .expect("hostile")
        .position();
    assert!((position - Vec2::new(5.52, 10.5)).length() < 1e-5);
}

#[test]
fn hostiles_too_close_stop_pursuing() {
    let mut world =
        World::new(arena(&[(9.5, 10.5)]), Tuning::default(), 1).expect("arena layout");
    let _ = run(
        &mut world,
        vec![Command::SetHostilePursuit {
            hostile: EntityId::new(0),
            pursuing: true,
        }],
    );

    let commands = plan(&world);

    assert_eq!(
        commands,
        vec![Command::SetHostilePursuit {
            hostile: EntityId::new(0),
            pursuing: false,
        }]
    );
}

#[test]
fn immune_player_draws_no_attacks() {
    let world = World::new(arena(&[(9.4, 10.5)]), Tuning::default(), 1).expect("arena layout");

    let commands = plan(&world);

    assert!(!commands
        .iter()
        .any(|command| matches!(command, Command::HostileAttack { .. })));
}

#[test]
fn vulnerable_player_is_struck_once_per_cooldown() {
    let tuning = Tuning {
        spawn_immunity_duration: 1,
        hostile_speed: 0.0,
        ..Tuning::default()
    };
    let cooldown = tuning.hostile_attack_cooldown;
    let mut world = World::new(arena(&[(9.4, 10.5)]), tuning, 1).expect("arena layout");
    let _ = run(&mut world, vec![Command::Tick]);
    assert!(!query::player(&world).is_immune());

    let planned = plan(&world);
    let events = run(&mut world, planned);
    assert_eq!(
        events,
        vec![Event::PlayerDamaged {
            hostile: EntityId::new(0),
            health: 90,
        }]
    );
    assert_eq!(query::player(&world).timers().damage_flash(), 10);

    let mut strikes = 0;
    for _ in 0..cooldown {
        let mut commands = vec![Command::Tick];
        commands.extend(plan(&world));
        strikes += run(&mut world, commands)
            .iter()
            .filter(|event| matches!(event, Event::PlayerDamaged { .. }))
            .count();
    }
    assert_eq!(strikes, 1);
}

use glam::Vec2;
use mobile_strike_core::{Camera, TileMap, TouchLayout, Tuning, Weapon, LOGICAL_SCREEN};
use mobile_strike_rendering::{
    Frame, HostilePose, Renderer, Scene, SceneEntity, SceneEntityKind, ScenePlayer, TouchControls,
};

const BRICK: [u8; 4] = [0xb9, 0x1c, 0x1c, 0xff];
const TORSO: [u8; 4] = [0x00, 0x64, 0x00, 0xff];
const SKY: [u8; 4] = [0x87, 0xce, 0xfa, 0xff];
const GRASS: [u8; 4] = [0x16, 0x65, 0x34, 0xff];

fn corridor(extra_walls: &[(usize, usize)]) -> TileMap {
    let mut rows = vec![vec![1_u8; 24]; 5];
    for row in rows.iter_mut().take(4).skip(1) {
        for tile in row.iter_mut().take(20).skip(1) {
            *tile = 0;
        }
    }
    rows[2][20] = 5;
    for &(column, row) in extra_walls {
        rows[row][column] = 2;
    }
    TileMap::new(&rows).expect("closed corridor")
}

fn scene(extra_walls: &[(usize, usize)]) -> Scene {
    let camera = Camera::new(
        Vec2::new(2.5, 2.5),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.66),
    );
    Scene::new(corridor(extra_walls), ScenePlayer::new(camera, 100, 30))
}

fn hostile(x: f32, pose: HostilePose) -> SceneEntity {
    SceneEntity {
        position: Vec2::new(x, 2.5),
        kind: SceneEntityKind::Hostile {
            name: "Sova".to_owned(),
            health: 2,
            pose,
        },
    }
}

fn render(scene: &Scene) -> (Renderer, Frame) {
    let mut renderer = Renderer::new(&Tuning::default());
    let mut frame = Frame::new(LOGICAL_SCREEN).expect("logical screen");
    renderer.render(scene, &mut frame);
    (renderer, frame)
}

fn texts(frame: &Frame) -> Vec<&str> {
    frame
        .overlays
        .iter()
        .map(|overlay| overlay.text.as_str())
        .collect()
}

#[test]
fn walls_are_drawn_between_sky_and_floor() {
    let (renderer, frame) = render(&scene(&[]));

    assert!((renderer.depth().get(160) - 17.5).abs() < 1e-4);
    assert_eq!(frame.pixels.pixel(160, 100), Some(BRICK));
    assert_eq!(frame.pixels.pixel(250, 20), Some(SKY));
    assert_eq!(frame.pixels.pixel(250, 150), Some(GRASS));
}

#[test]
fn hostile_in_front_of_the_wall_is_drawn_with_its_nameplate() {
    let mut scene = scene(&[]);
    scene.entities.push(hostile(6.5, HostilePose::Idle));

    let (_, frame) = render(&scene);

    assert_eq!(frame.pixels.pixel(160, 110), Some(TORSO));
    assert!(texts(&frame).contains(&"SOVA"));
}

#[test]
fn walls_hide_hostiles_behind_them() {
    let mut scene = scene(&[(4, 1), (4, 2), (4, 3)]);
    scene.entities.push(hostile(6.5, HostilePose::Idle));

    let (_, frame) = render(&scene);

    assert_ne!(frame.pixels.pixel(160, 110), Some(TORSO));
    assert!(!texts(&frame).contains(&"SOVA"));
}

#[test]
fn idle_hostiles_beyond_detection_range_are_culled() {
    let mut idle = scene(&[]);
    idle.entities.push(hostile(12.5, HostilePose::Idle));
    let (_, frame) = render(&idle);
    assert!(!texts(&frame).contains(&"SOVA"));

    let mut chasing = scene(&[]);
    chasing.entities.push(hostile(12.5, HostilePose::Chasing));
    let (_, frame) = render(&chasing);
    assert!(texts(&frame).contains(&"SOVA"));
}

#[test]
fn expiring_hostiles_lose_their_nameplate() {
    let mut scene = scene(&[]);
    scene
        .entities
        .push(hostile(6.5, HostilePose::Expiring { remaining: 10 }));

    let (_, frame) = render(&scene);

    assert!(!texts(&frame).contains(&"SOVA"));
}

#[test]
fn hud_reports_score_health_and_ammo() {
    let mut scene = scene(&[]);
    scene.player.score = 42;
    scene.player.health = 70;

    let (_, frame) = render(&scene);
    let texts = texts(&frame);

    assert!(texts.contains(&"SCORE: 000042"));
    assert!(texts.contains(&"70/100"));
    assert!(texts.contains(&"AMMO: 30/30"));
}

#[test]
fn reloading_replaces_the_crosshair_and_knife_hides_ammo() {
    let mut reloading = scene(&[]);
    reloading.player.reload_remaining = Some(30);
    let (_, frame) = render(&reloading);
    assert!(texts(&frame).contains(&"RELOADING..."));

    let mut knife = scene(&[]);
    knife.player.weapon = Weapon::Knife;
    let (_, frame) = render(&knife);
    assert!(!texts(&frame).iter().any(|text| text.starts_with("AMMO")));
}

#[test]
fn death_screen_suppresses_weapon_and_hud() {
    let mut scene = scene(&[]);
    scene.player.health = 0;
    scene.player.respawn_in = Some(61);

    let (_, frame) = render(&scene);
    let texts = texts(&frame);

    assert_eq!(texts, vec!["YOU DIED", "Respawning in 2..."]);
}

#[test]
fn touch_controls_hide_reload_while_holding_the_knife() {
    let mut scene = scene(&[]);
    scene.player.weapon = Weapon::Knife;
    scene.touch = Some(TouchControls {
        layout: TouchLayout::new(LOGICAL_SCREEN, &Tuning::default()),
        joystick: None,
        shoot_held: true,
    });

    let (_, frame) = render(&scene);
    let texts = texts(&frame);

    assert!(texts.contains(&"SHOOT"));
    assert!(texts.contains(&"+"));
    assert!(!texts.contains(&"RELOAD"));
}

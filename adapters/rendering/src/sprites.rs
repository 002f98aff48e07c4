//! Billboard compositing for hostiles and medkits.

use embedded_graphics::prelude::*;
use glam::Vec2;

use crate::{
    framebuffer::{outline, rectangle, DepthBuffer},
    palette, Color, Durations, Framebuffer, HostilePose, Scene, SceneEntity, SceneEntityKind,
    TextAlign, TextOverlay,
};

const HEALTH_BAR_WIDTH: f32 = 30.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_LIFT: f32 = 15.0;
const NAME_LIFT: f32 = 5.0;
const NAME_SIZE: f32 = 10.0;

/// Screen placement of a billboard after clamping to the surface.
#[derive(Clone, Copy, Debug)]
struct Placement {
    depth: f32,
    center_x: i32,
    size: f32,
    top: f32,
    left: i32,
    right: i32,
}

/// Draws every visible entity from farthest to nearest, honouring the wall depth buffer.
pub(crate) fn draw_sprites(
    frame: &mut Framebuffer,
    depth: &DepthBuffer,
    scene: &Scene,
    durations: &Durations,
    overlays: &mut Vec<TextOverlay>,
) {
    let camera = &scene.player.camera;
    let screen = frame.size();
    let mut order: Vec<(f32, &SceneEntity)> = scene
        .entities
        .iter()
        .map(|entity| (entity.position.distance_squared(camera.position), entity))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    let detection_squared = durations.detection_range * durations.detection_range;
    for (distance_squared, entity) in order {
        if let SceneEntityKind::Hostile {
            pose: HostilePose::Idle,
            ..
        } = entity.kind
        {
            if distance_squared > detection_squared {
                continue;
            }
        }

        let Some(projection) = camera.project(entity.position, screen) else {
            continue;
        };
        let size = projection.size as f32;
        let half_height = screen.height() as f32 / 2.0;
        let placement = Placement {
            depth: projection.depth,
            center_x: projection.screen_x,
            size,
            top: (half_height - size / 2.0).floor().max(0.0),
            left: ((projection.screen_x as f32 - size / 2.0).floor() as i32).max(0),
            right: ((projection.screen_x as f32 + size / 2.0).floor() as i32)
                .min(screen.width() as i32 - 1),
        };

        match &entity.kind {
            SceneEntityKind::Hostile { name, health, pose } => {
                draw_hostile(frame, depth, &placement, *pose, scene.tick, durations);
                if !matches!(pose, HostilePose::Expiring { .. })
                    && depth.is_visible(placement.center_x, placement.depth)
                {
                    draw_nameplate(
                        frame,
                        &placement,
                        name,
                        *health as f32 / durations.hostile_health.max(1) as f32,
                        overlays,
                    );
                }
            }
            SceneEntityKind::Medkit => draw_medkit(frame, depth, &placement),
        }
    }
}

fn draw_hostile(
    frame: &mut Framebuffer,
    depth: &DepthBuffer,
    placement: &Placement,
    pose: HostilePose,
    tick: u64,
    durations: &Durations,
) {
    let size = placement.size;
    let head = (size * 0.3).floor();
    for stripe in placement.left..placement.right {
        if !depth.is_visible(stripe, placement.depth) {
            continue;
        }
        let x = stripe as f32;
        match pose {
            HostilePose::Expiring { remaining } => {
                let progress = 1.0 - remaining as f32 / durations.death.max(1) as f32;
                let fall = progress * size;
                let fade = 1.0 - progress;
                frame.fill_rect(
                    x,
                    placement.top + fall * 1.5,
                    1.0,
                    head,
                    palette::HOSTILE_HEAD.with_alpha(fade),
                );
                frame.fill_rect(
                    x,
                    placement.top + head + fall,
                    1.0,
                    size * 0.5,
                    palette::HOSTILE_TORSO.with_alpha(fade),
                );
            }
            HostilePose::Idle | HostilePose::Chasing => {
                let bob = if pose == HostilePose::Chasing {
                    (tick as f32 * 0.2).sin() * 2.0
                } else {
                    (tick as f32 * 0.05).sin()
                };
                let torso = (size * 0.5).floor();
                let legs = size - head - torso;
                frame.fill_rect(x, placement.top + bob, 1.0, head, palette::HOSTILE_HEAD);
                frame.fill_rect(
                    x,
                    placement.top + head + bob,
                    1.0,
                    torso,
                    palette::HOSTILE_TORSO,
                );
                frame.fill_rect(
                    x,
                    placement.top + head + torso,
                    1.0,
                    legs,
                    palette::HOSTILE_LEGS,
                );
            }
        }
    }
}

fn draw_medkit(frame: &mut Framebuffer, depth: &DepthBuffer, placement: &Placement) {
    let size = placement.size;
    let box_height = (size * 0.6).floor();
    let box_top = placement.top + size * 0.2;
    let cross = (size * 0.2).floor().max(1.0);
    for stripe in placement.left..placement.right {
        if !depth.is_visible(stripe, placement.depth) {
            continue;
        }
        let x = stripe as f32;
        let relative = (stripe - placement.left) as f32;
        let vertical_bar = relative > size / 2.0 - cross / 2.0 && relative < size / 2.0 + cross / 2.0;

        frame.fill_rect(x, box_top, 1.0, box_height, palette::MEDKIT_BOX);
        if vertical_bar {
            frame.fill_rect(x, box_top, 1.0, box_height, Color::WHITE);
        } else {
            let bar_top = box_top + box_height / 2.0 - cross / 2.0;
            frame.fill_rect(x, bar_top, 1.0, cross, Color::WHITE);
        }
    }
}

fn draw_nameplate(
    frame: &mut Framebuffer,
    placement: &Placement,
    name: &str,
    health_ratio: f32,
    overlays: &mut Vec<TextOverlay>,
) {
    let center = placement.center_x as f32;
    let x = center - HEALTH_BAR_WIDTH / 2.0;
    let y = placement.top - HEALTH_BAR_LIFT;
    frame.fill_rect(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, palette::HEALTH_LOST);
    frame.fill_rect(
        x,
        y,
        HEALTH_BAR_WIDTH * health_ratio.clamp(0.0, 1.0),
        HEALTH_BAR_HEIGHT,
        palette::HEALTH_LEFT,
    );
    let border = rectangle(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT)
        .into_styled(outline(Color::BLACK, 1.0));
    frame.paint(&border, 1.0);

    overlays.push(TextOverlay {
        text: name.to_uppercase(),
        position: Vec2::new(center, placement.top - NAME_LIFT),
        size: NAME_SIZE,
        color: Color::WHITE,
        align: TextAlign::Center,
    });
}

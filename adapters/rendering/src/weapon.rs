//! First-person weapon view: bob, recoil, reload dip, slash and the switch cross-fade.

use std::f32::consts::PI;

use embedded_graphics::{
    geometry::Angle,
    prelude::*,
    primitives::{Arc, PrimitiveStyle, Triangle},
};
use glam::Vec2;
use mobile_strike_core::Weapon;

use crate::{
    framebuffer::{diameter, fill, point},
    palette, Color, Durations, Framebuffer, ScenePlayer,
};

const BOB_SPEED: f32 = 0.08;
const BOB_AMOUNT: f32 = 3.0;
const RELOAD_DIP: f32 = 40.0;
const EMPTY_CLICK_JERK: f32 = -15.0;
const SWITCH_TRAVEL: f32 = 100.0;

/// Quadratic ease that accelerates through the first half and decelerates through the second.
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub(crate) fn draw_weapon(
    frame: &mut Framebuffer,
    player: &ScenePlayer,
    tick: u64,
    durations: &Durations,
) {
    let view = WeaponView {
        player,
        tick,
        durations,
        screen: Vec2::new(frame.width() as f32, frame.height() as f32),
    };
    match player.switch {
        Some(switch) => {
            let progress = 1.0 - switch.remaining as f32 / durations.switch.max(1) as f32;
            let eased = ease_in_out_quad(progress);
            view.draw(frame, switch.previous, eased * SWITCH_TRAVEL);
            view.draw(frame, player.weapon, (1.0 - eased) * SWITCH_TRAVEL);
        }
        None => view.draw(frame, player.weapon, 0.0),
    }
}

struct WeaponView<'a> {
    player: &'a ScenePlayer,
    tick: u64,
    durations: &'a Durations,
    screen: Vec2,
}

impl WeaponView<'_> {
    fn draw(&self, frame: &mut Framebuffer, weapon: Weapon, offset: f32) {
        match weapon {
            Weapon::Gun => self.draw_gun(frame, offset),
            Weapon::Knife => self.draw_knife(frame, offset),
        }
    }

    fn bob(&self) -> f32 {
        let tick = self.tick as f32;
        let stride = if self.player.moving {
            (tick * BOB_SPEED).sin() * BOB_AMOUNT
        } else {
            0.0
        };
        stride + (tick * BOB_SPEED / 2.0).sin() * (BOB_AMOUNT / 3.0)
    }

    fn draw_gun(&self, frame: &mut Framebuffer, offset: f32) {
        let player = self.player;
        let mut lift = player.recoil;
        if let Some(remaining) = player.reload_remaining {
            let phase = remaining as f32 / self.durations.reload.max(1) as f32;
            lift += RELOAD_DIP * (phase * PI).sin();
        }
        if player.empty_click > 0 {
            let progress =
                1.0 - player.empty_click as f32 / self.durations.empty_click.max(1) as f32;
            lift += (progress * PI).sin() * EMPTY_CLICK_JERK;
        }

        let x = self.screen.x / 2.0 - 25.0;
        let y = self.screen.y - 70.0 + self.bob() + lift + offset;
        frame.fill_rect(x, y + 5.0, 50.0, 10.0, palette::GUN_SLIDE);
        frame.fill_rect(x, y + 15.0, 50.0, 15.0, palette::GUN_FRAME);
        frame.fill_rect(x + 10.0, y + 30.0, 15.0, 25.0, palette::GUN_GRIP);
        frame.fill_rect(x - 5.0, y, 10.0, 5.0, palette::GUN_BARREL);

        if player.muzzle_flash > 0 {
            let tip = Vec2::new(x, y);
            let flames = [
                (Vec2::new(10.0, 15.0), palette::FLASH_OUTER),
                (Vec2::new(5.0, 10.0), palette::FLASH_INNER),
            ];
            for (reach, color) in flames {
                let flame = Triangle::new(
                    point(tip),
                    point(tip + Vec2::new(-reach.x, -reach.y)),
                    point(tip + Vec2::new(reach.x, -reach.y)),
                );
                frame.paint(&flame.into_styled(fill(color)), color.alpha);
            }
        }
    }

    fn draw_knife(&self, frame: &mut Framebuffer, offset: f32) {
        let slash = self.player.slash;
        let progress = if slash > 0 {
            1.0 - slash as f32 / self.durations.slash.max(1) as f32
        } else {
            0.0
        };
        let swing = (progress * PI).sin();
        let angle = swing * -0.8;
        let anchor = Vec2::new(
            self.screen.x / 2.0 + 50.0 + swing * -30.0,
            self.screen.y - 60.0 + self.bob() + swing * 10.0 + offset,
        );
        let blade = Blade {
            anchor,
            rotation: Vec2::from_angle(angle),
        };

        blade.fill(frame, rect(0.0, 0.0, 10.0, 30.0), palette::KNIFE_HANDLE);
        blade.fill(frame, rect(-5.0, 0.0, 20.0, 5.0), palette::KNIFE_GUARD);
        blade.fill(
            frame,
            [
                Vec2::new(5.0, 0.0),
                Vec2::new(5.0, -40.0),
                Vec2::new(10.0, -35.0),
                Vec2::new(10.0, 0.0),
            ],
            palette::KNIFE_BLADE,
        );
        blade.fill(
            frame,
            [
                Vec2::new(5.0, 0.0),
                Vec2::new(5.0, -40.0),
                Vec2::new(7.0, -38.0),
                Vec2::new(7.0, 0.0),
            ],
            palette::KNIFE_EDGE,
        );

        if slash > 1 {
            let color = Color::WHITE.with_alpha(0.5 * progress);
            let trail = Arc::with_center(
                point(Vec2::new(self.screen.x / 2.0 + 10.0, self.screen.y)),
                diameter(80.0),
                Angle::from_radians(-PI * 0.6),
                Angle::from_radians(PI * 0.2),
            )
            .into_styled(PrimitiveStyle::with_stroke(color.to_rgb888(), 4));
            frame.paint(&trail, color.alpha);
        }
    }
}

/// Knife pose: local shapes are rotated about the grip and moved to the anchor.
struct Blade {
    anchor: Vec2,
    rotation: Vec2,
}

impl Blade {
    fn fill(&self, frame: &mut Framebuffer, corners: [Vec2; 4], color: Color) {
        let [a, b, c, d] = corners.map(|corner| point(self.anchor + self.rotation.rotate(corner)));
        for triangle in [Triangle::new(a, b, c), Triangle::new(a, c, d)] {
            frame.paint(&triangle.into_styled(fill(color)), color.alpha);
        }
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> [Vec2; 4] {
    [
        Vec2::new(x, y),
        Vec2::new(x + width, y),
        Vec2::new(x + width, y + height),
        Vec2::new(x, y + height),
    ]
}

//! Screen-space overlays: touch controls, flashes, the death screen and the HUD.

use embedded_graphics::{prelude::*, primitives::Circle};
use glam::Vec2;
use mobile_strike_core::{Weapon, TICKS_PER_SECOND};

use crate::{
    framebuffer::{diameter, fill, outline, point, rectangle},
    palette, Color, Durations, Framebuffer, ScenePlayer, TextAlign, TextOverlay, TouchControls,
};

const CROSSHAIR_SIZE: f32 = 4.0;
const CROSSHAIR_GAP: f32 = 3.0;
const BORDER: f32 = 4.0;

/// Collects text for the backend alongside the pixels drawn into the frame.
pub(crate) struct Overlay<'a> {
    pub(crate) frame: &'a mut Framebuffer,
    pub(crate) texts: &'a mut Vec<TextOverlay>,
}

impl Overlay<'_> {
    fn text(
        &mut self,
        text: impl Into<String>,
        position: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    ) {
        self.texts.push(TextOverlay {
            text: text.into(),
            position,
            size,
            color,
            align,
        });
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        let disc = Circle::with_center(point(center), diameter(radius)).into_styled(fill(color));
        self.frame.paint(&disc, color.alpha);
    }

    fn frame_rect(&mut self, origin: Vec2, size: Vec2, thickness: f32, color: Color) {
        let border = rectangle(origin.x, origin.y, size.x, size.y)
            .into_styled(outline(color, thickness));
        self.frame.paint(&border, color.alpha);
    }

    fn width(&self) -> f32 {
        self.frame.width() as f32
    }

    fn height(&self) -> f32 {
        self.frame.height() as f32
    }
}

pub(crate) fn draw_touch_controls(out: &mut Overlay<'_>, touch: &TouchControls, weapon: Weapon) {
    let layout = &touch.layout;
    if let Some(joystick) = touch.joystick {
        out.disc(joystick.center, layout.joystick_base_radius, palette::JOYSTICK_BASE);
        out.disc(
            joystick.handle,
            layout.joystick_handle_radius,
            palette::JOYSTICK_HANDLE,
        );
    }

    let switch = layout.switch_button;
    out.frame_rect(switch.origin, switch.size, 2.0, Color::WHITE);
    out.text(
        "+",
        switch.origin + switch.size / 2.0 + Vec2::new(0.0, 2.0),
        24.0,
        Color::WHITE,
        TextAlign::Center,
    );

    if weapon == Weapon::Gun {
        let reload = layout.reload_button;
        out.disc(reload.center, reload.radius, Color::WHITE.with_alpha(0.4));
        out.text("RELOAD", reload.center, 10.0, Color::BLACK, TextAlign::Center);
    }

    let shoot = layout.shoot_button;
    let alpha = if touch.shoot_held { 0.7 } else { 0.4 };
    out.disc(shoot.center, shoot.radius, Color::WHITE.with_alpha(alpha));
    out.text("SHOOT", shoot.center, 12.0, Color::BLACK, TextAlign::Center);
}

/// Damage flash, immunity blink and the low-health pulse for a living player.
pub(crate) fn draw_vignettes(
    out: &mut Overlay<'_>,
    player: &ScenePlayer,
    tick: u64,
    durations: &Durations,
) {
    let (width, height) = (out.width(), out.height());
    if player.damage_flash > 0 {
        let alpha = player.damage_flash as f32 / durations.damage_flash.max(1) as f32 * 0.5;
        out.frame
            .fill_rect(0.0, 0.0, width, height, palette::DAMAGE.with_alpha(alpha));
    }
    if player.immune && tick % 20 < 10 {
        out.frame_rect(
            Vec2::splat(2.0),
            Vec2::new(width - 4.0, height - 4.0),
            BORDER,
            Color::WHITE.with_alpha(0.5),
        );
    }
    if player.health.saturating_mul(4) <= player.max_health {
        let pulse = 0.35 + 0.25 * (tick as f32 * 0.1).sin();
        out.frame_rect(
            Vec2::ZERO,
            Vec2::new(width, height),
            BORDER,
            palette::DAMAGE.with_alpha(pulse),
        );
    }
}

pub(crate) fn draw_death_screen(out: &mut Overlay<'_>, respawn_in: u32) {
    let (width, height) = (out.width(), out.height());
    out.frame.fill_rect(0.0, 0.0, width, height, palette::DEATH_SHROUD);
    out.text(
        "YOU DIED",
        Vec2::new(width / 2.0, height / 2.0 - 20.0),
        40.0,
        Color::WHITE,
        TextAlign::Center,
    );
    out.text(
        format!("Respawning in {}...", respawn_in.div_ceil(TICKS_PER_SECOND)),
        Vec2::new(width / 2.0, height / 2.0 + 20.0),
        20.0,
        Color::WHITE,
        TextAlign::Center,
    );
}

pub(crate) fn draw_hud(out: &mut Overlay<'_>, player: &ScenePlayer, tick: u64) {
    let (width, height) = (out.width(), out.height());
    out.text(
        format!("SCORE: {:06}", player.score),
        Vec2::new(10.0, 20.0),
        16.0,
        Color::WHITE,
        TextAlign::Left,
    );

    let ratio = player.health as f32 / player.max_health.max(1) as f32;
    out.frame
        .fill_rect(10.0, height - 25.0, 100.0, 15.0, palette::HUD_HEALTH_LOST);
    out.frame.fill_rect(
        10.0,
        height - 25.0,
        100.0 * ratio.clamp(0.0, 1.0),
        15.0,
        palette::HUD_HEALTH_LEFT,
    );
    out.frame_rect(
        Vec2::new(10.0, height - 25.0),
        Vec2::new(100.0, 15.0),
        1.0,
        Color::WHITE,
    );
    out.text(
        format!("{}/{}", player.health, player.max_health),
        Vec2::new(60.0, height - 17.0),
        12.0,
        Color::WHITE,
        TextAlign::Center,
    );

    let center = Vec2::new(width / 2.0, height / 2.0);
    if player.reload_remaining.is_some() {
        out.text("RELOADING...", center, 20.0, palette::RELOADING, TextAlign::Center);
    } else {
        let kick = player.recoil / 2.0;
        let color = Color::WHITE.with_alpha(0.75);
        let (size, gap) = (CROSSHAIR_SIZE, CROSSHAIR_GAP);
        out.frame
            .fill_rect(center.x - 1.0, center.y - gap - size + kick, 2.0, size, color);
        out.frame
            .fill_rect(center.x - 1.0, center.y + gap + kick, 2.0, size, color);
        out.frame
            .fill_rect(center.x - gap - size, center.y - 1.0 + kick, size, 2.0, color);
        out.frame
            .fill_rect(center.x + gap, center.y - 1.0 + kick, size, 2.0, color);
    }

    if player.weapon == Weapon::Gun {
        let color = if player.ammo_blink > 0 && tick % 10 < 5 {
            palette::AMMO_BLINK
        } else {
            Color::WHITE
        };
        out.text(
            format!("AMMO: {}/{}", player.ammo, player.max_ammo),
            Vec2::new(width - 10.0, height - 10.0),
            16.0,
            color,
            TextAlign::Right,
        );
    }
}

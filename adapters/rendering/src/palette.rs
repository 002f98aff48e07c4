//! Fixed colors of the city, its inhabitants and the HUD.

use mobile_strike_core::TileCode;

use crate::Color;

/// Brightness factor applied to faces struck on a y-step.
pub(crate) const SIDE_SHADE: f32 = 0.7;

pub(crate) const SKY: Color = Color::from_rgb_u8(0x87, 0xce, 0xfa);
const SAND: Color = Color::from_rgb_u8(0xf0, 0xe6, 0x8c);
const ASPHALT: Color = Color::from_rgb_u8(0x4b, 0x55, 0x63);
const GRASS: Color = Color::from_rgb_u8(0x16, 0x65, 0x34);

pub(crate) const HOSTILE_HEAD: Color = Color::from_rgb_u8(0xd2, 0xb4, 0x8c);
pub(crate) const HOSTILE_TORSO: Color = Color::from_rgb_u8(0x00, 0x64, 0x00);
pub(crate) const HOSTILE_LEGS: Color = Color::from_rgb_u8(0x00, 0x00, 0x8b);
pub(crate) const MEDKIT_BOX: Color = Color::from_rgb_u8(0x22, 0xc5, 0x5e);
pub(crate) const HEALTH_LOST: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
pub(crate) const HEALTH_LEFT: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);

pub(crate) const GUN_SLIDE: Color = Color::from_rgb_u8(0x3a, 0x3a, 0x3a);
pub(crate) const GUN_FRAME: Color = Color::from_rgb_u8(0x4a, 0x4a, 0x4a);
pub(crate) const GUN_GRIP: Color = Color::from_rgb_u8(0x2a, 0x2a, 0x2a);
pub(crate) const GUN_BARREL: Color = Color::from_rgb_u8(0x5a, 0x5a, 0x5a);
pub(crate) const FLASH_OUTER: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);
pub(crate) const FLASH_INNER: Color = Color::from_rgb_u8(0xff, 0xa5, 0x00);
pub(crate) const KNIFE_HANDLE: Color = Color::from_rgb_u8(0x6b, 0x4f, 0x3a);
pub(crate) const KNIFE_GUARD: Color = Color::from_rgb_u8(0x55, 0x55, 0x55);
pub(crate) const KNIFE_BLADE: Color = Color::from_rgb_u8(0xc0, 0xc0, 0xc0);
pub(crate) const KNIFE_EDGE: Color = Color::from_rgb_u8(0xe0, 0xe0, 0xe0);

pub(crate) const JOYSTICK_BASE: Color = Color::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 0.5);
pub(crate) const JOYSTICK_HANDLE: Color =
    Color::new(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0, 0.7);
pub(crate) const DAMAGE: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
pub(crate) const DEATH_SHROUD: Color = Color::new(150.0 / 255.0, 0.0, 0.0, 0.5);
pub(crate) const HUD_HEALTH_LOST: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
pub(crate) const HUD_HEALTH_LEFT: Color = Color::from_rgb_u8(0x00, 0x80, 0x00);
pub(crate) const RELOADING: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);
pub(crate) const AMMO_BLINK: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);

/// Base color of a wall tile before side shading.
pub(crate) fn wall(tile: TileCode) -> Color {
    match tile {
        TileCode::BORDER => Color::from_rgb_u8(0x6b, 0x72, 0x80),
        TileCode::CONCRETE => Color::from_rgb_u8(0x71, 0x3f, 0x12),
        TileCode::PARK_WALL => Color::from_rgb_u8(0x16, 0x65, 0x34),
        TileCode::SAND_DUNE => Color::from_rgb_u8(0xf5, 0x9e, 0x0b),
        TileCode::BRICK => Color::from_rgb_u8(0xb9, 0x1c, 0x1c),
        TileCode::WINDOW => Color::from_rgb_u8(0x7d, 0xd3, 0xfc),
        TileCode::PIER => Color::from_rgb_u8(0xa1, 0x62, 0x07),
        TileCode::BUSHES => Color::from_rgb_u8(0x15, 0x80, 0x3d),
        _ => Color::from_rgb_u8(0xa8, 0x55, 0xf7),
    }
}

/// Ground color under the player: beach to the south, streets in the middle, park to the north.
pub(crate) fn floor(y: f32) -> Color {
    if y > 12.5 {
        SAND
    } else if y > 7.5 {
        ASPHALT
    } else {
        GRASS
    }
}

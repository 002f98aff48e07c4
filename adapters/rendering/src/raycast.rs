//! Column-by-column wall casting over the tile grid.

use glam::Vec2;
use mobile_strike_core::{Camera, TileCode, TileMap};

use crate::{framebuffer::DepthBuffer, palette, Framebuffer};

/// Grid face a ray struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallSide {
    /// The ray crossed a vertical grid line (an x-step).
    Vertical,
    /// The ray crossed a horizontal grid line (a y-step); drawn shaded.
    Horizontal,
}

/// First wall a ray meets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Perpendicular distance to the wall along the camera direction.
    pub distance: f32,
    /// Tile that was struck.
    pub tile: TileCode,
    /// Face that was struck.
    pub side: WallSide,
}

/// Walks the grid from `origin` along `direction` until a non-empty tile is met.
///
/// Cells outside the grid count as walls. Returns `None` only for a zero
/// direction.
#[must_use]
pub fn cast_ray(map: &TileMap, origin: Vec2, direction: Vec2) -> Option<WallHit> {
    if direction == Vec2::ZERO {
        return None;
    }

    let mut cell_x = origin.x.floor() as i32;
    let mut cell_y = origin.y.floor() as i32;
    let delta_x = axis_delta(direction.x);
    let delta_y = axis_delta(direction.y);
    let (step_x, mut side_x) = axis_start(direction.x, origin.x, cell_x, delta_x);
    let (step_y, mut side_y) = axis_start(direction.y, origin.y, cell_y, delta_y);

    let limit = (map.columns() + map.rows()) * 2 + 2;
    for _ in 0..limit {
        let side = if side_x < side_y {
            side_x += delta_x;
            cell_x += step_x;
            WallSide::Vertical
        } else {
            side_y += delta_y;
            cell_y += step_y;
            WallSide::Horizontal
        };

        let tile = map.get(cell_x, cell_y).unwrap_or(TileCode::BORDER);
        if tile.is_empty() {
            continue;
        }

        let distance = match side {
            WallSide::Vertical => {
                (cell_x as f32 - origin.x + (1 - step_x) as f32 / 2.0) / direction.x
            }
            WallSide::Horizontal => {
                (cell_y as f32 - origin.y + (1 - step_y) as f32 / 2.0) / direction.y
            }
        };
        return Some(WallHit {
            distance,
            tile,
            side,
        });
    }
    None
}

fn axis_delta(component: f32) -> f32 {
    if component == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / component).abs()
    }
}

fn axis_start(component: f32, origin: f32, cell: i32, delta: f32) -> (i32, f32) {
    if delta.is_infinite() {
        return (1, f32::INFINITY);
    }
    if component < 0.0 {
        (-1, (origin - cell as f32) * delta)
    } else {
        (1, (cell as f32 + 1.0 - origin) * delta)
    }
}

/// Draws one wall slice per column and records each column's distance.
pub(crate) fn draw_walls(
    frame: &mut Framebuffer,
    depth: &mut DepthBuffer,
    map: &TileMap,
    camera: &Camera,
) {
    let screen = frame.size();
    let height = frame.height() as f32;
    for column in 0..frame.width() {
        let direction = camera.ray_direction(column, screen);
        let Some(hit) = cast_ray(map, camera.position, direction) else {
            continue;
        };
        depth.set(column, hit.distance);

        let line = (height / hit.distance).floor();
        let start = (height / 2.0 - line / 2.0).max(0.0);
        let end = (height / 2.0 + line / 2.0).min(height - 1.0);
        let mut color = palette::wall(hit.tile);
        if hit.side == WallSide::Horizontal && hit.tile != TileCode::WINDOW {
            color = color.shaded(palette::SIDE_SHADE);
        }
        frame.fill_rect(column as f32, start, 1.0, end - start, color);
    }
}

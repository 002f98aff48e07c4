//! Camera basis shared by the raycaster, sprite compositing, and hit detection.

use glam::Vec2;

/// Pixel dimensions of a render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    width: u32,
    height: u32,
}

impl ScreenSize {
    /// Creates a new screen size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixel columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of pixel rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Column under the crosshair.
    #[must_use]
    pub fn center_column(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// Position plus the `[direction, plane]` projection basis.
///
/// The plane is kept perpendicular to the direction by only ever rotating
/// both vectors together; the basis is therefore never singular.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in grid units.
    pub position: Vec2,
    /// Unit facing direction.
    pub direction: Vec2,
    /// Camera plane; its length relative to `direction` sets the field of view.
    pub plane: Vec2,
}

/// Screen-space placement of a world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Distance along the facing direction (camera-space depth).
    pub depth: f32,
    /// Sideways camera-space offset.
    pub lateral: f32,
    /// Screen column of the projected centre.
    pub screen_x: i32,
    /// Projected height and width of a unit-sized billboard, in pixels.
    pub size: i32,
}

impl Camera {
    /// Creates a camera from its three vectors.
    #[must_use]
    pub const fn new(position: Vec2, direction: Vec2, plane: Vec2) -> Self {
        Self {
            position,
            direction,
            plane,
        }
    }

    /// Rotates direction and plane by the same signed angle.
    #[must_use]
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
        Self {
            position: self.position,
            direction: rotate(self.direction),
            plane: rotate(self.plane),
        }
    }

    /// Direction of the ray cast through the provided screen column.
    #[must_use]
    pub fn ray_direction(&self, column: u32, screen: ScreenSize) -> Vec2 {
        let camera_x = 2.0 * column as f32 / screen.width() as f32 - 1.0;
        self.direction + self.plane * camera_x
    }

    /// Transforms a world point into camera space using the inverse basis.
    ///
    /// Returns `(lateral, depth)`.
    #[must_use]
    pub fn to_camera_space(&self, point: Vec2) -> (f32, f32) {
        let relative = point - self.position;
        let inv_det =
            1.0 / (self.plane.x * self.direction.y - self.direction.x * self.plane.y);
        let lateral = inv_det * (self.direction.y * relative.x - self.direction.x * relative.y);
        let depth = inv_det * (-self.plane.y * relative.x + self.plane.x * relative.y);
        (lateral, depth)
    }

    /// Projects a world point onto the screen.
    ///
    /// Points at or behind the camera plane yield `None`.
    #[must_use]
    pub fn project(&self, point: Vec2, screen: ScreenSize) -> Option<SpriteProjection> {
        let (lateral, depth) = self.to_camera_space(point);
        if depth <= 0.0 {
            return None;
        }

        let half_width = screen.width() as f32 / 2.0;
        let screen_x = (half_width * (1.0 + lateral / depth)).floor() as i32;
        let size = (screen.height() as f32 / depth).floor().abs() as i32;
        Some(SpriteProjection {
            depth,
            lateral,
            screen_x,
            size,
        })
    }

    /// Depth of a billboard centred on `point` when its projected half-width
    /// strictly contains the centre column.
    #[must_use]
    pub fn crosshair_depth(&self, point: Vec2, screen: ScreenSize) -> Option<f32> {
        let projection = self.project(point, screen)?;
        let offset = (projection.screen_x as f32 - screen.center_column()).abs();
        (offset < projection.size as f32 / 2.0).then_some(projection.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize::new(320, 200);

    fn spawn_camera() -> Camera {
        Camera::new(
            Vec2::new(10.5, 10.5),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.66),
        )
    }

    #[test]
    fn rotation_keeps_basis_perpendicular() {
        let mut camera = spawn_camera();
        for _ in 0..1_000 {
            camera = camera.rotated(0.03);
        }
        camera = camera.rotated(-1.234);

        assert!(camera.direction.dot(camera.plane).abs() < 1e-3);
        assert!((camera.direction.length() - 1.0).abs() < 1e-3);
        assert!((camera.plane.length() - 0.66).abs() < 1e-3);
    }

    #[test]
    fn point_straight_ahead_lands_on_center_column() {
        let camera = spawn_camera();
        let projection = camera
            .project(Vec2::new(7.3, 10.5), SCREEN)
            .expect("point ahead of the camera");

        assert!((projection.depth - 3.2).abs() < 1e-4);
        assert_eq!(projection.screen_x, 160);
        assert_eq!(projection.size, 62);
    }

    #[test]
    fn points_behind_the_camera_are_discarded() {
        let camera = spawn_camera();
        assert!(camera.project(Vec2::new(12.5, 10.5), SCREEN).is_none());
        assert!(camera.project(Vec2::new(10.5, 12.5), SCREEN).is_none());
    }

    #[test]
    fn crosshair_covers_only_centred_billboards() {
        let camera = spawn_camera();

        let centred = camera.crosshair_depth(Vec2::new(7.3, 10.5), SCREEN);
        assert!(centred.is_some_and(|depth| (depth - 3.2).abs() < 1e-4));
        assert!(camera
            .crosshair_depth(Vec2::new(7.5, 13.0), SCREEN)
            .is_none());
    }

    #[test]
    fn edge_columns_span_the_camera_plane() {
        let camera = spawn_camera();
        let left = camera.ray_direction(0, SCREEN);
        let center = camera.ray_direction(160, SCREEN);

        assert_eq!(left, Vec2::new(-1.0, -0.66));
        assert_eq!(center, Vec2::new(-1.0, 0.0));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts and the software renderer for Mobile Strike adapters.
//!
//! Adapters describe what is visible in a [`Scene`] populated from world
//! queries, the [`Renderer`] rasterises it into a [`Frame`] of RGBA pixels
//! plus [`TextOverlay`] records, and a [`RenderingBackend`] presents frames
//! and reports raw input.

mod framebuffer;
mod hud;
mod palette;
mod raycast;
mod sprites;
mod weapon;

use anyhow::Result as AnyResult;
use embedded_graphics::pixelcolor::Rgb888;
use glam::Vec2;
use mobile_strike_core::{Camera, InputEvent, ScreenSize, TileMap, TouchLayout, Tuning, Weapon};
use std::time::Duration;
use thiserror::Error;

pub use framebuffer::{Blended, DepthBuffer, Framebuffer};
pub use raycast::{cast_ray, WallHit, WallSide};
pub use weapon::ease_in_out_quad;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a different opacity.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Darkens the color by scaling each byte channel and truncating.
    #[must_use]
    pub fn shaded(self, factor: f32) -> Self {
        let channel = |value: f32| ((value * 255.0).round() * factor).floor() / 255.0;
        Self {
            red: channel(self.red),
            green: channel(self.green),
            blue: channel(self.blue),
            alpha: self.alpha,
        }
    }

    /// Converts the color into RGBA bytes.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            byte(self.red),
            byte(self.green),
            byte(self.blue),
            byte(self.alpha),
        ]
    }

    /// Drops the alpha channel for drawing through embedded-graphics targets.
    #[must_use]
    pub fn to_rgb888(self) -> Rgb888 {
        let [red, green, blue, _] = self.to_rgba8();
        Rgb888::new(red, green, blue)
    }
}

/// Horizontal anchoring of a text overlay relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the position.
    Left,
    /// Text is centred on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// Text the backend draws over the pixel frame, in logical screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    /// Text to draw.
    pub text: String,
    /// Anchor point; the vertical coordinate is the text's middle.
    pub position: Vec2,
    /// Font size in logical pixels.
    pub size: f32,
    /// Fill color.
    pub color: Color,
    /// Horizontal anchoring.
    pub align: TextAlign,
}

/// Rendered output: the pixel buffer plus text records.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Rasterised pixels.
    pub pixels: Framebuffer,
    /// Text drawn after the pixels, in order.
    pub overlays: Vec<TextOverlay>,
}

impl Frame {
    /// Allocates an empty frame for the provided surface.
    pub fn new(screen: ScreenSize) -> Result<Self, RenderingError> {
        Ok(Self {
            pixels: Framebuffer::new(screen)?,
            overlays: Vec::new(),
        })
    }
}

/// Weapon swap in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneSwitch {
    /// Ticks until the incoming weapon is ready.
    pub remaining: u32,
    /// Weapon being put away.
    pub previous: Weapon,
}

/// Player state the first-person view and HUD depend on.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePlayer {
    /// Eye position and projection basis.
    pub camera: Camera,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Rounds in the magazine.
    pub ammo: u32,
    /// Magazine capacity.
    pub max_ammo: u32,
    /// Cumulative score.
    pub score: u32,
    /// Equipped weapon.
    pub weapon: Weapon,
    /// Ticks until respawn while dead; `None` while alive.
    pub respawn_in: Option<u32>,
    /// Whether spawn immunity is active.
    pub immune: bool,
    /// Ticks left on the reload in progress.
    pub reload_remaining: Option<u32>,
    /// Weapon swap in progress.
    pub switch: Option<SceneSwitch>,
    /// Vertical recoil offset in pixels.
    pub recoil: f32,
    /// Whether the player moved this tick.
    pub moving: bool,
    /// Ticks left on the muzzle flash.
    pub muzzle_flash: u32,
    /// Ticks left on the knife slash animation.
    pub slash: u32,
    /// Ticks left on the red damage flash.
    pub damage_flash: u32,
    /// Ticks left on the dry-fire jerk.
    pub empty_click: u32,
    /// Ticks left on the ammo counter blink.
    pub ammo_blink: u32,
}

impl ScenePlayer {
    /// Creates a healthy, idle player holding a full gun.
    #[must_use]
    pub fn new(camera: Camera, max_health: u32, max_ammo: u32) -> Self {
        Self {
            camera,
            health: max_health,
            max_health,
            ammo: max_ammo,
            max_ammo,
            score: 0,
            weapon: Weapon::Gun,
            respawn_in: None,
            immune: false,
            reload_remaining: None,
            switch: None,
            recoil: 0.0,
            moving: false,
            muzzle_flash: 0,
            slash: 0,
            damage_flash: 0,
            empty_click: 0,
            ammo_blink: 0,
        }
    }
}

/// Animation pose of a hostile billboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostilePose {
    /// Standing still with a slow bob.
    Idle,
    /// Chasing the player with a faster bob.
    Chasing,
    /// Collapsing and fading out.
    Expiring {
        /// Ticks left in the death animation.
        remaining: u32,
    },
}

/// Visual variant of an entity billboard.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEntityKind {
    /// Humanoid hostile with a nameplate.
    Hostile {
        /// Display name.
        name: String,
        /// Current health.
        health: u32,
        /// Animation pose.
        pose: HostilePose,
    },
    /// Green box with a white cross.
    Medkit,
}

/// Entity visible in the world; inactive entities are omitted from the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntity {
    /// World position in grid units.
    pub position: Vec2,
    /// Visual variant.
    pub kind: SceneEntityKind,
}

/// Joystick contact to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickView {
    /// Where the contact touched down.
    pub center: Vec2,
    /// Clamped handle position.
    pub handle: Vec2,
}

/// On-screen touch controls, drawn once the backend has seen touch input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchControls {
    /// Button placement.
    pub layout: TouchLayout,
    /// Active joystick contact, if any.
    pub joystick: Option<JoystickView>,
    /// Whether a contact is holding the shoot button.
    pub shoot_held: bool,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static wall grid.
    pub map: TileMap,
    /// Tick counter driving bob and blink animations.
    pub tick: u64,
    /// First-person state.
    pub player: ScenePlayer,
    /// Active entities.
    pub entities: Vec<SceneEntity>,
    /// Touch controls, when shown.
    pub touch: Option<TouchControls>,
}

impl Scene {
    /// Creates a scene with no entities at tick zero.
    #[must_use]
    pub fn new(map: TileMap, player: ScenePlayer) -> Self {
        Self {
            map,
            tick: 0,
            player,
            entities: Vec::new(),
            touch: None,
        }
    }
}

/// Animation lengths and ranges the renderer normalises timers against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Durations {
    pub(crate) reload: u32,
    pub(crate) switch: u32,
    pub(crate) death: u32,
    pub(crate) slash: u32,
    pub(crate) damage_flash: u32,
    pub(crate) empty_click: u32,
    pub(crate) detection_range: f32,
    pub(crate) hostile_health: u32,
}

impl Durations {
    fn new(tuning: &Tuning) -> Self {
        Self {
            reload: tuning.reload_duration,
            switch: tuning.switch_duration,
            death: tuning.death_duration,
            slash: tuning.slash_duration(),
            damage_flash: tuning.damage_flash_duration,
            empty_click: tuning.empty_click_duration,
            detection_range: tuning.detection_range,
            hostile_health: tuning.hostile_health,
        }
    }
}

/// Software renderer producing the first-person view.
#[derive(Clone, Debug)]
pub struct Renderer {
    depth: DepthBuffer,
    durations: Durations,
}

impl Renderer {
    /// Creates a renderer whose animations follow the provided tuning.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            depth: DepthBuffer::new(0),
            durations: Durations::new(tuning),
        }
    }

    /// Per-column wall distances from the most recent frame.
    #[must_use]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Draws the scene into the frame, replacing its previous content.
    ///
    /// Layers go background, walls, sprites, touch controls, then either the
    /// death screen or the flashes, weapon and HUD.
    pub fn render(&mut self, scene: &Scene, frame: &mut Frame) {
        let pixels = &mut frame.pixels;
        frame.overlays.clear();
        if self.depth.columns() == pixels.width() as usize {
            self.depth.reset();
        } else {
            self.depth = DepthBuffer::new(pixels.width());
        }

        let player = &scene.player;
        let width = pixels.width() as f32;
        let half = pixels.height() as f32 / 2.0;
        pixels.fill_rect(0.0, 0.0, width, half, palette::SKY);
        pixels.fill_rect(0.0, half, width, half, palette::floor(player.camera.position.y));

        raycast::draw_walls(pixels, &mut self.depth, &scene.map, &player.camera);
        sprites::draw_sprites(
            pixels,
            &self.depth,
            scene,
            &self.durations,
            &mut frame.overlays,
        );

        let mut overlay = hud::Overlay {
            frame: pixels,
            texts: &mut frame.overlays,
        };
        if let Some(touch) = &scene.touch {
            hud::draw_touch_controls(&mut overlay, touch, player.weapon);
        }
        if let Some(respawn_in) = player.respawn_in {
            hud::draw_death_screen(&mut overlay, respawn_in);
            return;
        }
        hud::draw_vignettes(&mut overlay, player, scene.tick, &self.durations);
        weapon::draw_weapon(&mut *overlay.frame, player, scene.tick, &self.durations);
        hud::draw_hud(&mut overlay, player, scene.tick);
    }
}

/// Raw input and window events gathered by a backend during one frame.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Key and pointer events in arrival order.
    pub events: Vec<InputEvent>,
    /// Whether the pause key was pressed this frame.
    pub pause_toggled: bool,
    /// Whether the backend has ever observed touch input.
    pub touch_active: bool,
}

/// Time spent outside the backend while producing a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Time spent advancing the simulation.
    pub simulation: Duration,
    /// Time spent copying world state into the scene.
    pub scene_population: Duration,
    /// Time spent rasterising the scene.
    pub render: Duration,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear the window around the letterboxed frame.
    pub clear_color: Color,
    /// Logical size of the frames the backend will present.
    pub screen: ScreenSize,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, screen: ScreenSize) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            screen,
        }
    }
}

/// Rendering backend capable of presenting Mobile Strike frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_frame` closure receives the wall-clock frame
    /// delta and the input captured by the adapter, and redraws the frame the
    /// backend then presents.
    fn run<F>(self, presentation: Presentation, update_frame: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Frame) -> FrameSimulationBreakdown + 'static;
}

/// Errors that can occur when constructing rendering targets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// Render surfaces need at least one pixel in each direction.
    #[error("render surface must not be empty (received {width}x{height})")]
    EmptySurface {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

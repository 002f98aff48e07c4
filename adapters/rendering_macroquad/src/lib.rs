#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed window backend for Mobile Strike.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Sound cues are routed through the simulation's
//! sink instead of this crate.
//!
//! The renderer works on a small logical surface. Each frame is uploaded to
//! a nearest-filtered texture and letterboxed into the window, and text
//! overlays are drawn on top at window resolution.

mod input;

use self::input::{InputCollector, Letterbox};
use anyhow::{Context, Result};
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::WHITE,
    input::{is_key_pressed, KeyCode},
    text::{draw_text, measure_text},
    texture::{draw_texture_ex, DrawTextureParams, FilterMode, Image, Texture2D},
};
use mobile_strike_rendering::{
    Frame, FrameInput, FrameSimulationBreakdown, Presentation, RenderingBackend, TextAlign,
    TextOverlay,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use tracing::info;

/// Initial window size as a multiple of the logical surface.
const WINDOW_SCALE: i32 = 3;

/// Window-level shortcuts that never reach the simulation as key events.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` to quit the game loop.
    quit_requested: bool,
    /// `P` pauses or resumes the simulation.
    toggle_pause: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            toggle_pause: is_key_pressed(KeyCode::P),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    scene_population: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    scene_population_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_scene_population: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);

        self.simulation_accum += breakdown.simulation;
        self.scene_population_accum += breakdown.scene_population;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let frames = self.frames;
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_scene_population: self.scene_population_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.scene_population_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_frame: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Frame) -> FrameSimulationBreakdown + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            screen,
        } = presentation;

        let mut frame = Frame::new(screen).context("failed to allocate the frame")?;
        let texture_width =
            u16::try_from(screen.width()).context("frame width exceeds the texture limit")?;
        let texture_height =
            u16::try_from(screen.height()).context("frame height exceeds the texture limit")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::from(texture_width) * WINDOW_SCALE,
            window_height: i32::from(texture_height) * WINDOW_SCALE,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            macroquad::input::simulate_mouse_with_touch(false);

            let background = to_macroquad_color(clear_color);
            let mut image = Image {
                bytes: frame.pixels.as_rgba8().to_vec(),
                width: texture_width,
                height: texture_height,
            };
            let texture = Texture2D::from_image(&image);
            texture.set_filter(FilterMode::Nearest);

            let mut input = InputCollector::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let letterbox = Letterbox::fit(
                    screen,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let events = input.poll(&letterbox);
                let frame_input = FrameInput {
                    events,
                    pause_toggled: keyboard.toggle_pause,
                    touch_active: input.touch_seen(),
                };

                let simulation_breakdown = update_frame(frame_dt, frame_input, &mut frame);

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                image.bytes.copy_from_slice(frame.pixels.as_rgba8());
                texture.update(&image);
                let offset = letterbox.offset();
                let size = letterbox.size();
                draw_texture_ex(
                    texture,
                    offset.x,
                    offset.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(MacroquadVec2::new(size.x, size.y)),
                        ..DrawTextureParams::default()
                    },
                );
                for overlay in &frame.overlays {
                    draw_overlay(overlay, &letterbox);
                }
                let render_duration = render_start.elapsed() + simulation_breakdown.render;

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: simulation_breakdown.simulation,
                    scene_population: simulation_breakdown.scene_population,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_scene_population,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            fps = per_second,
                            fps_10s = trailing_ten_seconds,
                            sim_ms = avg_simulation.as_secs_f64() * 1_000.0,
                            scene_ms = avg_scene_population.as_secs_f64() * 1_000.0,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_overlay(overlay: &TextOverlay, letterbox: &Letterbox) {
    let font_size = (overlay.size * letterbox.scale())
        .round()
        .clamp(1.0, f32::from(u16::MAX)) as u16;
    let dimensions = measure_text(&overlay.text, None, font_size, 1.0);
    let anchor = letterbox.to_window(overlay.position);
    let x = text_left(overlay.align, anchor.x, dimensions.width);
    let baseline = anchor.y + dimensions.offset_y / 2.0;
    let _ = draw_text(
        &overlay.text,
        x,
        baseline,
        f32::from(font_size),
        to_macroquad_color(overlay.color),
    );
}

/// Left edge of a text run of `width` anchored at `anchor_x`.
fn text_left(align: TextAlign, anchor_x: f32, width: f32) -> f32 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - width / 2.0,
        TextAlign::Right => anchor_x - width,
    }
}

fn to_macroquad_color(color: mobile_strike_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobile_strike_rendering::Color;

    fn breakdown(frame_ms: u64, render_ms: u64) -> FrameBreakdown {
        FrameBreakdown {
            frame: Duration::from_millis(frame_ms),
            simulation: Duration::from_millis(2),
            scene_population: Duration::ZERO,
            render: Duration::from_millis(render_ms),
        }
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        for _ in 0..3 {
            assert!(counter.record_frame(breakdown(250, 4)).is_none());
        }

        let metrics = counter
            .record_frame(breakdown(250, 8))
            .expect("one second elapsed");

        assert!((metrics.per_second - 4.0).abs() < 1e-4);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() < 1e-4);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(5));
        assert!(counter.record_frame(breakdown(250, 4)).is_none());
    }

    #[test]
    fn trailing_window_forgets_old_frames() {
        let mut counter = FpsCounter::default();
        for _ in 0..10 {
            let _ = counter.record_frame(breakdown(1_000, 1));
        }
        let metrics = counter
            .record_frame(breakdown(1_500, 1))
            .expect("previous second was reset");

        assert!((metrics.trailing_ten_seconds - 9.0 / 9.5).abs() < 1e-4);
    }

    #[test]
    fn text_alignment_shifts_the_left_edge() {
        assert_eq!(text_left(TextAlign::Left, 100.0, 40.0), 100.0);
        assert_eq!(text_left(TextAlign::Center, 100.0, 40.0), 80.0);
        assert_eq!(text_left(TextAlign::Right, 100.0, 40.0), 60.0);
    }

    #[test]
    fn colours_map_channel_for_channel() {
        let converted = to_macroquad_color(Color::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(
            (converted.r, converted.g, converted.b, converted.a),
            (0.1, 0.2, 0.3, 0.4)
        );
    }
}

//! Host-side frame loop.
//!
//! Dispatches one invocation per pixel per frame across the rayon pool and
//! stores the updated means back into the film. Frames run one after
//! another, so frame `n` always reads the means written by frame `n - 1`;
//! stopping between frames leaves a complete image.

use glam::UVec2;
use image::Rgba;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::accumulator::{self, Film, Invocation};
use crate::camera::Camera;
use crate::integrator::{PathIntegrator, DEFAULT_MAX_BOUNCES};
use crate::scene::Scene;

/// Image and sampling parameters for a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of frames (samples per pixel) to accumulate
    pub frames: u32,
    /// Bounce cap per path
    pub max_bounces: u32,
    /// Added to every frame time; changes the noise pattern of a render
    pub time_offset: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 64,
            max_bounces: DEFAULT_MAX_BOUNCES,
            time_offset: 0.0,
        }
    }
}

/// Progressive renderer owning the accumulation film.
pub struct ProgressiveRenderer {
    scene: Scene,
    camera: Camera,
    integrator: PathIntegrator,
    film: Film,
    frame: u32,
    time_offset: f32,
}

impl ProgressiveRenderer {
    /// Renderer for `scene` seen through the default camera.
    pub fn new(scene: Scene, settings: &RenderSettings) -> Self {
        let camera = Camera::new(UVec2::new(settings.width, settings.height));
        Self::with_camera(scene, camera, settings)
    }

    /// Renderer with an explicit camera. The film matches the camera
    /// resolution.
    pub fn with_camera(scene: Scene, camera: Camera, settings: &RenderSettings) -> Self {
        let film = accumulator::new_film(camera.resolution.x, camera.resolution.y);
        Self {
            scene,
            camera,
            integrator: PathIntegrator::with_max_bounces(settings.max_bounces),
            film,
            frame: 0,
            time_offset: settings.time_offset,
        }
    }

    /// Number of frames accumulated so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Current running means.
    pub fn film(&self) -> &Film {
        &self.film
    }

    /// Take the film out of the renderer.
    pub fn into_film(self) -> Film {
        self.film
    }

    /// Time value fed to the pixel seeds of frame `frame`.
    pub fn frame_time(&self, frame: u32) -> f32 {
        self.time_offset + (frame as f32 + 1.0)
    }

    /// Accumulate one more sample into every pixel.
    pub fn render_frame(&mut self) {
        let frame = self.frame;
        let time = self.frame_time(frame);
        let scene = &self.scene;
        let camera = &self.camera;
        let integrator = &self.integrator;

        self.film.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
            let invocation = Invocation {
                pixel: UVec2::new(x, y),
                frame,
                time,
                mean: accumulator::pixel_mean(pixel),
            };
            *pixel = Rgba(accumulator::invoke(scene, camera, integrator, &invocation).to_array());
        });

        self.frame += 1;
    }

    /// Accumulate `frames` more frames, calling `on_frame` with the film and
    /// the total frame count after each one.
    pub fn render<F>(&mut self, frames: u32, mut on_frame: F)
    where
        F: FnMut(&Film, u32),
    {
        info!(
            "Rendering {} frames at {}x{} using {} CPU cores...",
            frames,
            self.camera.resolution.x,
            self.camera.resolution.y,
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(frames as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} frames ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for _ in 0..frames {
            let frame_start = std::time::Instant::now();
            self.render_frame();
            debug!("Frame {} done in {:.2?}", self.frame, frame_start.elapsed());
            on_frame(&self.film, self.frame);
            pb.inc(1);
        }

        pb.finish();
        info!("{} frames accumulated in {:.2?}", frames, generation_start.elapsed());
    }
}

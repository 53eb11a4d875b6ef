use clap::{Parser, ValueEnum};
use log::LevelFilter;

use lumen::renderer::RenderSettings;
use lumen::scene::Scene;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// Nine-sphere Cornell box with mirror and glass balls
    Cornell,
    /// Cornell box with a triangle mirror panel on the back wall
    CornellTriangles,
    /// Large diffuse floor under a single spherical light
    LitFloor,
}

impl ScenePreset {
    /// Build the scene this preset names.
    pub fn build(self) -> Scene {
        match self {
            ScenePreset::Cornell => Scene::cornell_box(),
            ScenePreset::CornellTriangles => Scene::cornell_box_with_panel(),
            ScenePreset::LitFloor => Scene::lit_floor(),
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Progressive Monte Carlo path tracer")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Number of frames to accumulate (one sample per pixel per frame)
    #[arg(long, short = 'f', default_value = "64", help = "Number of frames to accumulate")]
    pub frames: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cornell", help = "Scene to render")]
    pub scene: ScenePreset,

    /// Hard cap on bounces per path (at least 1)
    #[arg(
        long,
        default_value = "1024",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Hard cap on bounces per path (at least 1)"
    )]
    pub max_bounces: u32,

    /// Offset added to every frame time, changing the noise pattern
    #[arg(long, default_value = "0.0", help = "Offset added to every frame time")]
    pub time_offset: f32,

    /// Worker threads (0 lets rayon decide)
    #[arg(long, default_value = "0", help = "Worker threads (0 lets rayon decide)")]
    pub threads: usize,

    /// Stream the converging image to TEV
    #[arg(long, help = "Stream the converging image to TEV")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Send an update to TEV every N frames
    #[arg(long, default_value = "16", help = "Send an update to TEV every N frames")]
    pub tev_every: u32,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: String,
}

impl Args {
    /// Render settings from the flags, with image dimensions clamped to at least 1.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width.max(1),
            height: self.height.max(1),
            frames: self.frames,
            max_bounces: self.max_bounces.max(1),
            time_offset: self.time_offset,
        }
    }

    /// TEV address to stream to, if streaming was requested.
    pub fn tev_address(&self) -> Option<&str> {
        match (&self.tev_address, self.tev) {
            (Some(address), _) => Some(address.as_str()),
            (None, true) => Some("localhost:14158"),
            (None, false) => None,
        }
    }
}

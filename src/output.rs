//! # Output Module
//!
//! Writes the accumulated film to disk and streams it to a viewer:
//! - PNG export with clamping and sRGB gamma (8-bit)
//! - EXR export of the linear HDR means
//! - Progressive updates to TEV (The EXR Viewer) over TCP
//!
//! The film stores row 0 at the bottom of the image (the camera's
//! convention); every exporter flips it so files come out upright.

use std::net::TcpStream;
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::accumulator::Film;
use crate::error::OutputError;

/// Default TEV port, used when the address has none.
pub const TEV_DEFAULT_PORT: u16 = 14158;

const TEV_CHANNELS: &[&str] = &["R", "G", "B"];

/// Image formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit sRGB PNG
    Png,
    /// 32-bit float linear OpenEXR
    Exr,
}

impl OutputFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &str) -> Result<Self, OutputError> {
        let extension = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(OutputError::UnsupportedFormat(extension)),
        }
    }
}

/// Save the film in the format implied by the path's extension.
pub fn save_film(film: &Film, output_path: &str) -> Result<(), OutputError> {
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => save_film_as_png(film, output_path),
        OutputFormat::Exr => save_film_as_exr(film, output_path),
    }
}

/// sRGB transfer curve with the linear toe for very dark values.
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Tone map the film to 8-bit sRGB, rows flipped to top-down order.
pub fn film_to_ldr(film: &Film) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let (width, height) = film.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = film.get_pixel(x, height - 1 - y);
        let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        Rgb([encode(pixel[0]), encode(pixel[1]), encode(pixel[2])])
    })
}

/// Save the film as an 8-bit PNG with clamping and sRGB gamma.
pub fn save_film_as_png(film: &Film, output_path: &str) -> Result<(), OutputError> {
    film_to_ldr(film).save(output_path)?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save the film as a linear 32-bit float EXR.
pub fn save_film_as_exr(film: &Film, output_path: &str) -> Result<(), OutputError> {
    let (width, height) = film.dimensions();
    write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = film.get_pixel(x as u32, height - 1 - y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path);
    Ok(())
}

/// Number of pixels in a `width` x `height` image, computed without `u32`
/// overflow.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Channel-planar copy of the film (RRR...GGG...BBB...), top row first.
pub fn film_to_planar(film: &Film) -> Vec<f32> {
    let (width, height) = film.dimensions();
    let plane = pixel_count(width, height);
    let mut planar = vec![0.0; plane * 3];
    for y in 0..height {
        for x in 0..width {
            let pixel = film.get_pixel(x, height - 1 - y);
            let i = y as usize * width as usize + x as usize;
            planar[i] = pixel[0];
            planar[plane + i] = pixel[1];
            planar[2 * plane + i] = pixel[2];
        }
    }
    planar
}

/// Add the default TEV port if the address has none.
pub fn tev_address_with_port(address: &str) -> String {
    if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, TEV_DEFAULT_PORT)
    }
}

/// Live connection to a TEV instance showing the film as it converges.
///
/// Failures are logged and never interrupt rendering.
pub struct TevStream {
    client: TevClient,
    image_name: String,
    width: u32,
    height: u32,
}

impl TevStream {
    /// Connect and create the image in TEV. Returns `None` (after logging
    /// a warning) if TEV is unreachable.
    pub fn connect(address: &str, image_name: &str, width: u32, height: u32) -> Option<Self> {
        let address = tev_address_with_port(address);
        debug!("Attempting to connect to TEV at {}", address);

        let stream = match TcpStream::connect(&address) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to connect to TEV on {}: {}", address, e);
                return None;
            }
        };
        if let Err(e) = stream.set_nodelay(true) {
            debug!("Failed to set TCP_NODELAY: {}", e);
        }

        let mut client = TevClient::wrap(stream);
        let create = PacketCreateImage {
            image_name,
            width,
            height,
            channel_names: TEV_CHANNELS,
            grab_focus: true,
        };
        if let Err(e) = client.send(create) {
            warn!("Failed to create image in TEV: {}", e);
            return None;
        }

        info!("Streaming to TEV at {}", address);
        Some(Self {
            client,
            image_name: image_name.to_string(),
            width,
            height,
        })
    }

    /// Push the current film contents.
    pub fn update(&mut self, film: &Film) {
        let start = std::time::Instant::now();
        let data = film_to_planar(film);
        let plane = pixel_count(self.width, self.height) as u64;
        let update = PacketUpdateImage {
            image_name: &self.image_name,
            grab_focus: false,
            channel_names: TEV_CHANNELS,
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
            channel_offsets: &[0, plane, 2 * plane],
            channel_strides: &[1, 1, 1],
            data: &data,
        };

        match self.client.send(update) {
            Ok(_) => debug!("Film sent to TEV in {:.2?}", start.elapsed()),
            Err(e) => warn!("Failed to send image data to TEV: {}", e),
        }
    }
}

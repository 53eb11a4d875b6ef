//! Error types for scene configuration and image export.
//!
//! Rendering itself has no failure modes; these only surface at
//! configuration time and when writing results.

use thiserror::Error;

/// A scene description that violates the primitive invariants.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// Sphere radius is zero, negative or not finite.
    #[error("sphere {index} has invalid radius {radius}")]
    InvalidRadius {
        /// Index of the offending sphere
        index: usize,
        /// The rejected radius
        radius: f32,
    },

    /// Color or emission has a negative or non-finite channel.
    #[error("{primitive} {index} has invalid {field} {value:?}")]
    InvalidMaterial {
        /// "sphere" or "triangle"
        primitive: &'static str,
        /// Index of the offending primitive
        index: usize,
        /// "color" or "emission"
        field: &'static str,
        /// The rejected channels
        value: [f32; 3],
    },

    /// Triangle vertices are collinear or coincident.
    #[error("triangle {index} is degenerate")]
    DegenerateTriangle {
        /// Index of the offending triangle
        index: usize,
    },

    /// Refractive indices must be positive and finite.
    #[error("invalid refractive indices outside={outside} inside={inside}")]
    InvalidRefractiveIndices {
        /// Outside medium index
        outside: f32,
        /// Inside medium index
        inside: f32,
    },
}

/// Failure while writing a rendered image.
#[derive(Debug, Error)]
pub enum OutputError {
    /// PNG encoding or file I/O failed.
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or file I/O failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// The output path does not end in a supported extension.
    #[error("unsupported file extension '{0}', only .png and .exr are supported")]
    UnsupportedFormat(String),
}

//! Lumen progressive path tracer
//!
//! Estimates per-pixel radiance of a fixed scene of spheres and triangles
//! with Monte Carlo path tracing, and folds one new sample per pixel per
//! frame into a running mean. The renderer module drives frames on the CPU;
//! everything below it is pure per-pixel computation.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod accumulator;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod integrator;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod triangle;

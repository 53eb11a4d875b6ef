//! Material system for path tracing.
//!
//! Implements the three reflection kinds: Diffuse (cosine-weighted
//! Lambertian), Specular (ideal mirror), and Refractive (ideal dielectric
//! with Schlick Fresnel). A bounce picks the next direction and a
//! throughput weight; surface color is applied by the integrator.

use glam::Vec3A;
use crate::random::{self, XorShiftRng};

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// How a surface scatters an incoming ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reflection {
    /// Lambertian diffuse, sampled with a cosine-weighted hemisphere.
    #[default]
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Ideal dielectric: Fresnel-weighted choice between mirror and
    /// Snell transmission.
    Refractive,
}

/// Surface properties shared by every primitive kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Radiance emitted by the surface (zero for non-lights).
    pub emission: Color,
    /// Per-channel reflectance in `[0, 1]`.
    pub color: Color,
    /// Scattering model.
    pub reflection: Reflection,
}

impl Material {
    /// Non-emissive diffuse surface.
    pub const fn diffuse(color: Color) -> Self {
        Self { emission: Vec3A::ZERO, color, reflection: Reflection::Diffuse }
    }

    /// Non-emissive mirror.
    pub const fn specular(color: Color) -> Self {
        Self { emission: Vec3A::ZERO, color, reflection: Reflection::Specular }
    }

    /// Non-emissive dielectric.
    pub const fn refractive(color: Color) -> Self {
        Self { emission: Vec3A::ZERO, color, reflection: Reflection::Refractive }
    }

    /// Diffuse emitter with the given surface color.
    pub const fn light(emission: Color, color: Color) -> Self {
        Self { emission, color, reflection: Reflection::Diffuse }
    }
}

/// Indices of refraction on either side of every refractive surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractiveIndices {
    /// Medium the normal points into (usually vacuum/air).
    pub outside: f32,
    /// Medium inside the primitive.
    pub inside: f32,
}

impl Default for RefractiveIndices {
    fn default() -> Self {
        Self { outside: 1.0, inside: 1.5 }
    }
}

/// Result of scattering at a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Direction of the continuing ray.
    pub direction: Vec3A,
    /// Factor the path throughput is multiplied by.
    pub weight: f32,
}

impl Reflection {
    /// Choose the continuation of a path hitting a surface of this kind.
    ///
    /// `normal` is the geometric (outward) normal; it need not face the
    /// incoming ray. Draws 0 (specular, total internal reflection), 1
    /// (refractive) or 2 (diffuse) numbers from `rng`.
    pub fn bounce(
        self,
        incoming: Vec3A,
        normal: Vec3A,
        indices: RefractiveIndices,
        rng: &mut XorShiftRng,
    ) -> Bounce {
        match self {
            Reflection::Specular => Bounce {
                direction: reflect(incoming, normal),
                weight: 1.0,
            },
            Reflection::Refractive => transmit(incoming, normal, indices, rng),
            Reflection::Diffuse => Bounce {
                direction: sample_diffuse(incoming, normal, rng),
                weight: 1.0,
            },
        }
    }
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Fresnel reflectance at normal incidence between media `n1` and `n2`.
pub fn reflectance0(n1: f32, n2: f32) -> f32 {
    let sqrt_r0 = (n1 - n2) / (n1 + n2);
    sqrt_r0 * sqrt_r0
}

/// Schlick's approximation of Fresnel reflectance for the cosine `cosine`
/// between the ray and the normal on the optically thinner side.
pub fn schlick_reflectance(n1: f32, n2: f32, cosine: f32) -> f32 {
    let r0 = reflectance0(n1, n2);
    let c = 1.0 - cosine;
    r0 + (1.0 - r0) * c * c * c * c * c
}

/// Dielectric interface: Snell transmission or mirror reflection, chosen
/// with probability `0.25 + 0.5 * Re` and weighted to stay unbiased.
fn transmit(
    direction: Vec3A,
    normal: Vec3A,
    indices: RefractiveIndices,
    rng: &mut XorShiftRng,
) -> Bounce {
    let reflected = reflect(direction, normal);

    let entering = normal.dot(direction) < 0.0;
    let nl = if entering { normal } else { -normal };
    let nn = if entering {
        indices.outside / indices.inside
    } else {
        indices.inside / indices.outside
    };
    let cos_theta = direction.dot(nl);
    let cos2_phi = 1.0 - nn * nn * (1.0 - cos_theta * cos_theta);

    // Total internal reflection.
    if cos2_phi < 0.0 {
        return Bounce { direction: reflected, weight: 1.0 };
    }

    let transmitted = (nn * direction - nl * (nn * cos_theta + cos2_phi.sqrt())).normalize();
    let cosine = if entering { -cos_theta } else { transmitted.dot(normal) };

    let re = schlick_reflectance(indices.outside, indices.inside, cosine);
    let p_re = 0.25 + 0.5 * re;

    if rng.next_f32() < p_re {
        Bounce { direction: reflected, weight: re / p_re }
    } else {
        Bounce { direction: transmitted, weight: (1.0 - re) / (1.0 - p_re) }
    }
}

/// Cosine-weighted direction in the hemisphere facing the incoming ray.
fn sample_diffuse(incoming: Vec3A, normal: Vec3A, rng: &mut XorShiftRng) -> Vec3A {
    let w = if normal.dot(incoming) < 0.0 { normal } else { -normal };
    let helper = if w.x.abs() > 0.1 { Vec3A::Y } else { Vec3A::X };
    let u = helper.cross(w).normalize();
    let v = w.cross(u);

    let u1 = rng.next_f32();
    let u2 = rng.next_f32();
    let local = random::cosine_weighted_hemisphere(u1, u2);
    (local.x * u + local.y * v + local.z * w).normalize()
}

//! Static scene description and nearest-hit search.
//!
//! A [`Scene`] is built once, validated, and then only read: the
//! integrator borrows it immutably from every pixel task. Intersection is
//! a linear scan over all primitives.

use glam::Vec3A;
use crate::error::SceneError;
use crate::hittable::HitInfo;
use crate::material::{Color, Material, RefractiveIndices};
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Immutable collection of primitives plus the media on either side of
/// refractive surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
    triangles: Vec<Triangle>,
    indices: RefractiveIndices,
}

impl Scene {
    /// Validate and build a scene.
    pub fn new(
        spheres: Vec<Sphere>,
        triangles: Vec<Triangle>,
        indices: RefractiveIndices,
    ) -> Result<Self, SceneError> {
        for (index, sphere) in spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius { index, radius: sphere.radius });
            }
            check_material("sphere", index, &sphere.material)?;
        }

        for (index, triangle) in triangles.iter().enumerate() {
            if triangle.normal == Vec3A::ZERO {
                return Err(SceneError::DegenerateTriangle { index });
            }
            check_material("triangle", index, &triangle.material)?;
        }

        let valid_index = |n: f32| n.is_finite() && n > 0.0;
        if !valid_index(indices.outside) || !valid_index(indices.inside) {
            return Err(SceneError::InvalidRefractiveIndices {
                outside: indices.outside,
                inside: indices.inside,
            });
        }

        Ok(Self { spheres, triangles, indices })
    }

    /// Scene without any primitives. Every ray escapes.
    pub fn empty() -> Self {
        Self {
            spheres: Vec::new(),
            triangles: Vec::new(),
            indices: RefractiveIndices::default(),
        }
    }

    /// All spheres, in scan order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// All triangles, in scan order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Refractive indices used by every refractive surface.
    pub fn indices(&self) -> RefractiveIndices {
        self.indices
    }

    /// Scan the spheres, narrowing `ray.t.max` at each accepted hit.
    ///
    /// Every accepted hit strictly shrinks the range, so the last id
    /// recorded is the nearest sphere.
    pub fn intersect_spheres(&self, ray: &mut Ray) -> Option<usize> {
        let mut id = None;
        for (i, sphere) in self.spheres.iter().enumerate() {
            if sphere.intersect(ray) {
                id = Some(i);
            }
        }
        id
    }

    /// Nearest hit across spheres and triangles, or `None` if the ray
    /// escapes. On a hit `ray.t.max` equals the hit distance.
    ///
    /// Spheres are scanned first; a triangle replaces the sphere hit only
    /// when strictly closer.
    pub fn intersect(&self, ray: &mut Ray) -> Option<HitInfo> {
        let mut nearest = self
            .intersect_spheres(ray)
            .map(|i| self.spheres[i].hit_info(ray, i));
        let mut closest_so_far = ray.t.max;

        for (i, triangle) in self.triangles.iter().enumerate() {
            if let Ok(hit) = triangle.find_hit(ray, i) {
                if hit.distance < closest_so_far {
                    closest_so_far = hit.distance;
                    nearest = Some(hit);
                }
            }
        }

        ray.t.max = closest_so_far;
        nearest
    }

    /// Nine-sphere Cornell box: red and blue side walls, white back wall,
    /// floor and ceiling, a mirror ball, a glass ball and a large
    /// emissive sphere poking through the ceiling.
    pub fn cornell_box() -> Self {
        Self {
            spheres: cornell_spheres(),
            triangles: Vec::new(),
            indices: RefractiveIndices::default(),
        }
    }

    /// Cornell box with a two-triangle mirror panel on the back wall.
    pub fn cornell_box_with_panel() -> Self {
        let a = Vec3A::new(30.0, 20.0, 1.0);
        let b = Vec3A::new(70.0, 20.0, 1.0);
        let c = Vec3A::new(70.0, 60.0, 1.0);
        let d = Vec3A::new(30.0, 60.0, 1.0);
        Self {
            spheres: cornell_spheres(),
            triangles: vec![Triangle::mesh(a, b, c), Triangle::mesh(a, c, d)],
            indices: RefractiveIndices::default(),
        }
    }

    /// A huge diffuse floor sphere below the camera and one emissive,
    /// black sphere hanging above it. Everything else is empty sky.
    pub fn lit_floor() -> Self {
        Self {
            spheres: vec![
                Sphere::new(1e4, Vec3A::new(50.0, -1e4, 81.6), Material::diffuse(Color::splat(0.75))),
                Sphere::new(30.0, Vec3A::new(50.0, 100.0, 81.6), Material::light(Color::splat(12.0), Color::ZERO)),
            ],
            triangles: Vec::new(),
            indices: RefractiveIndices::default(),
        }
    }
}

fn cornell_spheres() -> Vec<Sphere> {
    vec![
        Sphere::new(1e4, Vec3A::new(1e4 + 1.0, 40.8, 81.6), Material::diffuse(Color::new(0.75, 0.25, 0.25))),
        Sphere::new(1e4, Vec3A::new(-1e4 + 99.0, 40.8, 81.6), Material::diffuse(Color::new(0.25, 0.25, 0.75))),
        Sphere::new(1e4, Vec3A::new(50.0, 40.8, 1e4), Material::diffuse(Color::splat(0.75))),
        Sphere::new(1e4, Vec3A::new(50.0, 40.8, -1e4 + 170.0), Material::diffuse(Color::ZERO)),
        Sphere::new(1e4, Vec3A::new(50.0, 1e4, 81.6), Material::diffuse(Color::splat(0.75))),
        Sphere::new(1e4, Vec3A::new(50.0, -1e4 + 81.6, 81.6), Material::diffuse(Color::splat(0.75))),
        Sphere::new(16.5, Vec3A::new(27.0, 16.5, 47.0), Material::specular(Color::splat(0.999))),
        Sphere::new(16.5, Vec3A::new(73.0, 16.5, 78.0), Material::refractive(Color::splat(0.999))),
        Sphere::new(600.0, Vec3A::new(50.0, 681.33, 81.6), Material::light(Color::splat(12.0), Color::ZERO)),
    ]
}

fn check_material(primitive: &'static str, index: usize, material: &Material) -> Result<(), SceneError> {
    for (field, value) in [("color", material.color), ("emission", material.emission)] {
        if !value.is_finite() || value.min_element() < 0.0 {
            return Err(SceneError::InvalidMaterial {
                primitive,
                index,
                field,
                value: value.to_array(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::PrimitiveId;
    use crate::material::Reflection;

    fn grey() -> Material {
        Material::diffuse(Color::splat(0.5))
    }

    #[test]
    fn presets_pass_validation() {
        for scene in [Scene::cornell_box(), Scene::cornell_box_with_panel(), Scene::lit_floor()] {
            let rebuilt = Scene::new(scene.spheres().to_vec(), scene.triangles().to_vec(), scene.indices());
            assert_eq!(rebuilt, Ok(scene));
        }
    }

    #[test]
    fn rejects_bad_radius() {
        let err = Scene::new(vec![Sphere::new(-1.0, Vec3A::ZERO, grey())], vec![], RefractiveIndices::default());
        assert_eq!(err, Err(SceneError::InvalidRadius { index: 0, radius: -1.0 }));
    }

    #[test]
    fn rejects_negative_color() {
        let material = Material::diffuse(Color::new(0.5, -0.1, 0.5));
        let err = Scene::new(vec![Sphere::new(1.0, Vec3A::ZERO, material)], vec![], RefractiveIndices::default());
        assert!(matches!(err, Err(SceneError::InvalidMaterial { field: "color", .. })));
    }

    #[test]
    fn rejects_non_finite_radius() {
        for radius in [f32::INFINITY, 0.0] {
            let err = Scene::new(vec![Sphere::new(radius, Vec3A::ZERO, grey())], vec![], RefractiveIndices::default());
            assert_eq!(err, Err(SceneError::InvalidRadius { index: 0, radius }));
        }
        let err = Scene::new(vec![Sphere::new(f32::NAN, Vec3A::ZERO, grey())], vec![], RefractiveIndices::default());
        assert!(matches!(err, Err(SceneError::InvalidRadius { index: 0, radius }) if radius.is_nan()));
    }

    #[test]
    fn rejects_bad_emission() {
        for emission in [Color::new(1.0, -2.0, 1.0), Color::new(f32::INFINITY, 1.0, 1.0)] {
            let light = Material::light(emission, Color::ZERO);
            let ok = Sphere::new(1.0, Vec3A::ZERO, grey());
            let err = Scene::new(vec![ok, Sphere::new(1.0, Vec3A::X, light)], vec![], RefractiveIndices::default());
            assert!(matches!(
                err,
                Err(SceneError::InvalidMaterial { primitive: "sphere", index: 1, field: "emission", .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_refractive_indices() {
        for (outside, inside) in [(0.0, 1.5), (1.0, -1.5), (f32::INFINITY, 1.5)] {
            let indices = RefractiveIndices { outside, inside };
            let err = Scene::new(vec![Sphere::new(1.0, Vec3A::ZERO, grey())], vec![], indices);
            assert_eq!(err, Err(SceneError::InvalidRefractiveIndices { outside, inside }));
        }
        let err = Scene::new(vec![], vec![], RefractiveIndices { outside: 1.0, inside: f32::NAN });
        assert!(matches!(err, Err(SceneError::InvalidRefractiveIndices { .. })));
    }

    #[test]
    fn rejects_degenerate_triangle() {
        let t = Triangle::mesh(Vec3A::ZERO, Vec3A::X, Vec3A::X * 2.0);
        let err = Scene::new(vec![], vec![t], RefractiveIndices::default());
        assert_eq!(err, Err(SceneError::DegenerateTriangle { index: 0 }));
    }

    #[test]
    fn nearest_sphere_wins_regardless_of_order() {
        let far = Sphere::new(1.0, Vec3A::new(0.0, 0.0, -20.0), grey());
        let near = Sphere::new(1.0, Vec3A::new(0.0, 0.0, -10.0), grey());
        let scene = Scene::new(vec![far, near], vec![], RefractiveIndices::default()).unwrap();

        let mut ray = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        assert_eq!(scene.intersect_spheres(&mut ray), Some(1));
        assert!((ray.t.max - 9.0).abs() < 1e-5);
    }

    #[test]
    fn empty_scene_never_hits() {
        let mut ray = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert_eq!(Scene::empty().intersect(&mut ray), None);
        assert_eq!(ray.t.max, f32::INFINITY);
    }

    #[test]
    fn triangle_in_front_of_sphere_wins() {
        let sphere = Sphere::new(1.0, Vec3A::new(0.0, 0.0, -10.0), grey());
        let triangle = Triangle::mesh(
            Vec3A::new(-1.0, -1.0, -5.0),
            Vec3A::new(1.0, -1.0, -5.0),
            Vec3A::new(0.0, 1.0, -5.0),
        );
        let scene = Scene::new(vec![sphere], vec![triangle], RefractiveIndices::default()).unwrap();

        let mut ray = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        let hit = scene.intersect(&mut ray).expect("hit");
        assert_eq!(hit.primitive, PrimitiveId::Triangle(0));
        assert_eq!(hit.material.reflection, Reflection::Specular);
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert_eq!(ray.t.max, hit.distance);
    }

    #[test]
    fn sphere_in_front_of_triangle_wins() {
        let sphere = Sphere::new(1.0, Vec3A::new(0.0, 0.0, -3.0), grey());
        let triangle = Triangle::mesh(
            Vec3A::new(-1.0, -1.0, -5.0),
            Vec3A::new(1.0, -1.0, -5.0),
            Vec3A::new(0.0, 1.0, -5.0),
        );
        let scene = Scene::new(vec![sphere], vec![triangle], RefractiveIndices::default()).unwrap();

        let mut ray = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        let hit = scene.intersect(&mut ray).expect("hit");
        assert_eq!(hit.primitive, PrimitiveId::Sphere(0));
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_wins_exact_tie_with_triangle() {
        // Sphere front surface and triangle plane both at z = -5.
        let sphere = Sphere::new(1.0, Vec3A::new(0.0, 0.0, -6.0), grey());
        let triangle = Triangle::mesh(
            Vec3A::new(-1.0, -1.0, -5.0),
            Vec3A::new(1.0, -1.0, -5.0),
            Vec3A::new(0.0, 1.0, -5.0),
        );
        let scene = Scene::new(vec![sphere], vec![triangle], RefractiveIndices::default()).unwrap();

        let mut alone = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        let tri_hit = triangle.find_hit(&alone, 0).expect("triangle hit");
        assert!(sphere.intersect(&mut alone));
        assert_eq!(tri_hit.distance, alone.t.max);

        let mut ray = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        let hit = scene.intersect(&mut ray).expect("hit");
        assert_eq!(hit.primitive, PrimitiveId::Sphere(0));
        assert_eq!(hit.distance, 5.0);
        assert_eq!(ray.t.max, 5.0);
    }

    #[test]
    fn camera_looks_into_cornell_box() {
        // Straight down the middle of the box the back wall is hit.
        let scene = Scene::cornell_box();
        let mut ray = Ray::new(Vec3A::new(50.0, 40.8, 160.0), -Vec3A::Z);
        let hit = scene.intersect(&mut ray).expect("back wall");
        assert_eq!(hit.primitive, PrimitiveId::Sphere(2));
        assert!(hit.position.z.abs() < 0.1);
    }
}

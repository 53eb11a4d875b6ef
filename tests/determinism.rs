use glam::{UVec2, Vec3A};
use lumen::accumulator::{invoke, Invocation};
use lumen::camera::Camera;
use lumen::integrator::{PathIntegrator, Termination};
use lumen::random::XorShiftRng;
use lumen::renderer::{ProgressiveRenderer, RenderSettings};
use lumen::scene::Scene;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn same_pixel_and_time_replay_the_same_path() {
    let scene = Scene::cornell_box();
    let camera = Camera::new(UVec2::new(40, 30));
    let integrator = PathIntegrator::default();
    let mut inputs = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..64 {
        let pixel = UVec2::new(inputs.random_range(0..40), inputs.random_range(0..30));
        let time: f32 = inputs.random_range(0.0..1000.0);
        let index = pixel.y * 40 + pixel.x;

        let trace = |time: f32| {
            let mut rng = XorShiftRng::for_pixel(index, time);
            let ray = camera.primary_ray(pixel, &mut rng);
            (integrator.trace(&scene, ray, &mut rng), rng)
        };
        assert_eq!(trace(time), trace(time));
    }
}

#[test]
fn invocation_result_only_depends_on_its_inputs() {
    let scene = Scene::cornell_box();
    let camera = Camera::new(UVec2::new(20, 15));
    let integrator = PathIntegrator::default();
    let invocation = Invocation {
        pixel: UVec2::new(10, 7),
        frame: 3,
        time: 4.0,
        mean: Vec3A::new(0.2, 0.3, 0.4),
    };

    let first = invoke(&scene, &camera, &integrator, &invocation);
    // Unrelated work in between must not disturb the result.
    let _ = invoke(&scene, &camera, &integrator, &Invocation { frame: 0, ..invocation });
    assert_eq!(invoke(&scene, &camera, &integrator, &invocation), first);
}

#[test]
fn paths_in_a_closed_box_end_by_roulette() {
    let scene = Scene::cornell_box();
    let camera = Camera::new(UVec2::new(20, 15));
    let integrator = PathIntegrator::default();

    let mut absorbed = 0;
    for index in 0..300u32 {
        let mut rng = XorShiftRng::for_pixel(index, 1.0);
        let pixel = UVec2::new(index % 20, (index / 20) % 15);
        let sample = integrator.trace(&scene, camera.primary_ray(pixel, &mut rng), &mut rng);
        assert_ne!(sample.termination, Termination::BounceLimit);
        if sample.termination == Termination::Absorbed {
            absorbed += 1;
        }
    }
    assert!(absorbed > 0);
}

#[test]
fn renderer_matches_hand_driven_invocations() {
    let settings = RenderSettings { width: 6, height: 4, frames: 2, ..RenderSettings::default() };
    let mut renderer = ProgressiveRenderer::new(Scene::cornell_box(), &settings);
    renderer.render(settings.frames, |_, _| {});

    let scene = Scene::cornell_box();
    let camera = Camera::new(UVec2::new(6, 4));
    let integrator = PathIntegrator::default();
    for (x, y, pixel) in renderer.film().enumerate_pixels() {
        let mut mean = Vec3A::ZERO;
        for frame in 0..settings.frames {
            let invocation = Invocation {
                pixel: UVec2::new(x, y),
                frame,
                time: renderer.frame_time(frame),
                mean,
            };
            mean = Vec3A::from(invoke(&scene, &camera, &integrator, &invocation).truncate());
        }
        assert_eq!([pixel[0], pixel[1], pixel[2], pixel[3]], [mean.x, mean.y, mean.z, 1.0]);
    }
}

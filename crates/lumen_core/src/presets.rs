//! Built-in scenes.
//!
//! Handy for smoke tests and for rendering without writing a scene file.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::{CameraOptions, ImageSettings, MaterialDesc, SceneDescription};

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: &[&str] = &["two_spheres", "materials", "random_spheres"];

/// Look up a preset scene by name.
pub fn by_name(name: &str) -> Option<SceneDescription> {
    match name {
        "two_spheres" => Some(two_spheres()),
        "materials" => Some(materials()),
        "random_spheres" => Some(random_spheres(0)),
        _ => None,
    }
}

/// A diffuse sphere resting on a huge diffuse globe, seen through a pinhole.
pub fn two_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new();
    scene
        .add_material("diffuse", MaterialDesc::Lambertian { albedo: Vec3::splat(0.5) })
        .add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "diffuse")
        .add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "diffuse");
    scene
}

/// One sphere of each material on a yellow ground, with depth of field.
///
/// The glass sphere carries a smaller negative-radius sphere inside it,
/// which turns it into a hollow bubble.
pub fn materials() -> SceneDescription {
    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);

    let mut scene = SceneDescription::new();
    scene.camera = CameraOptions::default()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 2.0, (look_from - look_at).length());

    scene
        .add_material("ground", MaterialDesc::Lambertian { albedo: Vec3::new(0.8, 0.8, 0.0) })
        .add_material("center", MaterialDesc::Lambertian { albedo: Vec3::new(0.1, 0.2, 0.5) })
        .add_material("glass", MaterialDesc::Dielectric { ior: 1.5 })
        .add_material(
            "gold",
            MaterialDesc::Metal {
                albedo: Vec3::new(0.8, 0.6, 0.2),
                fuzz: 0.0,
            },
        )
        .add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground")
        .add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "center")
        .add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "glass")
        .add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, "glass")
        .add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "gold");
    scene
}

/// The classic cover scene: a field of small random spheres around three
/// large ones. Deterministic for a given `seed`.
pub fn random_spheres(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = SceneDescription::new();

    scene.image = ImageSettings {
        width: 600,
        samples_per_pixel: 50,
        ..Default::default()
    };
    scene.camera = CameraOptions::default()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    scene
        .add_material("ground", MaterialDesc::Lambertian { albedo: Vec3::splat(0.5) })
        .add_material("glass", MaterialDesc::Dielectric { ior: 1.5 })
        .add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    let clearing = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - clearing).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            if choose_mat < 0.95 {
                let name = format!("sphere_{}_{}", a, b);
                let material = if choose_mat < 0.8 {
                    let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                    MaterialDesc::Lambertian { albedo }
                } else {
                    MaterialDesc::Metal {
                        albedo: random_color(&mut rng, 0.5, 1.0),
                        fuzz: rng.gen_range(0.0..0.5),
                    }
                };
                scene.add_material(name.clone(), material).add_sphere(center, 0.2, name);
            } else {
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene
        .add_material("brown", MaterialDesc::Lambertian { albedo: Vec3::new(0.4, 0.2, 0.1) })
        .add_material(
            "steel",
            MaterialDesc::Metal {
                albedo: Vec3::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        )
        .add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass")
        .add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown")
        .add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "steel");

    scene
}

fn random_color(rng: &mut StdRng, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

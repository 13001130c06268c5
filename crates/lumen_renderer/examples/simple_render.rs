//! Simple path tracer example.
//!
//! Builds the materials showcase by hand (glass bubble, diffuse center,
//! gold mirror on a yellow ground), renders it on one thread and saves PPM.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use lumen_renderer::{
    render, write_ppm, Camera, CameraOptions, Color, Dielectric, HittableList, Lambertian,
    Material, Metal, RenderConfig, ShadingMode, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?} ({} objects)", start.elapsed(), world.len());

    let options = CameraOptions::default()
        .with_position(
            Vec3::new(-2.0, 2.0, 1.0), // look_from
            Vec3::new(0.0, 0.0, -1.0), // look_at
            Vec3::new(0.0, 1.0, 0.0),  // up
        )
        .with_lens(20.0, 0.0, 1.0);
    let camera = Camera::new(&options);

    let config = RenderConfig {
        width: 400,
        height: 225,
        samples_per_pixel: 50,
        max_depth: 10,
        seed: Some(42),
        shading: ShadingMode::Path,
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(42);
    let image = render(&camera, &world, &config, &mut rng).expect("Render failed");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let file = File::create(filename).expect("Failed to create output file");
    write_ppm(&image, BufWriter::new(file)).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center)));

    // Same glass material for the outer shell and the hollow core
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone())));
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.4, glass)));

    world.add(Box::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)));
    world
}

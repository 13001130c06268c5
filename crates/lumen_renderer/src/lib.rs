//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer: spheres, three scattering materials, a sky
//! gradient as the only light, a thin-lens camera and multi-sample
//! anti-aliasing. Tiles render in parallel with rayon.

mod bucket;
mod camera;
mod color;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sampling;
mod sphere;
mod world;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use color::{lerp, to_rgb8, Color};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use ppm::write_ppm;
pub use renderer::{
    normal_color, ray_color, render, render_pixel, sky_color, ImageBuffer, RenderConfig,
    RenderError, RenderResult, T_MIN,
};
pub use sampling::{
    random_f64, random_in_unit_disk, random_in_unit_sphere, random_range, random_unit_vector,
};
pub use sphere::Sphere;
pub use world::{build_material, build_world};

/// Re-export math and scene types used in this crate's API
pub use lumen_core::{CameraOptions, ShadingMode};
pub use lumen_math::{Interval, Ray, Vec3};

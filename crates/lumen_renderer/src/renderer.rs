//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Sky gradient as the only light source
//! - Anti-aliasing via multi-sampling

use crate::color::{lerp, to_rgb8};
use crate::sampling::random_f64;
use crate::{Camera, Color, Hittable};
use lumen_core::{ImageSettings, SceneError, ShadingMode, MAX_IMAGE_DIMENSION};
use lumen_math::{Interval, Ray};
use rand::RngCore;
use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render cancelled")]
    Cancelled,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Lower hit bound for every traced ray, so a scattered ray does not
/// re-hit the surface it starts on.
pub const T_MIN: f64 = 0.001;

const SKY_ZENITH: Color = Color::new(0.5, 0.7, 1.0);
const SKY_HORIZON: Color = Color::ONE;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the random stream; `None` draws one from entropy
    pub seed: Option<u64>,
    pub shading: ShadingMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&ImageSettings::default())
    }
}

impl From<&ImageSettings> for RenderConfig {
    fn from(settings: &ImageSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height(),
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            seed: settings.seed,
            shading: settings.shading,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that would produce an empty or unsampled image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_IMAGE_DIMENSION || self.height > MAX_IMAGE_DIMENSION {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} exceeds the {} pixel limit",
                self.width, self.height, MAX_IMAGE_DIMENSION
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The configured seed, or a fresh one from the thread RNG.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces until it
/// escapes to the sky, is absorbed, or runs out of depth. Each bounce
/// multiplies in the material's attenuation.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Debug shading: the nearest surface normal mapped from [-1, 1] to [0, 1].
pub fn normal_color(ray: &Ray, world: &dyn Hittable) -> Color {
    match world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) {
        Some(rec) => 0.5 * (rec.normal + Color::ONE),
        None => sky_color(ray),
    }
}

/// Vertical sky gradient: white at the horizon (y = -1), blue at the zenith (y = 1).
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    lerp(SKY_HORIZON, SKY_ZENITH, t)
}

/// Sum of `samples_per_pixel` jittered samples for pixel `(x, y)`.
///
/// `y = 0` is the top row. The sum is not averaged; [`to_rgb8`] does that.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    // Viewport t runs bottom to top
    let row = (config.height - 1 - y) as f64;
    let s_scale = (config.width.max(2) - 1) as f64;
    let t_scale = (config.height.max(2) - 1) as f64;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + random_f64(rng)) / s_scale;
        let t = (row + random_f64(rng)) / t_scale;
        let ray = camera.cast_ray(s, t, rng);

        pixel_color += match config.shading {
            ShadingMode::Path => ray_color(&ray, world, config.max_depth, rng),
            ShadingMode::Normals => normal_color(&ray, world),
        };
    }

    pixel_color
}

/// Image buffer holding per-pixel sample sums, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Number of samples summed into each pixel
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel sum at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Averaged 8-bit color of pixel (x, y).
    pub fn rgb8(&self, x: u32, y: u32) -> [u8; 3] {
        to_rgb8(self.get(x, y), self.samples_per_pixel)
    }

    /// Convert to packed RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&to_rgb8(*color, self.samples_per_pixel));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer on the calling thread.
///
/// Deterministic for a given generator state; see
/// [`render_buckets`](crate::render_buckets) for the parallel path.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    let mut image = ImageBuffer::new(config.width, config.height, config.samples_per_pixel);

    for y in 0..config.height {
        for x in 0..config.width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
        log::trace!("Row {} of {} done", y + 1, config.height);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Metal, Sphere};
    use lumen_core::CameraOptions;
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn diffuse_sphere_scene(albedo: f64) -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::splat(albedo))),
        )));
        world
    }

    fn small_config() -> RenderConfig {
        RenderConfig {
            width: 16,
            height: 9,
            samples_per_pixel: 4,
            max_depth: 8,
            seed: Some(1),
            shading: ShadingMode::Path,
        }
    }

    #[test]
    fn test_sky_gradient_extremes_exact() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);

        let up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray_color(&up, &world, 50, &mut rng), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(ray_color(&down, &world, 50, &mut rng), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sky_ignores_direction_length() {
        let a = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)));
        let b = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(5.0, 5.0, 0.0)));
        assert!((a - b).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        // Inside a metal sphere fuzzed with 1.0 every path is eventually absorbed
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::ZERO,
            10.0,
            Arc::new(Metal::new(Color::ONE, 1.0)),
        )));
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &world, 50, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_single_bounce_attenuates_sky() {
        let world = diffuse_sphere_scene(0.5);
        let mut rng = StdRng::seed_from_u64(4);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Depth 1 lets the hit happen but the bounce returns black
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);

        let color = ray_color(&ray, &world, 2, &mut rng);
        // One bounce off a 0.5 albedo surface sees at most half the sky
        assert!(color.max_element() <= 0.5 + 1e-12);
        assert!(color.min_element() >= 0.25 - 1e-12);
    }

    #[test]
    fn test_viewport_center_ray_hits_near_side() {
        // Fixed viewport of height 2 at focal length 1, eye at the origin
        let world = diffuse_sphere_scene(0.5);
        let horizontal = Vec3::new(4.0, 0.0, 0.0);
        let vertical = Vec3::new(0.0, 2.0, 0.0);
        let lower_left = -horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, 1.0);

        let direction = lower_left + 0.5 * horizontal + 0.5 * vertical;
        let ray = Ray::new(Vec3::ZERO, direction);
        let rec = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normal_shading() {
        let world = diffuse_sphere_scene(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(normal_color(&ray, &world), Color::new(0.5, 0.5, 1.0));

        let miss = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(normal_color(&miss, &world), Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let world = diffuse_sphere_scene(0.5);
        let camera = Camera::new(&CameraOptions::default().with_aspect_ratio(16.0 / 9.0));
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel sees the sphere, which is darker than the sky
        let center = render_pixel(&camera, &world, 8, 4, &config, &mut rng);
        let corner = render_pixel(&camera, &world, 0, 0, &config, &mut rng);
        assert!(center.length() > 0.0);
        assert!(center.z < corner.z);
    }

    #[test]
    fn test_top_row_looks_up() {
        let world = HittableList::new();
        let camera = Camera::default();
        let config = RenderConfig {
            shading: ShadingMode::Normals,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(2);

        let top = render_pixel(&camera, &world, 8, 0, &config, &mut rng);
        let bottom = render_pixel(&camera, &world, 8, config.height - 1, &config, &mut rng);
        // Bluer (less red) towards the zenith
        assert!(top.x < bottom.x);
    }

    #[test]
    fn test_render_is_reproducible() {
        let world = diffuse_sphere_scene(0.5);
        let camera = Camera::default();
        let config = small_config();

        let a = render(&camera, &world, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = render(&camera, &world, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8().len(), 16 * 9 * 3);

        let c = render(&camera, &world, &config, &mut StdRng::seed_from_u64(10)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_render_rejects_empty_image() {
        let world = HittableList::new();
        let camera = Camera::default();
        let config = RenderConfig {
            width: 0,
            ..small_config()
        };
        let result = render(&camera, &world, &config, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_render_rejects_oversized_image() {
        let world = HittableList::new();
        let camera = Camera::default();
        let config = RenderConfig {
            width: 400,
            height: u32::MAX,
            ..small_config()
        };
        let result = render(&camera, &world, &config, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_pixel_index_does_not_wrap() {
        // 70000 x 70000 pixels overflows u32; the index must not
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            samples_per_pixel: 1,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(69_999, 69_999), 70_000usize * 70_000 - 1);
        assert_eq!(image.index(5, 1), 70_005);
    }

    #[test]
    fn test_single_pixel_image() {
        let world = HittableList::new();
        let camera = Camera::default();
        let config = RenderConfig {
            width: 1,
            height: 1,
            ..small_config()
        };
        let image = render(&camera, &world, &config, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(image.get(0, 0).is_finite());
    }

    #[test]
    fn test_diffuse_mean_converges() {
        // Mean radiance of a diffuse sphere under the sky settles to the
        // same value for independent streams
        let world = diffuse_sphere_scene(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let samples = 20_000;

        let mean = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sum = Color::ZERO;
            for _ in 0..samples {
                sum += ray_color(&ray, &world, 50, &mut rng);
            }
            sum / samples as f64
        };

        let a = mean(100);
        let b = mean(200);
        for (x, y) in [(a.x, b.x), (a.y, b.y), (a.z, b.z)] {
            assert!((x - y).abs() / y < 0.01, "{:?} vs {:?}", a, b);
        }
    }
}

//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that render independently and
//! in parallel using rayon. Each bucket owns a generator seeded from the
//! render seed and the bucket's position, so the image depends only on
//! the seed and never on thread count or scheduling.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig, RenderError, RenderResult};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's generator, derived from its position.
    fn seed(&self, render_seed: u64) -> u64 {
        let position = ((self.y as u64) << 32) | self.x as u64;
        render_seed ^ position.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets are rendered from the center outward so the most important
/// part of the frame finishes first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (spiral order).
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket to a vector of pixel sums.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel sums in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into the full image.
    fn blit(&self, image: &mut ImageBuffer) {
        let b = &self.bucket;
        for (i, color) in self.pixels.iter().enumerate() {
            let i = i as u32;
            image.set(b.x + i % b.width, b.y + i / b.width, *color);
        }
    }
}

/// Render the whole image in parallel buckets on the current rayon pool.
///
/// `on_bucket` runs on worker threads once per finished bucket, in no
/// particular order. Setting `cancel` stops scheduling new buckets and
/// makes the call return [`RenderError::Cancelled`].
pub fn render_buckets<F>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    bucket_size: u32,
    cancel: &AtomicBool,
    on_bucket: F,
) -> RenderResult<ImageBuffer>
where
    F: Fn(&BucketResult) + Sync,
{
    config.validate()?;
    let seed = config.resolve_seed();
    let buckets = generate_buckets(config.width, config.height, bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, seed {}, {} buckets on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        seed,
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<Option<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            let mut rng = StdRng::seed_from_u64(bucket.seed(seed));
            let pixels = render_bucket(bucket, camera, world, config, &mut rng);
            let result = BucketResult::new(*bucket, pixels);
            log::debug!("Bucket {} at ({}, {}) done", bucket.index, bucket.x, bucket.y);
            on_bucket(&result);
            Some(result)
        })
        .collect();

    if cancel.load(Ordering::Relaxed) {
        log::warn!("Render cancelled");
        return Err(RenderError::Cancelled);
    }

    let mut image = ImageBuffer::new(config.width, config.height, config.samples_per_pixel);
    for result in results.into_iter().flatten() {
        result.blit(&mut image);
    }

    Ok(image)
}

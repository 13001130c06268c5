use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{resolve_scene, SceneDescription};
use lumen_renderer::{
    build_world, render_buckets, write_ppm, BucketResult, Camera, ImageBuffer, RenderConfig,
    DEFAULT_BUCKET_SIZE,
};

mod args;

use args::Args;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let start = Instant::now();
    let mut scene = resolve_scene(&args.scene)
        .with_context(|| format!("Failed to load scene '{}'", args.scene))?;
    apply_overrides(&mut scene, &args);
    scene.validate().context("Invalid scene after overrides")?;

    let world = build_world(&scene)?;
    let camera = Camera::new(&scene.camera);
    let config = RenderConfig::from(&scene.image);
    log::info!("Scene ready in {:?}", start.elapsed());

    let total_pixels = config.width as usize * config.height as usize;
    let done = AtomicUsize::new(0);
    let cancel = AtomicBool::new(false);
    let report_progress = |result: &BucketResult| {
        let before = done.fetch_add(result.pixels.len(), Ordering::Relaxed);
        let after = before + result.pixels.len();
        // One line per 10% step
        if before * 10 / total_pixels != after * 10 / total_pixels {
            log::info!("{:>3}% rendered", after * 100 / total_pixels);
        }
    };

    let start = Instant::now();
    let bucket_size = args.bucket_size.unwrap_or(DEFAULT_BUCKET_SIZE);
    let image = render_buckets(&camera, &world, &config, bucket_size, &cancel, report_progress)?;
    log::info!("Rendered in {:?}", start.elapsed());

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

/// Command line settings win over the scene file.
fn apply_overrides(scene: &mut SceneDescription, args: &Args) {
    if let Some(seed) = args.seed {
        scene.image.seed = Some(seed);
    }
    if let Some(spp) = args.samples_per_pixel {
        scene.image.samples_per_pixel = spp;
    }
    if let Some(width) = args.width {
        scene.image.width = width;
    }
}

/// Save as PNG when the extension says so, otherwise as plain PPM.
fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .context("Pixel buffer does not match image size")?;
        buffer.save(path)?;
    } else {
        let file = File::create(path)?;
        write_ppm(image, BufWriter::new(file))?;
    }

    Ok(())
}

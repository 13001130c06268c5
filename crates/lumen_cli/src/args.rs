//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Render a scene file or a built-in preset with the Lumen path tracer
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "lumen", version)]
#[command(after_help = "Presets: two_spheres, materials, random_spheres")]
pub struct Args {
    /// Scene JSON file or preset name
    pub scene: String,

    /// Output image (.png, anything else is written as PPM)
    #[arg(default_value = "output.ppm")]
    pub output: PathBuf,

    /// Worker threads (default: all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Override the scene's random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override samples per pixel
    #[arg(long = "spp")]
    pub samples_per_pixel: Option<u32>,

    /// Override image width
    #[arg(long)]
    pub width: Option<u32>,

    /// Bucket size in pixels (default: 32)
    #[arg(long = "bucket")]
    pub bucket_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("lumen").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["two_spheres"]).unwrap();
        assert_eq!(args.scene, "two_spheres");
        assert_eq!(args.output, PathBuf::from("output.ppm"));
        assert_eq!(args.threads, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.bucket_size, None);
    }

    #[test]
    fn test_options_anywhere() {
        let args = parse(&[
            "--seed", "7", "scene.json", "out.png", "--threads", "4", "--spp", "16", "--width",
            "320", "--bucket", "8",
        ])
        .unwrap();
        assert_eq!(args.scene, "scene.json");
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.samples_per_pixel, Some(16));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.bucket_size, Some(8));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
        assert!(parse(&["a", "--seed"]).is_err());
        assert!(parse(&["a", "--seed", "x"]).is_err());
        assert!(parse(&["a", "--fast"]).is_err());
        assert!(parse(&["a", "--width", "-3"]).is_err());
    }
}

//! Color helpers: interpolation and 8-bit quantization.

use lumen_math::{Interval, Vec3};

/// Linear RGB color (x = R, y = G, z = B).
pub type Color = Vec3;

/// Channels are clamped into this range before quantization so that
/// `256 * c` never reaches 256.
const INTENSITY: Interval = Interval::new(0.0, 0.9999);

/// Linear interpolation: `start` at `t = 0`, `end` at `t = 1`.
///
/// Written as `(1 - t) a + t b` so both endpoints are reproduced exactly.
#[inline]
pub fn lerp(start: Color, end: Color, t: f64) -> Color {
    (1.0 - t) * start + t * end
}

/// Average a sum of `samples` colors and quantize each channel to 8 bits.
///
/// No gamma correction is applied: channels are `floor(256 * clamp(c / n))`.
pub fn to_rgb8(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f64;
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(c * scale)) as u8;
    [quantize(sum.x), quantize(sum.y), quantize(sum.z)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        let white = Color::ONE;
        let blue = Color::new(0.5, 0.7, 1.0);
        assert_eq!(lerp(white, blue, 0.0), white);
        assert_eq!(lerp(white, blue, 1.0), blue);
        assert!((lerp(white, blue, 0.5) - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_to_rgb8_single_sample() {
        assert_eq!(to_rgb8(Color::ZERO, 1), [0, 0, 0]);
        assert_eq!(to_rgb8(Color::ONE, 1), [255, 255, 255]);
        assert_eq!(to_rgb8(Color::new(0.5, 0.25, 0.0), 1), [128, 64, 0]);
    }

    #[test]
    fn test_to_rgb8_averages_samples() {
        // Four samples summing to 2.0 average to 0.5
        assert_eq!(to_rgb8(Color::splat(2.0), 4), [128, 128, 128]);
    }

    #[test]
    fn test_to_rgb8_clamps_out_of_range() {
        assert_eq!(to_rgb8(Color::new(-3.0, 7.0, 1.0), 1), [0, 255, 255]);
        assert_eq!(to_rgb8(Color::new(0.9999, 0.99995, 1e9), 1), [255, 255, 255]);
    }
}

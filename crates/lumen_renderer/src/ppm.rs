//! Plain-text PPM (P3) output.

use std::io::{self, Write};

use crate::ImageBuffer;

/// Write `image` as a P3 PPM: header, then one `R G B` line per pixel,
/// row-major with the top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.rgb8(x, y);
            writeln!(out, "{} {} {}", r, g, b)?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2, 2);
        image.set(0, 0, Color::new(2.0, 0.0, 0.0));
        image.set(1, 0, Color::new(0.0, 1.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.0, 0.5));
        image.set(1, 1, Color::splat(4.0));

        let mut bytes = Vec::new();
        write_ppm(&image, &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 0 0\n0 128 0\n0 0 64\n255 255 255\n"
        );
    }
}

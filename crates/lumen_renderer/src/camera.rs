//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use lumen_core::CameraOptions;
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Thin-lens camera mapping viewport coordinates to world-space rays.
///
/// Immutable once built; every value is derived from [`CameraOptions`].
#[derive(Debug, Clone)]
pub struct Camera {
    // Lens plane basis: u right, v up
    u: Vec3,
    v: Vec3,

    // Viewport on the focus plane
    origin: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Vec3,

    lens_radius: f64,
}

impl Camera {
    /// Build a camera from placement and lens options.
    pub fn new(options: &CameraOptions) -> Self {
        // Calculate camera basis vectors
        let w = (options.look_from - options.look_at).normalize();
        let u = options.up.cross(w).normalize();
        let v = w.cross(u);

        // Calculate viewport dimensions
        let theta = options.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = options.aspect_ratio * viewport_height;

        let origin = options.look_from;
        let horizontal = u * viewport_width * options.focus_dist;
        let vertical = v * viewport_height * options.focus_dist;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - w * options.focus_dist;

        Self {
            u,
            v,
            origin,
            horizontal,
            vertical,
            lower_left_corner,
            lens_radius: options.aperture / 2.0,
        }
    }

    /// Ray through viewport point `(s, t)`, with `(0, 0)` the lower-left
    /// corner and `(1, 1)` the upper-right. Values outside [0, 1]
    /// extrapolate the viewport plane.
    ///
    /// The origin is jittered across the lens disk; the returned
    /// direction is unit length.
    pub fn cast_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let ray_origin = self.origin + offset;
        let ray_direction =
            (self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin)
                .normalize();

        Ray::new(ray_origin, ray_direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::default();

        assert_eq!(camera.origin, Vec3::ZERO);
        assert!(approx_eq(camera.u.cross(camera.v), Vec3::Z));
        assert!(approx_eq(camera.u, Vec3::X));
        assert!(approx_eq(camera.v, Vec3::Y));
        assert_eq!(camera.lens_radius, 0.0);
    }

    #[test]
    fn test_viewport_matches_fov() {
        // vfov 90 at focus 1 gives a viewport of height 2
        let options = CameraOptions::default().with_aspect_ratio(2.0);
        let camera = Camera::new(&options);

        assert!(approx_eq(camera.vertical, Vec3::new(0.0, 2.0, 0.0)));
        assert!(approx_eq(camera.horizontal, Vec3::new(4.0, 0.0, 0.0)));
        assert!(approx_eq(camera.lower_left_corner, Vec3::new(-2.0, -1.0, -1.0)));
    }

    #[test]
    fn test_pinhole_center_ray() {
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.cast_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!(approx_eq(ray.direction(), Vec3::NEG_Z));
    }

    #[test]
    fn test_corner_rays_unit_length() {
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(1);

        for (s, t) in [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.5, -0.5)] {
            let ray = camera.cast_ray(s, t, &mut rng);
            assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        }

        let corner = camera.cast_ray(0.0, 0.0, &mut rng).direction();
        assert!(corner.x < 0.0 && corner.y < 0.0 && corner.z < 0.0);
    }

    #[test]
    fn test_look_at_orientation() {
        let options = CameraOptions::default()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.0, 10.0);
        let camera = Camera::new(&options);
        let mut rng = StdRng::seed_from_u64(3);

        let ray = camera.cast_ray(0.5, 0.5, &mut rng);
        let expected = (Vec3::ZERO - Vec3::new(13.0, 2.0, 3.0)).normalize();
        assert!(approx_eq(ray.direction(), expected));

        // Basis is orthonormal
        assert!(camera.u.dot(camera.v).abs() < 1e-12);
        assert!(camera.u.dot(Vec3::new(13.0, 2.0, 3.0)).abs() < 1e-12);
        assert!((camera.v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_thin_lens_converges_on_focus_plane() {
        let focus_dist = 5.0;
        let options = CameraOptions::default().with_lens(40.0, 2.0, focus_dist);
        let camera = Camera::new(&options);
        let mut rng = StdRng::seed_from_u64(8);

        let target = camera.lower_left_corner + 0.3 * camera.horizontal + 0.6 * camera.vertical;
        let mut saw_offset = false;
        for _ in 0..100 {
            let ray = camera.cast_ray(0.3, 0.6, &mut rng);
            let offset = ray.origin() - camera.origin;
            assert!(offset.length() < camera.lens_radius);
            assert!(offset.z.abs() < 1e-12);
            saw_offset |= offset.length() > 1e-6;

            // Every lens sample passes through the same focus-plane point
            let t = (target - ray.origin()).length();
            assert!(approx_eq(ray.at(t), target));
        }
        assert!(saw_offset);
    }
}

//! Optics helpers on top of glam's vector type.

use crate::Vec3;

/// Components below this magnitude count as zero.
const NEAR_ZERO: f64 = 1e-8;

/// Reflection, refraction and degeneracy checks for [`Vec3`].
pub trait VectorExt {
    /// Reflect about a unit normal: `v - 2 (v . n) n`.
    fn reflected(self, normal: Self) -> Self;

    /// Refract through a surface with unit `normal` facing against `self`.
    ///
    /// `ratio` is `eta_incident / eta_transmitted`. The incident vector is
    /// normalized first. Total internal reflection is not detected here;
    /// callers must check `ratio * sin_theta > 1` beforehand.
    fn refracted(self, normal: Self, ratio: f64) -> Self;

    /// True if every component is numerically zero.
    fn is_near_zero(self) -> bool;
}

impl VectorExt for Vec3 {
    #[inline]
    fn reflected(self, normal: Vec3) -> Vec3 {
        self - 2.0 * self.dot(normal) * normal
    }

    #[inline]
    fn refracted(self, normal: Vec3, ratio: f64) -> Vec3 {
        let incident = self.normalize();
        let cos_theta = (-incident).dot(normal).min(1.0);
        let perpendicular = ratio * (incident + cos_theta * normal);
        let parallel = -(1.0 - perpendicular.length_squared()).abs().sqrt() * normal;
        perpendicular + parallel
    }

    #[inline]
    fn is_near_zero(self) -> bool {
        self.abs().max_element() < NEAR_ZERO
    }
}

//! Lumen math types.
//!
//! Double precision throughout: `Vec3` is glam's `DVec3`, used as point,
//! direction and linear RGB color alike.

pub use glam::DVec3 as Vec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::VectorExt;

//! Lumen Core - scene description for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `MaterialDesc`,
//!   `ObjectDesc`, `CameraOptions`, `ImageSettings`
//! - **Scene files**: JSON loading and validation
//! - **Presets**: built-in scenes usable without a file
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scenes/cover.json")?;
//! println!("Loaded {} objects, {} materials",
//!     scene.object_count(),
//!     scene.material_count());
//! ```

pub mod loader;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, resolve_scene};
pub use scene::{
    CameraOptions, ImageSettings, MaterialDesc, ObjectDesc, SceneDescription, SceneError,
    SceneResult, ShadingMode, MAX_IMAGE_DIMENSION,
};

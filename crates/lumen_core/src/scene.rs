//! Scene description types for Lumen.
//!
//! A scene is plain data: image settings, camera options, named materials
//! and an ordered list of objects referencing them by name. The renderer
//! turns it into hittables; nothing here knows how to trace a ray.

use std::collections::BTreeMap;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid image settings: {0}")]
    InvalidImage(String),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// How primary rays are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Full recursive path tracing.
    #[default]
    Path,
    /// Surface normals mapped to RGB, no bounces.
    Normals,
}

/// Largest accepted image width or height, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Output resolution and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Image width in pixels
    pub width: u32,
    /// Width / height
    pub aspect_ratio: f64,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the random stream; `None` picks one at render time
    pub seed: Option<u64>,
    pub shading: ShadingMode,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: None,
            shading: ShadingMode::Path,
        }
    }
}

impl ImageSettings {
    /// Image height derived from width and aspect ratio (at least 1).
    pub fn height(&self) -> u32 {
        ((self.width as f64 / self.aspect_ratio) as u32).max(1)
    }

    fn validate(&self) -> SceneResult<()> {
        if self.width == 0 {
            return Err(SceneError::InvalidImage("width must be positive".into()));
        }
        if !(self.aspect_ratio > 0.0) || !self.aspect_ratio.is_finite() {
            return Err(SceneError::InvalidImage(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.width > MAX_IMAGE_DIMENSION {
            return Err(SceneError::InvalidImage(format!(
                "width {} exceeds the {} pixel limit",
                self.width, MAX_IMAGE_DIMENSION
            )));
        }
        // height() saturates, so check the unrounded value
        let height = self.width as f64 / self.aspect_ratio;
        if height > MAX_IMAGE_DIMENSION as f64 {
            return Err(SceneError::InvalidImage(format!(
                "aspect ratio {} gives a height above the {} pixel limit",
                self.aspect_ratio, MAX_IMAGE_DIMENSION
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::InvalidImage("samples_per_pixel must be positive".into()));
        }
        if self.max_depth == 0 {
            return Err(SceneError::InvalidImage("max_depth must be positive".into()));
        }
        Ok(())
    }
}

/// Camera placement and lens parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Eye position
    pub look_from: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// World up direction
    pub up: Vec3,
    /// Viewport width / height
    pub aspect_ratio: f64,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Lens diameter; 0 is a pinhole
    pub aperture: f64,
    /// Distance from the eye to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect_ratio: 16.0 / 9.0,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraOptions {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    fn validate(&self) -> SceneResult<()> {
        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera("look_from and look_at coincide".into()));
        }
        if self.up.cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "up vector is parallel to the view direction".into(),
            ));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vfov must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aspect_ratio > 0.0) {
            return Err(SceneError::InvalidCamera("aspect ratio must be positive".into()));
        }
        if !(self.focus_dist > 0.0) {
            return Err(SceneError::InvalidCamera("focus distance must be positive".into()));
        }
        if !(self.aperture >= 0.0) {
            return Err(SceneError::InvalidCamera("aperture must not be negative".into()));
        }
        Ok(())
    }
}

/// A surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    /// Ideal diffuse reflector
    Lambertian { albedo: Vec3 },
    /// Specular reflector; `fuzz` in [0, 1] roughens the reflection
    Metal { albedo: Vec3, fuzz: f64 },
    /// Clear refractive material such as glass or water
    Dielectric { ior: f64 },
}

impl MaterialDesc {
    fn validate(&self, name: &str) -> SceneResult<()> {
        let invalid = |reason: String| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason,
        };
        match *self {
            MaterialDesc::Lambertian { .. } => Ok(()),
            MaterialDesc::Metal { fuzz, .. } if !(0.0..=1.0).contains(&fuzz) => {
                Err(invalid(format!("fuzz must be in [0, 1], got {}", fuzz)))
            }
            MaterialDesc::Metal { .. } => Ok(()),
            MaterialDesc::Dielectric { ior } if !(ior > 0.0) => {
                Err(invalid(format!("index of refraction must be positive, got {}", ior)))
            }
            MaterialDesc::Dielectric { .. } => Ok(()),
        }
    }
}

/// A geometric primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDesc {
    /// Sphere; a negative radius flips the normals inward (hollow shells)
    Sphere {
        center: Vec3,
        radius: f64,
        material: String,
    },
}

impl ObjectDesc {
    /// Name of the material this object references.
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. } => material,
        }
    }
}

/// A complete scene: settings, camera, materials and objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub image: ImageSettings,

    #[serde(default)]
    pub camera: CameraOptions,

    /// Materials by name, shared by every object that references them
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,

    /// Objects in insertion order
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// Create an empty scene with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) -> &mut Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Append a sphere.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f64,
        material: impl Into<String>,
    ) -> &mut Self {
        self.objects.push(ObjectDesc::Sphere {
            center,
            radius,
            material: material.into(),
        });
        self
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Check every setting, material and object.
    ///
    /// An empty object list is valid: it renders as pure sky.
    pub fn validate(&self) -> SceneResult<()> {
        self.image.validate()?;
        self.camera.validate()?;

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, object) in self.objects.iter().enumerate() {
            let name = object.material();
            if !self.materials.contains_key(name) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: name.to_string(),
                });
            }

            match *object {
                ObjectDesc::Sphere { center, radius, .. } => {
                    if radius == 0.0 || !radius.is_finite() {
                        return Err(SceneError::InvalidObject {
                            index,
                            reason: format!("sphere radius must be non-zero, got {}", radius),
                        });
                    }
                    if !center.is_finite() {
                        return Err(SceneError::InvalidObject {
                            index,
                            reason: "sphere center is not finite".into(),
                        });
                    }
                }
            }
        }

        if (self.camera.aspect_ratio - self.image.aspect_ratio).abs() > 1e-3 {
            log::warn!(
                "Camera aspect ratio {:.4} differs from image aspect ratio {:.4}; image will be stretched",
                self.camera.aspect_ratio,
                self.image.aspect_ratio
            );
        }

        Ok(())
    }
}

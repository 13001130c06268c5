//! Scene file loading.
//!
//! Scenes are JSON documents deserialized straight into
//! [`SceneDescription`] and validated before they are handed out.

use std::fs;
use std::path::Path;

use crate::presets;
use crate::scene::{SceneDescription, SceneError, SceneResult};

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&source)?;

    log::info!(
        "Loaded scene {}: {} objects, {} materials",
        path.display(),
        scene.object_count(),
        scene.material_count()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(source: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(source)?;
    scene.validate()?;
    Ok(scene)
}

/// Resolve a scene argument: a preset name, or otherwise a path to a JSON file.
pub fn resolve_scene(name_or_path: &str) -> SceneResult<SceneDescription> {
    if let Some(scene) = presets::by_name(name_or_path) {
        log::info!("Using preset scene '{}'", name_or_path);
        scene.validate()?;
        return Ok(scene);
    }

    let path = Path::new(name_or_path);
    if !path.exists() && path.extension().is_none() {
        return Err(SceneError::UnknownPreset(name_or_path.to_string()));
    }
    load_scene(path)
}

//! Build renderable hittables from a scene description.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Dielectric, HittableList, Lambertian, Material, Metal, RenderResult, Sphere};
use lumen_core::{MaterialDesc, ObjectDesc, SceneDescription, SceneError};

/// Instantiate a material from its description.
pub fn build_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
        MaterialDesc::Dielectric { ior } => Arc::new(Dielectric::new(ior)),
    }
}

/// Build the top-level hittable for a scene.
///
/// Each named material is instantiated once and shared by every object
/// that references it. Objects keep their scene order.
pub fn build_world(scene: &SceneDescription) -> RenderResult<HittableList> {
    let materials: HashMap<&str, Arc<dyn Material>> = scene
        .materials
        .iter()
        .map(|(name, desc)| (name.as_str(), build_material(desc)))
        .collect();

    let mut world = HittableList::new();
    for (index, object) in scene.objects.iter().enumerate() {
        let material = materials
            .get(object.material())
            .cloned()
            .ok_or_else(|| SceneError::UnknownMaterial {
                index,
                name: object.material().to_string(),
            })?;

        match *object {
            ObjectDesc::Sphere { center, radius, .. } => {
                world.add(Box::new(Sphere::new(center, radius, material)));
            }
        }
    }

    log::info!(
        "Built world: {} objects sharing {} materials",
        world.len(),
        materials.len()
    );

    Ok(world)
}

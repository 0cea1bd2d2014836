use glam::{Mat4, Quat, Vec3};
use std::sync::Arc;

use super::Generation;
use crate::loaders::ModelTemplate;
use crate::math::AABB;

/// One placed copy of a loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    pub template: Arc<ModelTemplate>,
    pub transform: Mat4,
}

impl ModelInstance {
    pub fn new(template: Arc<ModelTemplate>, scale: f32, position: Vec3) -> Self {
        let transform =
            Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, position);
        Self { template, transform }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn bounds(&self) -> AABB {
        self.template.bounds.transformed(&self.transform)
    }

    /// Triangles in scene space
    pub fn world_triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.template
            .triangles
            .iter()
            .map(|tri| tri.map(|v| self.transform.transform_point3(v)))
    }
}

/// Group of instances of one accessory model, tagged with the configuration
/// change that requested it
#[derive(Debug, Clone, PartialEq)]
pub struct SubAssembly {
    pub variant_ref: String,
    pub generation: Generation,
    instances: Vec<ModelInstance>,
}

impl SubAssembly {
    /// Clones the template once per position
    pub fn instantiate(
        variant_ref: impl Into<String>,
        generation: Generation,
        template: Arc<ModelTemplate>,
        scale: f32,
        positions: &[Vec3],
    ) -> Self {
        let instances = positions
            .iter()
            .map(|&position| ModelInstance::new(template.clone(), scale, position))
            .collect();

        Self {
            variant_ref: variant_ref.into(),
            generation,
            instances,
        }
    }

    pub fn instances(&self) -> &[ModelInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

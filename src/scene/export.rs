use serde::Serialize;

use super::composite::CompositeScene;
use super::resources::ResourceCounts;
use super::Generation;
use crate::math::AABB;
use crate::types::BoxData;

/// Snapshot of the scene for logs and headless output
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub latest_generation: Generation,
    pub primitive_generation: Option<Generation>,
    pub primitive_count: usize,
    pub accessory_ref: Option<String>,
    pub accessory_generation: Option<Generation>,
    pub accessory_instances: usize,
    pub last_failure: Option<String>,
    pub resources: ResourceCounts,
    pub bounds_min: Option<[f32; 3]>,
    pub bounds_max: Option<[f32; 3]>,
}

impl CompositeScene {
    /// Flattens the scene into boxes for the GPU: one per primitive and one
    /// per accessory triangle.
    pub fn to_boxes(&self) -> Vec<BoxData> {
        let primitives = self
            .primitives()
            .into_iter()
            .flatten()
            .map(|p| BoxData::from_bounds(&p.bounds(), p.material.color.rgb));

        let accessory = self.accessory().into_iter().flat_map(|assembly| {
            assembly.instances().iter().flat_map(|instance| {
                let color = instance.template.color.rgb;
                instance
                    .world_triangles()
                    .filter_map(|tri| AABB::from_points(tri))
                    .map(move |bounds| BoxData::from_bounds(&bounds, color))
            })
        });

        primitives.chain(accessory).collect()
    }

    pub fn bounds(&self) -> Option<AABB> {
        let primitives = self.primitives().and_then(|p| p.bounds());
        let accessory = self.accessory().and_then(|assembly| {
            assembly
                .instances()
                .iter()
                .map(|i| i.bounds())
                .reduce(|a, b| a.union(&b))
        });

        match (primitives, accessory) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        }
    }

    pub fn summary(&self) -> SceneSummary {
        let bounds = self.bounds();
        SceneSummary {
            latest_generation: self.latest_generation(),
            primitive_generation: self.primitive_generation(),
            primitive_count: self.primitives().map_or(0, |p| p.len()),
            accessory_ref: self.accessory().map(|a| a.variant_ref.clone()),
            accessory_generation: self.accessory_generation(),
            accessory_instances: self.accessory().map_or(0, |a| a.len()),
            last_failure: self.last_failure().map(|(_, message)| message.to_string()),
            resources: self.resource_counts(),
            bounds_min: bounds.map(|b| b.min.to_array()),
            bounds_max: bounds.map(|b| b.max.to_array()),
        }
    }
}

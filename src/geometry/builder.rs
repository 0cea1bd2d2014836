use glam::Vec3;
use std::sync::Arc;

use super::primitive::{Layout, Material, Primitive, PrimitiveKind, PrimitiveSet, ShapeLayout};
use crate::config::BuildSettings;
use crate::math::Color;
use crate::parameters::{Configuration, Dimensions};

// ============================================================================
// Shape generators
// ============================================================================

/// Top slab resting on the legs, centered horizontally
pub fn top(dims: &Dimensions, thickness: f32) -> ShapeLayout {
    ShapeLayout::new(
        PrimitiveKind::Top,
        Vec3::new(dims.width, thickness, dims.depth),
        Vec3::new(0.0, dims.height, 0.0),
    )
}

/// Four legs at the corners, inset by the thickness
pub fn legs(dims: &Dimensions, thickness: f32) -> [ShapeLayout; 4] {
    let x = dims.width / 2.0 - thickness;
    let z = dims.depth / 2.0 - thickness;
    let size = Vec3::new(thickness, dims.height, thickness);
    let y = dims.height / 2.0;

    [(-x, -z), (x, -z), (-x, z), (x, z)]
        .map(|(x, z)| ShapeLayout::new(PrimitiveKind::Leg, size, Vec3::new(x, y, z)))
}

/// Two braces near the floor, one per side, joining the front and back legs
pub fn braces(dims: &Dimensions, thickness: f32) -> [ShapeLayout; 2] {
    let x = dims.width / 2.0 - thickness;
    let size = Vec3::new(thickness, thickness, dims.depth - thickness * 2.0);

    [-x, x].map(|x| {
        ShapeLayout::new(
            PrimitiveKind::Brace,
            size,
            Vec3::new(x, thickness / 2.0, 0.0),
        )
    })
}

// ============================================================================
// Builder
// ============================================================================

/// Turns configurations into primitive sets.
///
/// Building happens in two stages: [`GeometryBuilder::layout`] depends on the
/// dimensions only and [`GeometryBuilder::paint`] only attaches materials, so
/// callers can reuse a layout when just the color changes.
///
/// Width and depth must exceed twice the thickness. Nothing is clamped here;
/// the input ranges guarantee it.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    settings: BuildSettings,
    frame_material: Arc<Material>,
}

impl GeometryBuilder {
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            settings,
            frame_material: Arc::new(Material::new(settings.frame_color)),
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Shared material of legs and braces, identical across rebuilds
    pub fn frame_material(&self) -> &Arc<Material> {
        &self.frame_material
    }

    pub fn layout(&self, dims: &Dimensions) -> Layout {
        let thickness = self.settings.thickness;
        debug_assert!(
            dims.width > 2.0 * thickness && dims.depth > 2.0 * thickness,
            "width and depth must exceed twice the thickness"
        );

        let shapes = std::iter::once(top(dims, thickness))
            .chain(legs(dims, thickness))
            .chain(braces(dims, thickness))
            .collect();

        Layout { shapes }
    }

    pub fn surface_material(&self, color: Color) -> Arc<Material> {
        Arc::new(Material::new(color))
    }

    pub fn paint(&self, layout: &Layout, surface: &Arc<Material>) -> PrimitiveSet {
        let primitives = layout
            .shapes
            .iter()
            .map(|shape| {
                let material = match shape.kind {
                    PrimitiveKind::Top => surface.clone(),
                    PrimitiveKind::Leg | PrimitiveKind::Brace => self.frame_material.clone(),
                };
                Primitive {
                    kind: shape.kind,
                    size: shape.size,
                    position: shape.position,
                    material,
                }
            })
            .collect();

        PrimitiveSet::new(primitives)
    }

    pub fn build(&self, config: &Configuration) -> PrimitiveSet {
        let layout = self.layout(&config.dimensions());
        self.paint(&layout, &self.surface_material(config.surface_color))
    }
}

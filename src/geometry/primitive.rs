use glam::Vec3;
use std::sync::Arc;

use crate::math::{Color, AABB};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Horizontal slab on top of the frame
    Top,
    Leg,
    /// Front-to-back connector between two legs
    Brace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Placement of one box shape, without any material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeLayout {
    pub kind: PrimitiveKind,
    /// Full extent along x, y, z
    pub size: Vec3,
    /// Center of the box
    pub position: Vec3,
}

impl ShapeLayout {
    pub fn new(kind: PrimitiveKind, size: Vec3, position: Vec3) -> Self {
        Self { kind, size, position }
    }
}

/// Material-free geometry of a whole table, depends on dimensions only
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub shapes: Vec<ShapeLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub size: Vec3,
    pub position: Vec3,
    pub material: Arc<Material>,
}

impl Primitive {
    pub fn bounds(&self) -> AABB {
        AABB::from_center_size(self.position, self.size)
    }
}

/// Ordered shapes of one table. Rebuilt wholesale, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSet {
    primitives: Vec<Primitive>,
}

impl PrimitiveSet {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    pub fn of_kind(&self, kind: PrimitiveKind) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.kind == kind)
    }

    pub fn bounds(&self) -> Option<AABB> {
        self.primitives
            .iter()
            .map(Primitive::bounds)
            .reduce(|a, b| a.union(&b))
    }
}

impl<'a> IntoIterator for &'a PrimitiveSet {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

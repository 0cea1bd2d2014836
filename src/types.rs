use crate::math::AABB;

/// Flattened box for GPU upload, one per primitive or accessory triangle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxData {
    pub min: [f32; 3],
    pub _pad1: f32,
    pub max: [f32; 3],
    pub _pad2: f32,
    pub color: [f32; 3],
    pub _pad3: f32,
}

impl BoxData {
    pub const fn new(min: [f32; 3], max: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            min,
            _pad1: 0.0,
            max,
            _pad2: 0.0,
            color,
            _pad3: 0.0,
        }
    }

    pub fn from_bounds(bounds: &AABB, color: [f32; 3]) -> Self {
        Self::new(bounds.min.to_array(), bounds.max.to_array(), color)
    }

    pub fn bounds(&self) -> AABB {
        AABB::new(self.min.into(), self.max.into())
    }
}

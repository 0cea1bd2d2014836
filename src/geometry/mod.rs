mod builder;
mod primitive;

pub use builder::{braces, legs, top, GeometryBuilder};
pub use primitive::{Layout, Material, Primitive, PrimitiveKind, PrimitiveSet, ShapeLayout};

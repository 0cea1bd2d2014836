use anyhow::{bail, Result};
use futures::future::LocalBoxFuture;
use glam::Vec3;

use crate::math::{Color, AABB};

/// Parsed accessory model, shared read-only by every instance cloned from it
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTemplate {
    pub name: String,
    /// Triangles in the model's own units
    pub triangles: Vec<[Vec3; 3]>,
    pub color: Color,
    pub bounds: AABB,
}

impl ModelTemplate {
    pub fn new(name: impl Into<String>, triangles: Vec<[Vec3; 3]>, color: Color) -> Result<Self> {
        let name = name.into();
        let Some(bounds) = AABB::from_points(triangles.iter().flatten().copied()) else {
            bail!("Asset {:?} contains no geometry", name);
        };

        Ok(Self {
            name,
            triangles,
            color,
            bounds,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Turns an asset ref into a loaded model.
///
/// The returned future is the only place the configurator waits on I/O. It
/// is polled on the scene thread, so it need not be `Send`.
pub trait AssetSource {
    fn load(&self, asset_ref: &str) -> LocalBoxFuture<'static, Result<ModelTemplate>>;
}

impl<S: AssetSource + ?Sized> AssetSource for std::rc::Rc<S> {
    fn load(&self, asset_ref: &str) -> LocalBoxFuture<'static, Result<ModelTemplate>> {
        (**self).load(asset_ref)
    }
}

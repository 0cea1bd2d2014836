use anyhow::{anyhow, bail, Context, Result};
use futures::channel::oneshot;
use futures::executor::ThreadPool;
use futures::future::{self, FutureExt, LocalBoxFuture};
use glam::{Mat4, Vec3};
use std::path::{Path, PathBuf};

use super::source::{AssetSource, ModelTemplate};
use crate::math::Color;

const DEFAULT_COLOR: [f32; 3] = [0.7, 0.7, 0.7];

/// Loads a glTF/GLB file into a single flattened model template
pub fn load_gltf_model(path: impl AsRef<Path>) -> Result<ModelTemplate> {
    let path = path.as_ref();
    log::debug!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path)
        .context(format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let color = gltf
        .materials()
        .next()
        .map(|m| {
            let c = m.pbr_metallic_roughness().base_color_factor();
            [c[0], c[1], c[2]]
        })
        .unwrap_or(DEFAULT_COLOR);

    let mut triangles = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut triangles)?;
        }
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let template = ModelTemplate::new(name, triangles, Color { rgb: color })?;
    log::info!(
        "Extracted {} triangles from {:?}",
        template.triangle_count(),
        path
    );
    Ok(template)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, triangles)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, triangles)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions = reader
            .read_positions()
            .context("Mesh primitive has no positions")?;

        let vertices: Vec<Vec3> = positions
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if let Some(indices) = reader.read_indices() {
            let indices: Vec<usize> = indices.into_u32().map(|i| i as usize).collect();

            for tri in indices.chunks_exact(3) {
                let corner = |i: usize| {
                    vertices
                        .get(i)
                        .copied()
                        .ok_or_else(|| anyhow!("Index {} out of range in mesh {:?}", i, mesh.name()))
                };
                triangles.push([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?]);
            }
        } else {
            // No indices - treat as triangle list
            triangles.extend(vertices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]));
        }
    }

    Ok(())
}

/// Loads accessory files from disk on a small worker pool
pub struct GltfAssetSource {
    root: PathBuf,
    pool: ThreadPool,
}

impl GltfAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let pool = ThreadPool::builder()
            .pool_size(2)
            .name_prefix("asset-loader-")
            .create()
            .context("Failed to start asset loader threads")?;

        Ok(Self {
            root: root.into(),
            pool,
        })
    }

    /// Maps an asset ref onto a file. Bare paths are relative to the asset
    /// root; `file://` refs are taken as is; other schemes are not supported.
    pub fn resolve(&self, asset_ref: &str) -> Result<PathBuf> {
        if let Some(path) = asset_ref.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if let Some((scheme, _)) = asset_ref.split_once("://") {
            bail!("Unsupported asset scheme {:?} in {:?}", scheme, asset_ref);
        }
        Ok(self.root.join(asset_ref))
    }
}

impl AssetSource for GltfAssetSource {
    fn load(&self, asset_ref: &str) -> LocalBoxFuture<'static, Result<ModelTemplate>> {
        let path = match self.resolve(asset_ref) {
            Ok(path) => path,
            Err(e) => return future::ready(Err(e)).boxed_local(),
        };

        let (tx, rx) = oneshot::channel();
        self.pool.spawn_ok(async move {
            // Receiver gone means nobody wants the result any more
            let _ = tx.send(load_gltf_model(&path));
        });

        async move {
            match rx.await {
                Ok(result) => result,
                Err(_) => Err(anyhow!("Asset loader dropped the request")),
            }
        }
        .boxed_local()
    }
}

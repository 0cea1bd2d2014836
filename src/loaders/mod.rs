pub mod gltf;
pub mod source;

pub use gltf::{load_gltf_model, GltfAssetSource};
pub use source::{AssetSource, ModelTemplate};

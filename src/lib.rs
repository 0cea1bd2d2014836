pub mod assembly;
pub mod catalog;
pub mod cli;
pub mod composer;
pub mod config;
pub mod geometry;
pub mod loaders;
pub mod math;
pub mod parameters;
pub mod scene;
pub mod trigger;
pub mod types;

pub use assembly::{LoadFailure, LoadRequest, SubAssemblyLoader};
pub use composer::SceneComposer;
pub use config::{BuildSettings, ConfiguratorConfig};
pub use geometry::{GeometryBuilder, PrimitiveSet};
pub use parameters::{Configuration, ParameterChange, ParameterState};
pub use scene::{CompositeScene, Generation, SceneHandle};
pub use trigger::ReactiveRecomputeTrigger;

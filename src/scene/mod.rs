mod composite;
mod export;
mod resources;
mod sub_assembly;

pub use composite::{CompositeScene, InstallOutcome, SceneHandle};
pub use export::SceneSummary;
pub use resources::{ResourceCounts, ResourceHandle, ResourceKind, ResourceLedger};
pub use sub_assembly::{ModelInstance, SubAssembly};

use serde::Serialize;
use std::fmt;

/// Monotonic tag of a configuration change, used to spot stale loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

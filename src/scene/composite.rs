use std::cell::RefCell;
use std::rc::Rc;

use super::resources::{ResourceCounts, ResourceHandle, ResourceKind, ResourceLedger};
use super::sub_assembly::SubAssembly;
use super::Generation;
use crate::geometry::PrimitiveSet;

/// Shared handle given to the renderer once; it reads the current children
/// every frame.
pub type SceneHandle = Rc<RefCell<CompositeScene>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Attached; `replaced` tells whether an older accessory was released
    Installed { replaced: bool },
    /// A newer configuration change was issued meanwhile
    Stale,
}

struct InstalledPrimitives {
    generation: Generation,
    set: PrimitiveSet,
    _buffers: Vec<ResourceHandle>,
}

struct InstalledAccessory {
    assembly: SubAssembly,
    _instances: Vec<ResourceHandle>,
}

/// The single live scene: current primitives plus at most one accessory.
///
/// The scene owns the generation counter. Accessory installs compare against
/// it at install time, never against a value captured by the caller.
pub struct CompositeScene {
    ledger: ResourceLedger,
    latest: Generation,
    primitives: Option<InstalledPrimitives>,
    accessory: Option<InstalledAccessory>,
    last_failure: Option<(Generation, String)>,
}

impl CompositeScene {
    pub fn new() -> Self {
        Self {
            ledger: ResourceLedger::new(),
            latest: Generation::default(),
            primitives: None,
            accessory: None,
            last_failure: None,
        }
    }

    pub fn into_handle(self) -> SceneHandle {
        Rc::new(RefCell::new(self))
    }

    /// Starts a new configuration change and returns its tag
    pub fn issue_generation(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.latest
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    /// Swaps in a new primitive set. The new buffers exist before the old
    /// ones are released, and both swaps happen under one borrow, so a reader
    /// sees either the old set or the new one.
    pub fn replace_primitives(&mut self, generation: Generation, set: PrimitiveSet) {
        let buffers = set
            .iter()
            .map(|_| self.ledger.allocate(ResourceKind::GeometryBuffer))
            .collect();

        let previous = self.primitives.replace(InstalledPrimitives {
            generation,
            set,
            _buffers: buffers,
        });
        drop(previous);
    }

    /// Attaches an accessory if it belongs to the latest configuration
    /// change. Stale assemblies are dropped without touching the scene.
    pub fn install_sub_assembly(&mut self, assembly: SubAssembly) -> InstallOutcome {
        if !self.is_current(assembly.generation) {
            return InstallOutcome::Stale;
        }

        let instances = assembly
            .instances()
            .iter()
            .map(|_| self.ledger.allocate(ResourceKind::ModelInstance))
            .collect();

        let previous = self.accessory.replace(InstalledAccessory {
            assembly,
            _instances: instances,
        });
        self.last_failure = None;

        InstallOutcome::Installed {
            replaced: previous.is_some(),
        }
    }

    /// Records a failed accessory load; the accessory slot is left as is
    pub fn record_failure(&mut self, generation: Generation, message: String) {
        self.last_failure = Some((generation, message));
    }

    pub fn last_failure(&self) -> Option<(Generation, &str)> {
        self.last_failure
            .as_ref()
            .map(|(generation, message)| (*generation, message.as_str()))
    }

    pub fn primitives(&self) -> Option<&PrimitiveSet> {
        self.primitives.as_ref().map(|p| &p.set)
    }

    pub fn primitive_generation(&self) -> Option<Generation> {
        self.primitives.as_ref().map(|p| p.generation)
    }

    pub fn accessory(&self) -> Option<&SubAssembly> {
        self.accessory.as_ref().map(|a| &a.assembly)
    }

    pub fn accessory_generation(&self) -> Option<Generation> {
        self.accessory.as_ref().map(|a| a.assembly.generation)
    }

    pub fn resource_counts(&self) -> ResourceCounts {
        self.ledger.counts()
    }

    /// Detaches and releases everything the scene owns
    pub fn teardown(&mut self) {
        self.primitives = None;
        self.accessory = None;
        self.last_failure = None;
    }
}

impl Default for CompositeScene {
    fn default() -> Self {
        Self::new()
    }
}

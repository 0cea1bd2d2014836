use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

/// Resources a scene subtree owns exclusively. Shared materials and model
/// templates are reference counted and never tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    GeometryBuffer,
    ModelInstance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounts {
    pub geometry_buffers: usize,
    pub model_instances: usize,
}

#[derive(Debug, Default)]
struct Counters {
    geometry_buffers: Cell<usize>,
    model_instances: Cell<usize>,
}

impl Counters {
    fn cell(&self, kind: ResourceKind) -> &Cell<usize> {
        match kind {
            ResourceKind::GeometryBuffer => &self.geometry_buffers,
            ResourceKind::ModelInstance => &self.model_instances,
        }
    }
}

/// Tracks live scene resources. Allocation hands out a handle that releases
/// its slot when dropped.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    counters: Rc<Counters>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, kind: ResourceKind) -> ResourceHandle {
        let cell = self.counters.cell(kind);
        cell.set(cell.get() + 1);
        ResourceHandle {
            kind,
            counters: self.counters.clone(),
        }
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            geometry_buffers: self.counters.geometry_buffers.get(),
            model_instances: self.counters.model_instances.get(),
        }
    }
}

#[derive(Debug)]
pub struct ResourceHandle {
    kind: ResourceKind,
    counters: Rc<Counters>,
}

impl ResourceHandle {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        let cell = self.counters.cell(self.kind);
        cell.set(cell.get() - 1);
    }
}

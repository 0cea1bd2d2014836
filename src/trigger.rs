// trigger.rs - Drives the composer from a stream of configuration snapshots
use futures::task::LocalSpawn;
use futures::{Stream, StreamExt};

use crate::composer::SceneComposer;
use crate::loaders::AssetSource;
use crate::parameters::Configuration;

/// Calls the composer exactly once per snapshot, in arrival order.
/// No coalescing happens here; overlapping loads are sorted out by
/// generation tags further down.
pub struct ReactiveRecomputeTrigger<S, Sp> {
    composer: SceneComposer<S, Sp>,
    fired: usize,
}

impl<S: AssetSource, Sp: LocalSpawn> ReactiveRecomputeTrigger<S, Sp> {
    pub fn new(composer: SceneComposer<S, Sp>) -> Self {
        Self { composer, fired: 0 }
    }

    pub fn composer(&self) -> &SceneComposer<S, Sp> {
        &self.composer
    }

    /// Number of recomputes triggered so far
    pub fn fired(&self) -> usize {
        self.fired
    }

    pub fn fire(&mut self, config: &Configuration) {
        self.composer.on_configuration_change(config);
        self.fired += 1;
    }

    /// Runs until the snapshot stream ends
    pub async fn run<St>(&mut self, snapshots: St)
    where
        St: Stream<Item = Configuration>,
    {
        futures::pin_mut!(snapshots);
        while let Some(config) = snapshots.next().await {
            self.fire(&config);
        }
        log::debug!("Snapshot stream closed after {} recomputes", self.fired);
    }
}

// composer.rs - Owns the live scene and rebuilds it on configuration changes
use futures::task::{LocalSpawn, LocalSpawnExt};
use std::rc::Rc;
use std::sync::Arc;

use crate::assembly::{LoadRequest, SubAssemblyLoader};
use crate::catalog::{Catalog, PlacementRule};
use crate::config::BuildSettings;
use crate::geometry::{GeometryBuilder, Layout, Material, PrimitiveSet};
use crate::loaders::AssetSource;
use crate::parameters::{Configuration, Dimensions};
use crate::scene::{Generation, InstallOutcome, SceneHandle};

/// Applies configurations to the composite scene.
///
/// Primitives are swapped synchronously on every change. The accessory load
/// runs as a task on the local spawner and only lands if its generation is
/// still the scene's latest when it resolves.
pub struct SceneComposer<S, Sp> {
    scene: SceneHandle,
    builder: GeometryBuilder,
    loader: SubAssemblyLoader<S>,
    catalog: Catalog,
    spawner: Sp,
    layout_cache: Option<(Dimensions, Rc<Layout>)>,
    surface_cache: Option<Arc<Material>>,
}

impl<S: AssetSource, Sp: LocalSpawn> SceneComposer<S, Sp> {
    pub fn new(
        scene: SceneHandle,
        settings: BuildSettings,
        catalog: Catalog,
        source: S,
        spawner: Sp,
    ) -> Self {
        Self {
            scene,
            builder: GeometryBuilder::new(settings),
            loader: SubAssemblyLoader::new(source, settings.accessory_scale, settings.thickness)
                .cache_only(catalog.entries().iter().map(|entry| entry.asset_ref.clone())),
            catalog,
            spawner,
            layout_cache: None,
            surface_cache: None,
        }
    }

    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    pub fn loader(&self) -> &SubAssemblyLoader<S> {
        &self.loader
    }

    pub fn on_configuration_change(&mut self, config: &Configuration) -> Generation {
        let generation = self.scene.borrow_mut().issue_generation();
        log::debug!("Configuration change {}: {:?}", generation, config);

        let primitives = self.primitives_for(config);
        self.scene
            .borrow_mut()
            .replace_primitives(generation, primitives);

        self.request_accessory(config, generation);
        generation
    }

    /// Same output as `GeometryBuilder::build`, reusing the layout when the
    /// dimensions are unchanged and the surface material when the color is.
    fn primitives_for(&mut self, config: &Configuration) -> PrimitiveSet {
        let dims = config.dimensions();
        let layout = match &self.layout_cache {
            Some((cached, layout)) if *cached == dims => layout.clone(),
            _ => {
                let layout = Rc::new(self.builder.layout(&dims));
                self.layout_cache = Some((dims, layout.clone()));
                layout
            }
        };

        let surface = match &self.surface_cache {
            Some(material) if material.color == config.surface_color => material.clone(),
            _ => {
                let material = self.builder.surface_material(config.surface_color);
                self.surface_cache = Some(material.clone());
                material
            }
        };

        self.builder.paint(&layout, &surface)
    }

    fn request_accessory(&self, config: &Configuration, generation: Generation) {
        let placement = match self.catalog.find(&config.accessory_ref) {
            Some(entry) => entry.placement.clone(),
            None => {
                log::warn!(
                    "Accessory {:?} is not in the catalog, using the default placement",
                    config.accessory_ref
                );
                PlacementRule::default()
            }
        };

        let request = LoadRequest {
            variant_ref: config.accessory_ref.clone(),
            issued_at: generation,
        };
        let load = self
            .loader
            .request(request, &placement, &config.dimensions());
        let scene = Rc::downgrade(&self.scene);

        let task = async move {
            let result = load.await;

            let Some(scene) = scene.upgrade() else {
                log::debug!("Scene torn down before accessory load {} resolved", generation);
                return;
            };
            let mut scene = scene.borrow_mut();

            match result {
                Ok(assembly) => {
                    let variant_ref = assembly.variant_ref.clone();
                    match scene.install_sub_assembly(assembly) {
                        InstallOutcome::Installed { replaced } => log::info!(
                            "Installed accessory {:?} for {} (replaced previous: {})",
                            variant_ref,
                            generation,
                            replaced
                        ),
                        InstallOutcome::Stale => log::debug!(
                            "Discarding stale accessory {:?} for {}, latest is {}",
                            variant_ref,
                            generation,
                            scene.latest_generation()
                        ),
                    }
                }
                Err(failure) if scene.is_current(failure.generation) => {
                    log::error!("{}", failure);
                    scene.record_failure(failure.generation, failure.to_string());
                }
                Err(failure) => {
                    log::debug!("Ignoring stale load failure: {}", failure);
                }
            }
        };

        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("Failed to schedule accessory load for {}: {}", generation, e);
        }
    }
}

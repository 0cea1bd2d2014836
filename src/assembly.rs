// assembly.rs - Asynchronous accessory loading and instancing
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use crate::catalog::PlacementRule;
use crate::loaders::{AssetSource, ModelTemplate};
use crate::parameters::Dimensions;
use crate::scene::{Generation, SubAssembly};

/// Ties an asynchronous load to the configuration change that asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub variant_ref: String,
    pub issued_at: Generation,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to load accessory {variant_ref:?} for {generation}: {cause:#}")]
pub struct LoadFailure {
    pub variant_ref: String,
    pub generation: Generation,
    pub cause: anyhow::Error,
}

/// Fetches accessory models and turns them into positioned sub-assemblies.
///
/// Parsed templates are kept per asset ref, so a resize that keeps the same
/// accessory only re-places instances. With `cache_only` the cache holds at
/// most the listed refs and anything else is fetched on every request.
/// Failures are not remembered; the next request for the same ref fetches
/// again. Superseded loads are never cancelled, the caller drops their results.
pub struct SubAssemblyLoader<S> {
    source: S,
    scale: f32,
    thickness: f32,
    cacheable: Option<HashSet<String>>,
    templates: Rc<RefCell<HashMap<String, Arc<ModelTemplate>>>>,
}

impl<S: AssetSource> SubAssemblyLoader<S> {
    pub fn new(source: S, scale: f32, thickness: f32) -> Self {
        Self {
            source,
            scale,
            thickness,
            cacheable: None,
            templates: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Restricts template caching to `refs`
    pub fn cache_only<I>(mut self, refs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.cacheable = Some(refs.into_iter().map(Into::into).collect());
        self
    }

    fn is_cacheable(&self, variant_ref: &str) -> bool {
        self.cacheable
            .as_ref()
            .map_or(true, |refs| refs.contains(variant_ref))
    }

    pub fn cached_templates(&self) -> usize {
        self.templates.borrow().len()
    }

    pub fn request(
        &self,
        request: LoadRequest,
        placement: &PlacementRule,
        dims: &Dimensions,
    ) -> LocalBoxFuture<'static, Result<SubAssembly, LoadFailure>> {
        let positions = placement.resolve(dims, self.thickness);
        let template = self.template(&request.variant_ref);
        let scale = self.scale;

        async move {
            let LoadRequest {
                variant_ref,
                issued_at,
            } = request;

            match template.await {
                Ok(template) => Ok(SubAssembly::instantiate(
                    variant_ref,
                    issued_at,
                    template,
                    scale,
                    &positions,
                )),
                Err(cause) => Err(LoadFailure {
                    variant_ref,
                    generation: issued_at,
                    cause,
                }),
            }
        }
        .boxed_local()
    }

    fn template(&self, variant_ref: &str) -> LocalBoxFuture<'static, anyhow::Result<Arc<ModelTemplate>>> {
        if let Some(template) = self.templates.borrow().get(variant_ref) {
            log::debug!("Using cached template for {:?}", variant_ref);
            return future::ready(Ok(template.clone())).boxed_local();
        }

        log::debug!("Fetching accessory asset {:?}", variant_ref);
        let load = self.source.load(variant_ref);
        let templates = self
            .is_cacheable(variant_ref)
            .then(|| (self.templates.clone(), variant_ref.to_string()));

        async move {
            let template = Arc::new(load.await?);
            if let Some((templates, key)) = templates {
                templates.borrow_mut().insert(key, template.clone());
            }
            Ok::<_, anyhow::Error>(template)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use anyhow::anyhow;
    use glam::Vec3;
    use std::cell::Cell;

    /// Resolves immediately and counts fetches
    struct CountingSource {
        fetches: Rc<Cell<usize>>,
    }

    impl AssetSource for CountingSource {
        fn load(&self, asset_ref: &str) -> LocalBoxFuture<'static, anyhow::Result<ModelTemplate>> {
            self.fetches.set(self.fetches.get() + 1);
            let result = if asset_ref == "broken.glb" {
                Err(anyhow!("unexpected end of file"))
            } else {
                ModelTemplate::new(asset_ref, vec![[Vec3::ZERO, Vec3::X, Vec3::Y]], Color::new(0.5, 0.5, 0.5))
            };
            future::ready(result).boxed_local()
        }
    }

    fn dims() -> Dimensions {
        Dimensions { height: 700.0, width: 1500.0, depth: 800.0 }
    }

    fn request(variant_ref: &str, generation: u64) -> LoadRequest {
        LoadRequest {
            variant_ref: variant_ref.to_string(),
            issued_at: Generation(generation),
        }
    }

    #[test]
    fn test_request_builds_four_scaled_instances() {
        let fetches = Rc::new(Cell::new(0));
        let loader = SubAssemblyLoader::new(CountingSource { fetches }, 2000.0, 40.0);
        let placement = PlacementRule::underside_quarter_depth();

        let assembly = futures::executor::block_on(loader.request(request("prop_01.glb", 7), &placement, &dims())).unwrap();
        assert_eq!(assembly.generation, Generation(7));
        assert_eq!(assembly.variant_ref, "prop_01.glb");
        assert_eq!(assembly.len(), 4);
        assert_eq!(assembly.instances()[0].position(), Vec3::new(710.0, -20.0, -200.0));
        assert_eq!(assembly.instances()[3].position(), Vec3::new(-710.0, -20.0, 200.0));
        assert_eq!(assembly.instances()[0].transform.x_axis.x, 2000.0);
    }

    #[test]
    fn test_templates_are_cached_per_ref() {
        let fetches = Rc::new(Cell::new(0));
        let loader = SubAssemblyLoader::new(CountingSource { fetches: fetches.clone() }, 1.0, 40.0);
        let placement = PlacementRule::default();

        for generation in 1..=3 {
            futures::executor::block_on(loader.request(request("prop_01.glb", generation), &placement, &dims())).unwrap();
        }
        assert_eq!(fetches.get(), 1);
        assert_eq!(loader.cached_templates(), 1);
    }

    #[test]
    fn test_cache_only_keeps_listed_refs() {
        let fetches = Rc::new(Cell::new(0));
        let loader = SubAssemblyLoader::new(CountingSource { fetches: fetches.clone() }, 1.0, 40.0)
            .cache_only(["prop_01.glb"]);
        let placement = PlacementRule::default();

        for (generation, variant_ref) in ["prop_01.glb", "other_a.glb", "other_b.glb", "other_a.glb", "prop_01.glb"]
            .into_iter()
            .enumerate()
        {
            futures::executor::block_on(loader.request(request(variant_ref, generation as u64), &placement, &dims()))
                .unwrap();
        }
        // prop_01 once, other_a twice, other_b once
        assert_eq!(fetches.get(), 4);
        assert_eq!(loader.cached_templates(), 1);
    }

    #[test]
    fn test_failure_names_ref_and_is_not_cached() {
        let fetches = Rc::new(Cell::new(0));
        let loader = SubAssemblyLoader::new(CountingSource { fetches: fetches.clone() }, 1.0, 40.0);
        let placement = PlacementRule::default();

        for generation in 1..=2 {
            let failure = futures::executor::block_on(loader.request(request("broken.glb", generation), &placement, &dims()))
                .unwrap_err();
            assert_eq!(failure.variant_ref, "broken.glb");
            assert_eq!(failure.generation, Generation(generation));
            assert!(failure.to_string().contains("unexpected end of file"));
        }
        assert_eq!(fetches.get(), 2);
        assert_eq!(loader.cached_templates(), 0);
    }
}

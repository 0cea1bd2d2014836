use anyhow::{Context, Result};
use clap::Parser;
use futures::executor::LocalPool;

use table_configurator::cli::Cli;
use table_configurator::composer::SceneComposer;
use table_configurator::config::ConfiguratorConfig;
use table_configurator::loaders::GltfAssetSource;
use table_configurator::parameters::{ParameterChange, ParameterState};
use table_configurator::scene::{CompositeScene, SceneSummary};
use table_configurator::trigger::ReactiveRecomputeTrigger;

fn print_summary(summary: &SceneSummary, box_count: usize) {
    println!("Scene at {}:", summary.latest_generation);
    println!("  Primitives: {} (from {:?})", summary.primitive_count, summary.primitive_generation);
    match (&summary.accessory_ref, summary.accessory_generation) {
        (Some(accessory), Some(generation)) => println!(
            "  Accessory: {} x{} (from {})",
            accessory, summary.accessory_instances, generation
        ),
        _ => println!("  Accessory: none"),
    }
    if let Some(failure) = &summary.last_failure {
        println!("  Last load failure: {}", failure);
    }
    if let (Some(min), Some(max)) = (summary.bounds_min, summary.bounds_max) {
        println!("  Bounds: {:?} .. {:?}", min, max);
    }
    println!(
        "  Live resources: {} geometry buffers, {} model instances",
        summary.resources.geometry_buffers, summary.resources.model_instances
    );
    println!("  GPU boxes: {}", box_count);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfiguratorConfig::load(path)?,
        None => ConfiguratorConfig::default(),
    };
    if let Some(root) = &cli.asset_root {
        config.asset_root = root.clone();
    }
    config.validate().context("Invalid configurator config")?;

    if cli.list_accessories {
        for entry in config.catalog.entries() {
            println!(
                "{}: {} ({} instances)",
                entry.label,
                entry.asset_ref,
                entry.placement.instance_count()
            );
        }
        return Ok(());
    }

    let changes = cli
        .set
        .iter()
        .map(|s| s.parse::<ParameterChange>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --set argument")?;

    let mut pool = LocalPool::new();
    let scene = CompositeScene::new().into_handle();
    let source = GltfAssetSource::new(&config.asset_root)?;
    let composer = SceneComposer::new(
        scene.clone(),
        config.build_settings(),
        config.catalog.clone(),
        source,
        pool.spawner(),
    );
    let mut trigger = ReactiveRecomputeTrigger::new(composer);

    let mut state = ParameterState::new(
        config.initial_configuration(),
        config.ranges,
        config.catalog.clone(),
    );
    let snapshots = state.subscribe();
    state.publish();
    for change in changes {
        if state.apply(change.clone())?.is_none() {
            log::info!("Skipping no-op change {:?}", change);
        }
    }
    // Closing the input side ends the snapshot stream
    drop(state);

    pool.run_until(trigger.run(snapshots));
    // Wait for every outstanding accessory load, stale ones included
    pool.run();

    let scene = scene.borrow();
    let summary = scene.summary();
    log::info!("{} recomputes, final scene {:?}", trigger.fired(), summary);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.no_ui {
        print_summary(&summary, scene.to_boxes().len());
    }

    Ok(())
}

//! Demo binary: selects decorators for a catalogue of tree configurations,
//! places the decorated trees on a flat in-memory world, then places every
//! template from the configured library.
//!
//! Run with `cargo run -p canopy-demo -- --seed 7 --attempts 16`.
//! Run with `cargo run -p canopy-demo -- --templates ./structures` to place templates too.

mod catalog;
mod rules;
mod tree;

use std::path::PathBuf;
use std::process::ExitCode;

use canopy_config::{CliArgs, Config};
use canopy_decorator::{FOLIAGE, TRUNK};
use canopy_template::{TemplateConfig, TemplateLibrary};
use canopy_voxel::{GenerationContext, Generator, SparseGrid, Typed, VoxelTypeRegistry};
use clap::Parser;
use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::rules::RuleSet;
use crate::tree::{SimpleTree, TreeParams};

/// Half-width of the flat ground square.
const WORLD_RADIUS: i32 = 48;

#[derive(Debug, Default)]
struct Summary {
    attempted: u32,
    placed: u32,
    templates_placed: u32,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("canopy"))
            .unwrap_or_else(|| PathBuf::from(".canopy"))
    });

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    canopy_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let registry = match catalog::registry() {
        Ok(registry) => registry,
        Err(err) => {
            tracing::error!(%err, "failed to build voxel registry");
            return ExitCode::FAILURE;
        }
    };

    let rules = match config.rules.path.as_deref() {
        Some(path) => RuleSet::load(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "falling back to built-in rules");
            RuleSet::from_json(&catalog::default_rules())
        }),
        None => RuleSet::from_json(&catalog::default_rules()),
    };
    info!(rules = rules.len(), "decoration rules ready");

    let generation = &config.generation;
    let ctx = GenerationContext {
        seed: generation.seed,
        sea_level: generation.sea_level,
        min_y: generation.min_y,
        max_y: generation.max_y,
    };
    let mut world = SparseGrid::new(ctx.min_y, ctx.max_y);
    if let Some(grass) = registry.default_state("grass") {
        world.fill_ground(WORLD_RADIUS, ctx.sea_level, &grass);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);

    let mut summary = Summary::default();
    for entry in catalog::decorations() {
        place_decorated(
            &mut world,
            &ctx,
            &mut rng,
            &registry,
            &rules,
            &entry,
            generation.attempts,
            &mut summary,
        );
    }

    if let Some(dir) = config.templates.directory.as_deref() {
        let defaults = TemplateConfig {
            paste_air: config.templates.paste_air,
            replace_solid: config.templates.replace_solid,
            base_depth: config.templates.base_depth,
        };
        match TemplateLibrary::load(dir, &config.templates.manifest, &registry, defaults) {
            Ok(library) => place_templates(&mut world, &ctx, &mut rng, &library, &mut summary),
            Err(err) => warn!(dir = %dir.display(), %err, "template library unavailable"),
        }
    }

    info!(
        attempted = summary.attempted,
        placed = summary.placed,
        templates = summary.templates_placed,
        voxels = world.len(),
        version = world.version(),
        "demo complete"
    );
    ExitCode::SUCCESS
}

/// A random surface position inside the ground square.
fn surface_origin(rng: &mut ChaCha8Rng, ctx: &GenerationContext) -> IVec3 {
    let reach = WORLD_RADIUS - 4;
    IVec3::new(
        rng.random_range(-reach..=reach),
        ctx.sea_level + 1,
        rng.random_range(-reach..=reach),
    )
}

/// Builds the tree for one catalogue entry, decorates it with the first
/// matching rule and places it `attempts` times.
#[allow(clippy::too_many_arguments)]
fn place_decorated(
    world: &mut SparseGrid,
    ctx: &GenerationContext,
    rng: &mut ChaCha8Rng,
    registry: &VoxelTypeRegistry,
    rules: &RuleSet,
    entry: &serde_json::Value,
    attempts: u32,
    summary: &mut Summary,
) {
    let tree = match serde_json::from_value::<TreeParams>(entry.clone())
        .map_err(|err| err.to_string())
        .and_then(|params| SimpleTree::new(&params, registry).map_err(|err| err.to_string()))
    {
        Ok(tree) => tree,
        Err(err) => {
            warn!(%entry, %err, "skipping decoration");
            return;
        }
    };

    let Some(rule) = rules.select(entry) else {
        info!(%entry, "no rule matched, placing undecorated");
        for _ in 0..attempts {
            let origin = surface_origin(rng, ctx);
            summary.attempted += 1;
            summary.placed += u32::from(tree.generate(world, ctx, rng, origin, &()));
        }
        return;
    };

    let Some(decorators) = rule.decorators(registry) else {
        warn!(rule = %rule.name, "rule has no usable decorators");
        return;
    };
    let decorated = decorators.decorate(tree);
    info!(
        rule = %rule.name,
        decorators = decorated.decorators().len(),
        feature_type = ?decorated.feature_type(),
        "decorating"
    );

    for _ in 0..attempts {
        let origin = surface_origin(rng, ctx);
        summary.attempted += 1;
        if decorated.generate(world, ctx, rng, origin, &()) {
            summary.placed += 1;
        } else {
            tracing::debug!(?origin, "placement failed");
        }
    }

    // One more placement, inspected through the recorder.
    let origin = surface_origin(rng, ctx);
    summary.attempted += 1;
    if let Some(env) = decorated.generate_recorded(world, ctx, rng, origin, &()) {
        summary.placed += 1;
        info!(
            rule = %rule.name,
            trunk = env.count(TRUNK),
            foliage = env.count(FOLIAGE),
            bounds = ?env.bounds(),
            "sample placement"
        );
    }
}

/// Places each library template once at a random surface position.
fn place_templates(
    world: &mut SparseGrid,
    ctx: &GenerationContext,
    rng: &mut ChaCha8Rng,
    library: &TemplateLibrary,
    summary: &mut Summary,
) {
    for name in library.names() {
        let Some(feature) = library.get(name) else {
            continue;
        };
        let origin = surface_origin(rng, ctx);
        let placed = feature.generate(world, ctx, rng, origin, &());
        info!(name, ?origin, placed, blocks = feature.template.len(), "template");
        summary.templates_placed += u32::from(placed);
    }
}

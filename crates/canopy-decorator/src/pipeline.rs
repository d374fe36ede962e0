//! Post-placement decorators layered onto a base generator.

use canopy_voxel::{FeatureType, GenerationContext, Generator, Typed, VoxelGrid};
use glam::IVec3;
use rand::RngCore;

use crate::recorder::{Classifier, RecordingEnvironment, WorldFactory};

/// A post-placement behaviour.
///
/// Decorators hold no per-placement state; everything they need is in the
/// environment, which is fresh for each placement. They write only through
/// the environment. A panic inside a decorator is a defect and is not caught.
pub trait Decorator: Send + Sync {
    fn apply(&self, world: &mut RecordingEnvironment<'_>, rng: &mut dyn RngCore);
}

/// A base generator plus the decorators run after it succeeds.
///
/// Implements [`Generator`] with the base generator's configuration, so it
/// can stand in for the undecorated generator anywhere.
pub struct DecoratedGenerator<G, F = Classifier> {
    generator: G,
    decorators: Vec<Box<dyn Decorator>>,
    factory: F,
}

impl<G, F> DecoratedGenerator<G, F> {
    pub fn new(generator: G, decorators: Vec<Box<dyn Decorator>>, factory: F) -> Self {
        Self {
            generator,
            decorators,
            factory,
        }
    }

    pub fn decorators(&self) -> &[Box<dyn Decorator>] {
        &self.decorators
    }
}

impl<G: Generator, F: WorldFactory> DecoratedGenerator<G, F> {
    /// Runs a full decorated placement and returns the recording environment
    /// for inspection, or `None` when the base generator placed nothing.
    ///
    /// Records are in world space when this returns.
    pub fn generate_recorded<'w>(
        &self,
        world: &'w mut dyn VoxelGrid,
        ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        config: &G::Config,
    ) -> Option<RecordingEnvironment<'w>> {
        let mut env = self.factory.wrap(world);
        env.set_record_origin(origin);

        if !self.generator.generate(&mut env, ctx, rng, origin, config) {
            tracing::trace!(?origin, "base generator placed nothing, skipping decorators");
            return None;
        }

        env.translate(origin);
        self.decorate(&mut env, rng);
        tracing::trace!(
            ?origin,
            writes = env.writes(),
            decorators = self.decorators.len(),
            "decorated placement complete"
        );
        Some(env)
    }

    fn decorate(&self, world: &mut RecordingEnvironment<'_>, rng: &mut dyn RngCore) {
        for decorator in &self.decorators {
            decorator.apply(world, rng);
        }
    }
}

impl<G: Generator, F: WorldFactory> Generator for DecoratedGenerator<G, F> {
    type Config = G::Config;

    fn generate(
        &self,
        world: &mut dyn VoxelGrid,
        ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        config: &Self::Config,
    ) -> bool {
        self.generate_recorded(world, ctx, rng, origin, config).is_some()
    }
}

impl<G: Typed, F> Typed for DecoratedGenerator<G, F> {
    fn feature_type(&self) -> FeatureType {
        self.generator.feature_type()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

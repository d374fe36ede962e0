//! Post-placement decoration of generated features.
//!
//! A [`DecoratedGenerator`] runs a base [`Generator`](canopy_voxel::Generator)
//! through a [`RecordingEnvironment`], and only if the base placed something,
//! runs its [`Decorator`]s against what was recorded.

mod factory;
mod pipeline;
mod recorder;
mod tree;

pub use factory::{DecoratorConfig, DecoratorConfigError, DecoratorSet};
pub use pipeline::{DecoratedGenerator, Decorator};
pub use recorder::{Classifier, FOLIAGE, RecordingEnvironment, TRUNK, WorldFactory};
pub use tree::{TrunkAttachment, Vines};

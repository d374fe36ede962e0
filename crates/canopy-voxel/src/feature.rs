//! Placement capabilities shared by base algorithms, decorated pipelines and templates.

use glam::IVec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::grid::VoxelGrid;

/// Classification of a placement algorithm (tree, boulder, ruin, etc.).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Tree,
    Bush,
    #[default]
    Structure,
    Vegetation,
    Generic,
}

/// Read-only facts about the region being generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationContext {
    /// World seed.
    pub seed: u64,
    /// Absolute height of the water line.
    pub sea_level: i32,
    /// Lowest buildable height.
    pub min_y: i32,
    /// Highest buildable height.
    pub max_y: i32,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 63,
            min_y: 0,
            max_y: 255,
        }
    }
}

/// A placement algorithm.
///
/// Implementations write only through `world`, draw randomness only from
/// `rng`, and report whether anything was placed. Placement is not
/// transactional: voxels written before a failure stay written.
pub trait Generator {
    /// Per-invocation settings.
    type Config;

    fn generate(
        &self,
        world: &mut dyn VoxelGrid,
        ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        config: &Self::Config,
    ) -> bool;
}

/// A placement algorithm that reports its classification.
pub trait Typed {
    fn feature_type(&self) -> FeatureType;
}

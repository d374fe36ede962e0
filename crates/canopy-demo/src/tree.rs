//! A minimal trunk-and-crown tree generator used as the base of decorated
//! placements.

use canopy_voxel::{
    FeatureType, GenerationContext, Generator, Typed, UPDATE_CLIENTS, VoxelGrid, VoxelState,
    VoxelTypeRegistry,
};
use glam::IVec3;
use rand::{Rng, RngCore};
use serde::Deserialize;

/// Tree shape and materials, read from a decoration configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeParams {
    pub trunk: String,
    pub leaves: String,
    pub min_height: u32,
    pub max_height: u32,
    /// Radius of the spherical crown around the trunk top.
    pub crown_radius: i32,
}

/// Errors raised while resolving [`TreeParams`] against a registry.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("unknown voxel type: {0}")]
    UnknownVoxel(String),
    #[error("invalid height range {min}..={max}")]
    HeightRange { min: u32, max: u32 },
}

/// Places a vertical trunk topped by a sphere of leaves.
#[derive(Clone, Debug)]
pub struct SimpleTree {
    trunk: VoxelState,
    leaves: VoxelState,
    min_height: u32,
    max_height: u32,
    crown_radius: i32,
}

impl SimpleTree {
    pub fn new(params: &TreeParams, registry: &VoxelTypeRegistry) -> Result<Self, TreeError> {
        let resolve = |name: &str| {
            registry
                .default_state(name)
                .ok_or_else(|| TreeError::UnknownVoxel(name.to_string()))
        };
        if params.min_height == 0 || params.min_height > params.max_height {
            return Err(TreeError::HeightRange {
                min: params.min_height,
                max: params.max_height,
            });
        }
        Ok(Self {
            trunk: resolve(&params.trunk)?,
            leaves: resolve(&params.leaves)?,
            min_height: params.min_height,
            max_height: params.max_height,
            crown_radius: params.crown_radius.max(0),
        })
    }
}

impl Generator for SimpleTree {
    type Config = ();

    /// Fails without writing when the voxel below `origin` is not solid or
    /// `origin` itself is occupied.
    fn generate(
        &self,
        world: &mut dyn VoxelGrid,
        ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        _config: &(),
    ) -> bool {
        if !world.voxel(origin - IVec3::Y).is_solid() || !world.voxel(origin).is_air() {
            return false;
        }
        let height = rng.random_range(self.min_height..=self.max_height) as i32;
        if origin.y + height + self.crown_radius > ctx.max_y {
            return false;
        }

        for dy in 0..height {
            world.set_voxel(origin + IVec3::new(0, dy, 0), self.trunk.clone(), UPDATE_CLIENTS);
        }

        let top = origin + IVec3::new(0, height - 1, 0);
        let r = self.crown_radius;
        for x in -r..=r {
            for y in -r..=r {
                for z in -r..=r {
                    let offset = IVec3::new(x, y, z);
                    if offset.length_squared() > r * r + 1 {
                        continue;
                    }
                    let pos = top + offset;
                    if world.voxel(pos).is_air() {
                        world.set_voxel(pos, self.leaves.clone(), UPDATE_CLIENTS);
                    }
                }
            }
        }
        true
    }
}

impl Typed for SimpleTree {
    fn feature_type(&self) -> FeatureType {
        FeatureType::Tree
    }
}

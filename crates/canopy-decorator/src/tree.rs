//! Decorators for tree-like placements recorded with [`Classifier::tree`](crate::Classifier::tree).

use canopy_voxel::state::FACING;
use canopy_voxel::{Direction, UPDATE_CLIENTS, VoxelGrid, VoxelState};
use glam::IVec3;
use rand::{Rng, RngCore};

use crate::pipeline::Decorator;
use crate::recorder::RecordingEnvironment;

/// Hangs vines off the open sides of foliage.
///
/// Each horizontal face of each foliage voxel gets one draw; on success a
/// vine column grows downward through air for up to `max_length` voxels.
/// The vine state gets a `<side>=true` property naming the face it clings to.
#[derive(Clone, Debug)]
pub struct Vines {
    pub state: VoxelState,
    pub chance: f32,
    pub max_length: u32,
}

impl Decorator for Vines {
    fn apply(&self, world: &mut RecordingEnvironment<'_>, rng: &mut dyn RngCore) {
        let foliage = world.foliage().to_vec();
        for leaf in foliage {
            for dir in Direction::HORIZONTAL {
                if rng.random::<f32>() >= self.chance {
                    continue;
                }
                let vine = self.state.clone().with_property(dir.opposite().name(), "true");
                let mut pos = leaf + dir.offset();
                for _ in 0..self.max_length {
                    if !world.voxel(pos).is_air() {
                        break;
                    }
                    world.set_voxel(pos, vine.clone(), UPDATE_CLIENTS);
                    pos -= IVec3::Y;
                }
            }
        }
    }
}

/// Attaches a state to one free side of the trunk.
///
/// `height` picks the trunk voxel by its rank in ascending height order
/// (0.0 = lowest, 1.0 = highest). The attached state faces away from the
/// trunk.
#[derive(Clone, Debug)]
pub struct TrunkAttachment {
    pub state: VoxelState,
    pub chance: f32,
    pub height: f32,
}

impl Decorator for TrunkAttachment {
    fn apply(&self, world: &mut RecordingEnvironment<'_>, rng: &mut dyn RngCore) {
        if rng.random::<f32>() >= self.chance {
            return;
        }
        let trunk = world.trunk();
        let Some(last) = trunk.len().checked_sub(1) else {
            return;
        };
        let index = ((last as f32) * self.height.clamp(0.0, 1.0)).round() as usize;
        let base = trunk[index.min(last)];

        let dir = Direction::HORIZONTAL[rng.random_range(0..Direction::HORIZONTAL.len())];
        let pos = base + dir.offset();
        if world.voxel(pos).is_air() {
            let attached = self.state.clone().with_property(FACING, dir.name());
            world.set_voxel(pos, attached, UPDATE_CLIENTS);
        }
    }
}

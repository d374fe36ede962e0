//! Voxel types, states and transforms, the grid write capability, and the
//! placement traits shared by every generator in the workspace.

pub mod bounds;
pub mod feature;
pub mod grid;
pub mod registry;
pub mod state;
pub mod transform;

pub use bounds::Bounds;
pub use feature::{FeatureType, GenerationContext, Generator, Typed};
pub use grid::{SparseGrid, UPDATE_CLIENTS, UPDATE_NEIGHBORS, VoxelGrid};
pub use registry::{RegistryError, Transparency, VoxelTypeDef, VoxelTypeId, VoxelTypeRegistry};
pub use state::VoxelState;
pub use transform::{Direction, Mirror, Rotation, transform_pos};

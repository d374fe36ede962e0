//! Voxel write capability and an in-memory sparse grid implementing it.
//!
//! [`VoxelGrid`] is the seam every placement algorithm writes through. The
//! real chunk store lives outside this workspace; [`SparseGrid`] is a
//! hash-map backed stand-in with vertical limits, dirty flags and versioning.

use glam::IVec3;
use rustc_hash::FxHashMap;

use crate::state::VoxelState;

/// Write-flag bit: neighbouring voxels should be notified.
pub const UPDATE_NEIGHBORS: u8 = 0b0000_0001;
/// Write-flag bit: observers of the grid should be sent the change.
pub const UPDATE_CLIENTS: u8 = 0b0000_0010;

/// A mutable voxel grid.
pub trait VoxelGrid {
    /// Returns the state at `pos`; unknown or out-of-range cells read as air.
    fn voxel(&self, pos: IVec3) -> VoxelState;

    /// Writes `state` at `pos`. Returns `true` if the grid accepted the write
    /// and its contents changed.
    fn set_voxel(&mut self, pos: IVec3, state: VoxelState, flags: u8) -> bool;
}

/// Sparse voxel storage over an unbounded horizontal plane.
///
/// Heights outside `[min_y, max_y]` read as air and ignore writes (with a
/// warning log). Air is never stored.
#[derive(Clone, Debug)]
pub struct SparseGrid {
    voxels: FxHashMap<IVec3, VoxelState>,
    min_y: i32,
    max_y: i32,
    /// Union of the flags of every accepted write.
    dirty: u8,
    /// Incremented on each mutation.
    version: u64,
}

impl SparseGrid {
    /// Creates an empty grid limited to heights `[min_y, max_y]`.
    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            voxels: FxHashMap::default(),
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
            dirty: 0,
            version: 0,
        }
    }

    /// Fills the horizontal square `[-radius, radius]²` from `min_y` up to
    /// and including `top` with `state`.
    pub fn fill_ground(&mut self, radius: i32, top: i32, state: &VoxelState) {
        for x in -radius..=radius {
            for z in -radius..=radius {
                for y in self.min_y..=top.min(self.max_y) {
                    self.voxels.insert(IVec3::new(x, y, z), state.clone());
                }
            }
        }
        self.version += 1;
    }

    /// Number of non-air voxels stored.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates over stored (non-air) voxels in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &VoxelState)> {
        self.voxels.iter().map(|(pos, state)| (*pos, state))
    }

    pub fn dirty_flags(&self) -> u8 {
        self.dirty
    }

    /// Clears the specified dirty flag bits.
    pub fn clear_dirty(&mut self, flags: u8) {
        self.dirty &= !flags;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn in_bounds(&self, pos: IVec3) -> bool {
        pos.y >= self.min_y && pos.y <= self.max_y
    }
}

impl VoxelGrid for SparseGrid {
    fn voxel(&self, pos: IVec3) -> VoxelState {
        if !self.in_bounds(pos) {
            return VoxelState::air();
        }
        self.voxels.get(&pos).cloned().unwrap_or_else(VoxelState::air)
    }

    fn set_voxel(&mut self, pos: IVec3, state: VoxelState, flags: u8) -> bool {
        if !self.in_bounds(pos) {
            tracing::warn!(?pos, "SparseGrid::set_voxel out of bounds");
            return false;
        }
        let changed = if state.is_air() {
            self.voxels.remove(&pos).is_some()
        } else {
            self.voxels.insert(pos, state.clone()).as_ref() != Some(&state)
        };
        if changed {
            self.dirty |= flags;
            self.version += 1;
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

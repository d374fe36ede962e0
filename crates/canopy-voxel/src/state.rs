//! Voxel states: a registered voxel type plus its property values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::registry::{Transparency, VoxelTypeDef, VoxelTypeId};
use crate::transform::{Direction, Mirror, Rotation};

/// Property holding a horizontal orientation (`north`, `east`, `south`, `west`).
pub const FACING: &str = "facing";
/// Property holding a log-style axis (`x`, `y`, `z`).
pub const AXIS: &str = "axis";
/// Property holding a sixteen-step orientation (`0`..`15`, 0 = south, clockwise).
pub const ROTATION: &str = "rotation";

/// A voxel type together with its property values.
///
/// Cloning is cheap: the type definition is shared with the registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoxelState {
    id: VoxelTypeId,
    def: Arc<VoxelTypeDef>,
    properties: BTreeMap<String, String>,
}

impl VoxelState {
    pub(crate) fn new(id: VoxelTypeId, def: Arc<VoxelTypeDef>) -> Self {
        Self {
            id,
            def,
            properties: BTreeMap::new(),
        }
    }

    /// The air state.
    pub fn air() -> Self {
        Self::new(VoxelTypeId::AIR, VoxelTypeDef::shared_air())
    }

    pub fn id(&self) -> VoxelTypeId {
        self.id
    }

    pub fn def(&self) -> &VoxelTypeDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn is_air(&self) -> bool {
        self.id == VoxelTypeId::AIR
    }

    /// Returns `true` if the state fully blocks visibility.
    pub fn is_opaque(&self) -> bool {
        self.def.transparency == Transparency::Opaque
    }

    pub fn is_solid(&self) -> bool {
        self.def.solid
    }

    /// Returns `true` for plain solid cubes: solid, opaque and occupying the
    /// whole cell.
    pub fn is_full_cube(&self) -> bool {
        self.def.solid && self.def.full_cube && self.is_opaque()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.def.tags.iter().any(|t| t == tag)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns a copy of this state with `key` set to `value`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Rotates orientation properties clockwise (viewed from above).
    pub fn rotate(&self, rotation: Rotation) -> Self {
        if rotation == Rotation::None {
            return self.clone();
        }
        let mut out = self.clone();
        if let Some(facing) = self.property(FACING).and_then(Direction::from_name) {
            out = out.with_property(FACING, facing.rotate(rotation).name());
        }
        if rotation.quarter_turns() % 2 == 1 {
            match self.property(AXIS) {
                Some("x") => out = out.with_property(AXIS, "z"),
                Some("z") => out = out.with_property(AXIS, "x"),
                _ => {}
            }
        }
        if let Some(steps) = self.sixteenth_rotation() {
            let turned = (steps + 4 * rotation.quarter_turns()) % 16;
            out = out.with_property(ROTATION, turned.to_string());
        }
        out
    }

    /// Mirrors orientation properties across the given plane.
    pub fn mirror(&self, mirror: Mirror) -> Self {
        if mirror == Mirror::None {
            return self.clone();
        }
        let mut out = self.clone();
        if let Some(facing) = self.property(FACING).and_then(Direction::from_name) {
            out = out.with_property(FACING, facing.mirror(mirror).name());
        }
        if let Some(steps) = self.sixteenth_rotation() {
            let flipped = match mirror {
                // Z flip: south (0) <-> north (8).
                Mirror::LeftRight => (24 - steps) % 16,
                // X flip: west (4) <-> east (12).
                Mirror::FrontBack => (16 - steps) % 16,
                Mirror::None => steps,
            };
            out = out.with_property(ROTATION, flipped.to_string());
        }
        out
    }

    fn sixteenth_rotation(&self) -> Option<u8> {
        self.property(ROTATION)
            .and_then(|r| r.parse::<u8>().ok())
            .filter(|r| *r < 16)
    }
}

impl fmt::Display for VoxelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if !self.properties.is_empty() {
            f.write_str("[")?;
            for (i, (k, v)) in self.properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

//! Voxel type registry: maps compact [`VoxelTypeId`] values to shared [`VoxelTypeDef`] metadata.
//!
//! The registry is built once during setup, before any placement runs. Air is
//! always ID 0 so that a missing or undecodable voxel can always fall back to it.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::VoxelState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier of a registered voxel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelTypeId(pub u16);

impl VoxelTypeId {
    /// The reserved air type.
    pub const AIR: Self = Self(0);
}

/// Transparency mode for a voxel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transparency {
    /// Fully blocks light and visibility.
    Opaque,
    /// Partially transparent (e.g. leaves, glass).
    SemiTransparent,
    /// Completely transparent (e.g. air).
    FullyTransparent,
}

/// Full descriptor for a voxel type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelTypeDef {
    /// Qualified name (e.g. "oak_log", "stone").
    pub name: String,
    /// Whether the material is solid ground that fills and supports.
    pub solid: bool,
    /// Transparency mode.
    pub transparency: Transparency,
    /// Whether the geometry occupies the whole cell.
    #[serde(default = "default_full_cube")]
    pub full_cube: bool,
    /// Material tags (e.g. "logs", "leaves").
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_full_cube() -> bool {
    true
}

static AIR: LazyLock<Arc<VoxelTypeDef>> = LazyLock::new(|| Arc::new(VoxelTypeDef::air()));

impl VoxelTypeDef {
    /// The air definition registered at ID 0.
    pub fn air() -> Self {
        Self {
            name: "air".to_string(),
            solid: false,
            transparency: Transparency::FullyTransparent,
            full_cube: false,
            tags: Vec::new(),
        }
    }

    /// Convenience constructor for an opaque, solid, full-cube material.
    pub fn solid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solid: true,
            transparency: Transparency::Opaque,
            full_cube: true,
            tags: Vec::new(),
        }
    }

    /// Returns this definition with an extra tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub(crate) fn shared_air() -> Arc<VoxelTypeDef> {
        Arc::clone(&AIR)
    }
}

/// Errors that can occur during voxel type registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with the same name has already been registered.
    #[error("duplicate voxel type name: {0}")]
    DuplicateName(String),
    /// All 65 535 user-defined slots have been consumed.
    #[error("voxel type registry is full (max 65536 types)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`VoxelTypeId`] → [`VoxelTypeDef`] with O(1) lookup by index and
/// O(1) reverse lookup by name.
pub struct VoxelTypeRegistry {
    /// Dense array where `index == VoxelTypeId.0`.
    types: Vec<Arc<VoxelTypeDef>>,
    /// Reverse lookup: name → ID.
    name_to_id: HashMap<String, VoxelTypeId>,
}

impl VoxelTypeRegistry {
    /// Creates a new registry with Air pre-registered as ID 0.
    pub fn new() -> Self {
        let mut name_to_id = HashMap::new();
        name_to_id.insert("air".to_string(), VoxelTypeId::AIR);

        Self {
            types: vec![VoxelTypeDef::shared_air()],
            name_to_id,
        }
    }

    /// Builds a registry from a list of definitions, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first definition [`register`](Self::register) rejects.
    pub fn from_defs(defs: impl IntoIterator<Item = VoxelTypeDef>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Registers a new voxel type and returns its assigned ID.
    ///
    /// IDs are assigned sequentially starting from 1 (0 is Air).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a type with the same name
    /// already exists, or [`RegistryError::RegistryFull`] if all 65 536 slots
    /// are consumed.
    pub fn register(&mut self, def: VoxelTypeDef) -> Result<VoxelTypeId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.types.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = VoxelTypeId(self.types.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.types.push(Arc::new(def));
        Ok(id)
    }

    /// Returns the definition for a given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range; IDs are only produced by the registry
    /// itself.
    pub fn get(&self, id: VoxelTypeId) -> &VoxelTypeDef {
        &self.types[id.0 as usize]
    }

    /// Returns the ID for a named voxel type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<VoxelTypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the property-less state of a registered type, or `None` for
    /// unknown IDs.
    pub fn state(&self, id: VoxelTypeId) -> Option<VoxelState> {
        self.types
            .get(id.0 as usize)
            .map(|def| VoxelState::new(id, Arc::clone(def)))
    }

    /// Returns the property-less state of a named type.
    pub fn default_state(&self, name: &str) -> Option<VoxelState> {
        self.lookup_by_name(name).and_then(|id| self.state(id))
    }

    /// Returns the total number of registered types (including Air).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if only Air is registered.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }
}

impl Default for VoxelTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

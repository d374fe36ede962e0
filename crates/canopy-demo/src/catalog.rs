//! Built-in voxel types, decoration configurations and rules.

use canopy_voxel::{RegistryError, Transparency, VoxelTypeDef, VoxelTypeRegistry};
use serde_json::{Value, json};

fn foliage(name: &str) -> VoxelTypeDef {
    VoxelTypeDef {
        name: name.to_string(),
        solid: true,
        transparency: Transparency::SemiTransparent,
        full_cube: true,
        tags: vec!["leaves".to_string()],
    }
}

fn attachment(name: &str) -> VoxelTypeDef {
    VoxelTypeDef {
        name: name.to_string(),
        solid: false,
        transparency: Transparency::FullyTransparent,
        full_cube: false,
        tags: Vec::new(),
    }
}

/// The voxel types every demo placement draws from.
pub fn registry() -> Result<VoxelTypeRegistry, RegistryError> {
    VoxelTypeRegistry::from_defs([
        VoxelTypeDef::solid("stone"),
        VoxelTypeDef::solid("dirt"),
        VoxelTypeDef::solid("grass"),
        VoxelTypeDef::solid("planks"),
        VoxelTypeDef::solid("cobblestone"),
        VoxelTypeDef::solid("oak_log").with_tag("logs"),
        VoxelTypeDef::solid("birch_log").with_tag("logs"),
        VoxelTypeDef::solid("jungle_log").with_tag("logs"),
        foliage("oak_leaves"),
        foliage("birch_leaves"),
        foliage("jungle_leaves"),
        attachment("vine"),
        attachment("bee_nest"),
        attachment("cocoa"),
    ])
}

/// Serialized tree configurations, as a world generator would hand them over.
///
/// Each entry is also the [`TreeParams`](crate::tree::TreeParams) of the
/// tree built for it.
pub fn decorations() -> Vec<Value> {
    vec![
        json!({
            "name": "oak",
            "biome": "forest",
            "trunk": "oak_log",
            "leaves": "oak_leaves",
            "min_height": 4,
            "max_height": 6,
            "crown_radius": 2
        }),
        json!({
            "name": "birch",
            "biome": "meadow",
            "trunk": "birch_log",
            "leaves": "birch_leaves",
            "min_height": 5,
            "max_height": 7,
            "crown_radius": 2
        }),
        json!({
            "name": "jungle",
            "biome": "jungle",
            "trunk": "jungle_log",
            "leaves": "jungle_leaves",
            "min_height": 7,
            "max_height": 10,
            "crown_radius": 3,
            "tags": ["tall", "humid"]
        }),
    ]
}

/// Rules used when no rule file is configured.
pub fn default_rules() -> Value {
    json!([
        {
            "name": "humid_jungle",
            "match": [["jungle_leaves", "humid"]],
            "decorators": [
                {"type": "vines", "state": "vine", "chance": 0.3, "max_length": 5},
                {"type": "trunk_attachment", "state": "cocoa", "chance": 0.5, "height": 0.3}
            ]
        },
        {
            "name": "meadow_bees",
            "match": ["meadow", ["oak_log", "forest"]],
            "decorators": [
                {"type": "trunk_attachment", "state": "bee_nest", "chance": 0.25, "height": 0.7}
            ]
        }
    ])
}

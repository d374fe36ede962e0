use serde::{Deserialize, Serialize};

/// Per-placement template settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Write the template's air cells too, carving out whatever was there.
    pub paste_air: bool,
    /// Allow template cells to overwrite opaque voxels.
    pub replace_solid: bool,
    /// Maximum number of voxels filled beneath each footing column.
    pub base_depth: u32,
}

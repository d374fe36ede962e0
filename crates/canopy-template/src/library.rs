//! Named templates loaded from a RON manifest.
//!
//! ```ron
//! [
//!     (name: "hut", file: "hut.nbt"),
//!     (name: "well", file: "well.nbt", feature_type: generic, config: Some((base_depth: 4))),
//! ]
//! ```
//!
//! Entries without a `config` use the library defaults. Entries naming the
//! same file and feature type share one loaded template.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use canopy_voxel::{FeatureType, GenerationContext, Generator, Typed, VoxelGrid, VoxelTypeRegistry};
use glam::IVec3;
use rand::RngCore;
use serde::Deserialize;

use crate::config::TemplateConfig;
use crate::error::LibraryError;
use crate::template::StructureTemplate;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    file: PathBuf,
    #[serde(default)]
    feature_type: FeatureType,
    #[serde(default)]
    config: Option<TemplateConfig>,
}

/// A template bound to the settings it is placed with. The feature type is
/// the template's own.
#[derive(Clone, Debug)]
pub struct TemplateFeature {
    pub template: Arc<StructureTemplate>,
    pub config: TemplateConfig,
}

impl Generator for TemplateFeature {
    type Config = ();

    fn generate(
        &self,
        world: &mut dyn VoxelGrid,
        _ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        _config: &(),
    ) -> bool {
        self.template.place(world, rng, origin, &self.config)
    }
}

impl Typed for TemplateFeature {
    fn feature_type(&self) -> FeatureType {
        self.template.feature_type()
    }
}

/// Templates indexed by name.
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    features: HashMap<String, Arc<TemplateFeature>>,
}

impl TemplateLibrary {
    /// Reads `dir/manifest` and loads every template it lists.
    ///
    /// Entries whose file is missing or fails to decode are logged and
    /// skipped. Only manifest read and parse failures are errors.
    pub fn load(
        dir: &Path,
        manifest: &str,
        registry: &VoxelTypeRegistry,
        defaults: TemplateConfig,
    ) -> Result<Self, LibraryError> {
        let manifest_path = dir.join(manifest);
        let contents = std::fs::read_to_string(&manifest_path).map_err(LibraryError::Read)?;
        let entries: Vec<ManifestEntry> = ron::from_str(&contents).map_err(LibraryError::Parse)?;

        let mut loaded: HashMap<(PathBuf, FeatureType), Arc<StructureTemplate>> = HashMap::new();
        let mut features = HashMap::with_capacity(entries.len());
        for entry in entries {
            let key = (dir.join(&entry.file), entry.feature_type);
            let template = match loaded.get(&key) {
                Some(template) => Arc::clone(template),
                None => match load_file(&key.0, registry) {
                    Some(template) => {
                        let template = Arc::new(template.with_feature_type(entry.feature_type));
                        loaded.insert(key, Arc::clone(&template));
                        template
                    }
                    None => {
                        tracing::warn!(name = %entry.name, file = %key.0.display(), "skipping template");
                        continue;
                    }
                },
            };

            let feature = TemplateFeature {
                template,
                config: entry.config.unwrap_or(defaults),
            };
            if features.insert(entry.name.clone(), Arc::new(feature)).is_some() {
                tracing::warn!(name = %entry.name, "duplicate template name, keeping the last entry");
            }
        }

        tracing::info!(
            count = features.len(),
            templates = loaded.len(),
            manifest = %manifest_path.display(),
            "template library loaded"
        );
        Ok(Self { features })
    }

    pub fn get(&self, name: &str) -> Option<Arc<TemplateFeature>> {
        self.features.get(name).cloned()
    }

    /// Template names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.features.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn load_file(path: &Path, registry: &VoxelTypeRegistry) -> Option<StructureTemplate> {
    match File::open(path) {
        Ok(file) => StructureTemplate::load(BufReader::new(file), registry),
        Err(err) => {
            tracing::debug!(file = %path.display(), %err, "cannot open template");
            None
        }
    }
}

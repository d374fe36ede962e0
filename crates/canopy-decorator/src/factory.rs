//! Builds decorator lists from JSON configuration.
//!
//! ```json
//! [
//!   { "type": "vines", "state": "vine", "chance": 0.25, "max_length": 4 },
//!   { "type": "trunk_attachment", "state": "bee_nest", "chance": 0.05, "height": 0.6 }
//! ]
//! ```

use canopy_voxel::{Generator, Typed, VoxelState, VoxelTypeRegistry};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::pipeline::{DecoratedGenerator, Decorator};
use crate::recorder::Classifier;
use crate::tree::{TrunkAttachment, Vines};

/// Errors raised while building a single decorator from configuration.
#[derive(Debug, Error)]
pub enum DecoratorConfigError {
    /// The entry does not describe a known decorator.
    #[error("invalid decorator entry: {0}")]
    Invalid(#[from] serde_json::Error),
    /// The entry names a voxel type the registry does not know.
    #[error("unknown voxel type: {0}")]
    UnknownVoxel(String),
    /// A probability outside `[0, 1]`.
    #[error("chance must be within [0, 1], got {0}")]
    InvalidChance(f32),
}

/// One decorator entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecoratorConfig {
    Vines {
        state: String,
        #[serde(default = "default_vine_chance")]
        chance: f32,
        #[serde(default = "default_vine_length")]
        max_length: u32,
    },
    TrunkAttachment {
        state: String,
        chance: f32,
        #[serde(default = "default_attachment_height")]
        height: f32,
    },
}

fn default_vine_chance() -> f32 {
    0.25
}

fn default_vine_length() -> u32 {
    4
}

fn default_attachment_height() -> f32 {
    0.5
}

impl DecoratorConfig {
    /// Resolves voxel names and builds the decorator.
    pub fn build(&self, registry: &VoxelTypeRegistry) -> Result<Box<dyn Decorator>, DecoratorConfigError> {
        match self {
            DecoratorConfig::Vines {
                state,
                chance,
                max_length,
            } => Ok(Box::new(Vines {
                state: resolve(registry, state)?,
                chance: check_chance(*chance)?,
                max_length: *max_length,
            })),
            DecoratorConfig::TrunkAttachment {
                state,
                chance,
                height,
            } => Ok(Box::new(TrunkAttachment {
                state: resolve(registry, state)?,
                chance: check_chance(*chance)?,
                height: *height,
            })),
        }
    }
}

fn resolve(registry: &VoxelTypeRegistry, name: &str) -> Result<VoxelState, DecoratorConfigError> {
    registry
        .default_state(name)
        .ok_or_else(|| DecoratorConfigError::UnknownVoxel(name.to_string()))
}

fn check_chance(chance: f32) -> Result<f32, DecoratorConfigError> {
    if (0.0..=1.0).contains(&chance) {
        Ok(chance)
    } else {
        Err(DecoratorConfigError::InvalidChance(chance))
    }
}

/// An ordered list of decorators ready to wrap a generator.
pub struct DecoratorSet {
    decorators: Vec<Box<dyn Decorator>>,
}

impl DecoratorSet {
    pub fn new(decorators: Vec<Box<dyn Decorator>>) -> Self {
        Self { decorators }
    }

    /// Parses a decorator list (or a single entry).
    ///
    /// Entries that fail to parse or resolve are logged and skipped. Returns
    /// `None` when nothing usable remains, in which case the generator should
    /// be used undecorated.
    pub fn from_config(config: &Value, registry: &VoxelTypeRegistry) -> Option<Self> {
        let entries: &[Value] = match config {
            Value::Array(entries) => entries,
            Value::Object(_) => std::slice::from_ref(config),
            _ => return None,
        };

        let mut decorators = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let built = DecoratorConfig::deserialize(entry)
                .map_err(DecoratorConfigError::from)
                .and_then(|cfg| cfg.build(registry));
            match built {
                Ok(decorator) => decorators.push(decorator),
                Err(err) => tracing::warn!(index, %err, "skipping decorator"),
            }
        }

        if decorators.is_empty() {
            None
        } else {
            Some(Self::new(decorators))
        }
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Wraps `generator`, recording trunk and foliage writes.
    pub fn decorate<G: Generator + Typed>(self, generator: G) -> DecoratedGenerator<G> {
        DecoratedGenerator::new(generator, self.decorators, Classifier::tree())
    }
}

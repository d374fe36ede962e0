//! Decoration rules: which decorators apply to which configurations.
//!
//! ```json
//! [
//!   { "name": "bees", "match": ["meadow", ["oak_log", "forest"]],
//!     "decorators": [{ "type": "trunk_attachment", "state": "bee_nest", "chance": 0.25 }] }
//! ]
//! ```
//!
//! A rule without `match` applies to every configuration. The first matching
//! rule wins.

use std::path::Path;

use canopy_decorator::DecoratorSet;
use canopy_matcher::Matcher;
use canopy_voxel::VoxelTypeRegistry;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rule file: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse rule file: {0}")]
    Parse(#[source] serde_json::Error),
}

#[derive(Deserialize)]
struct RawRule {
    name: String,
    #[serde(default, rename = "match")]
    matcher: Option<Value>,
    #[serde(default)]
    decorators: Value,
}

/// A named matcher and the decorator configuration it selects.
#[derive(Debug)]
pub struct DecorationRule {
    pub name: String,
    pub matcher: Matcher,
    decorators: Value,
}

impl DecorationRule {
    /// Builds a fresh decorator set, or `None` if none of the entries are usable.
    pub fn decorators(&self, registry: &VoxelTypeRegistry) -> Option<DecoratorSet> {
        DecoratorSet::from_config(&self.decorators, registry)
    }
}

/// Ordered decoration rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<DecorationRule>,
}

impl RuleSet {
    /// Reads a JSON rule file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path).map_err(RulesError::Read)?;
        let value: Value = serde_json::from_str(&contents).map_err(RulesError::Parse)?;
        Ok(Self::from_json(&value))
    }

    /// Parses a rule list. Entries that are not rule objects are logged and skipped.
    pub fn from_json(value: &Value) -> Self {
        let Value::Array(entries) = value else {
            tracing::warn!("rule set is not a list");
            return Self::default();
        };

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match RawRule::deserialize(entry) {
                Ok(raw) => {
                    let matcher = raw
                        .matcher
                        .as_ref()
                        .and_then(Matcher::from_config)
                        .unwrap_or_default();
                    tracing::debug!(name = %raw.name, %matcher, "rule loaded");
                    rules.push(DecorationRule {
                        name: raw.name,
                        matcher,
                        decorators: raw.decorators,
                    });
                }
                Err(err) => tracing::warn!(index, %err, "skipping rule"),
            }
        }
        Self { rules }
    }

    /// The first rule whose matcher accepts `config`.
    pub fn select(&self, config: &Value) -> Option<&DecorationRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(config))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

//! Declarative selection of decorations by their serialized configuration.
//!
//! Configuration trees are `serde_json::Value`s. See [`Matcher`] for the
//! evaluation rules.

mod matcher;
mod value;

pub use matcher::{Matcher, MatcherBuilder, Rule};
pub use value::{Named, RuleValue};

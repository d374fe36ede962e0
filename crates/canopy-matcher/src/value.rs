//! Primitive literals that rules compare configuration leaves against.

use std::fmt;

use canopy_voxel::{VoxelState, VoxelTypeDef};
use serde_json::{Number, Value};

/// A registered entity that is matched by its qualified name.
pub trait Named {
    fn qualified_name(&self) -> String;
}

impl Named for VoxelTypeDef {
    fn qualified_name(&self) -> String {
        self.name.clone()
    }
}

impl Named for VoxelState {
    fn qualified_name(&self) -> String {
        self.name().to_string()
    }
}

/// A primitive configuration value: string, number, boolean or null.
///
/// Anything that cannot be represented as one of those (non-finite floats,
/// `None`) becomes null, which only matches an explicit null leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleValue(Value);

impl RuleValue {
    pub fn null() -> Self {
        Self(Value::Null)
    }

    /// Uses the entity's qualified name as the comparable value.
    pub fn named(entity: &impl Named) -> Self {
        Self(Value::String(entity.qualified_name()))
    }

    /// Wraps a configuration leaf. Returns `None` for objects and arrays.
    pub fn from_leaf(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => None,
            leaf => Some(Self(leaf.clone())),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Compares against a configuration leaf.
    ///
    /// Numbers compare numerically; values of different kinds never match.
    pub fn matches(&self, leaf: &Value) -> bool {
        match (&self.0, leaf) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleValue {
    fn from(v: &str) -> Self {
        Self(Value::String(v.to_string()))
    }
}

impl From<String> for RuleValue {
    fn from(v: String) -> Self {
        Self(Value::String(v))
    }
}

impl From<bool> for RuleValue {
    fn from(v: bool) -> Self {
        Self(Value::Bool(v))
    }
}

macro_rules! integer_rule_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RuleValue {
                fn from(v: $t) -> Self {
                    Self(Value::Number(Number::from(v)))
                }
            }
        )*
    };
}

integer_rule_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for RuleValue {
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or_else(Self::null, |n| Self(Value::Number(n)))
    }
}

impl From<f32> for RuleValue {
    fn from(v: f32) -> Self {
        Self::from(f64::from(v))
    }
}

impl<T: Into<RuleValue>> From<Option<T>> for RuleValue {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Self::null, Into::into)
    }
}

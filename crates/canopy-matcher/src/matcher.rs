//! Boolean rule expressions over configuration trees.
//!
//! A [`Matcher`] is an OR of [`Rule`]s; a rule is an AND of primitive values.
//! A rule is satisfied when every one of its values equals some primitive leaf
//! of the tree. The leaves need not be the same one, nor share a parent: the
//! whole tree is one search space.

use std::fmt;

use serde_json::Value;

use crate::value::RuleValue;

/// Primitive values that must all be present somewhere in a tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    values: Vec<RuleValue>,
}

impl Rule {
    pub(crate) fn new(values: Vec<RuleValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[RuleValue] {
        &self.values
    }
}

/// An OR of AND rules. The empty matcher matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matcher {
    rules: Vec<Rule>,
}

impl Matcher {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The matcher that accepts every tree.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches trees containing `value`.
    pub fn of(value: impl Into<RuleValue>) -> Self {
        Self::builder().and(value).build()
    }

    /// Matches trees containing all of `values`.
    pub fn and<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RuleValue>,
    {
        values
            .into_iter()
            .fold(Self::builder(), |builder, value| builder.and(value))
            .build()
    }

    /// Matches trees containing any of `values`.
    pub fn or<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RuleValue>,
    {
        values
            .into_iter()
            .fold(Self::builder(), |builder, value| builder.or(value))
            .build()
    }

    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::default()
    }

    /// Parses rule definitions from configuration.
    ///
    /// A primitive is a single-value rule. An array lists OR-ed rules, each
    /// element being a primitive or an array of primitives AND-ed together.
    /// Objects and nested containers inside an AND list are ignored. Returns
    /// `None` when no rule survives.
    pub fn from_config(config: &Value) -> Option<Self> {
        let mut builder = Self::builder();
        match config {
            Value::Array(alternatives) => {
                for alternative in alternatives {
                    builder = builder.new_rule();
                    match alternative {
                        Value::Array(values) => {
                            for value in values {
                                match RuleValue::from_leaf(value) {
                                    Some(v) => builder = builder.and(v),
                                    None => tracing::debug!(%value, "ignoring non-primitive rule value"),
                                }
                            }
                        }
                        other => match RuleValue::from_leaf(other) {
                            Some(v) => builder = builder.and(v),
                            None => tracing::debug!(value = %other, "ignoring non-primitive rule"),
                        },
                    }
                }
            }
            other => {
                if let Some(v) = RuleValue::from_leaf(other) {
                    builder = builder.and(v);
                }
            }
        }

        let matcher = builder.build();
        if matcher.is_any() { None } else { Some(matcher) }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns `true` if this matcher accepts every tree.
    pub fn is_any(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tests `node` against the rules.
    pub fn matches(&self, node: &Value) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        Search::new(&self.rules).visit(node)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() {
            return f.write_str("Matcher{any}");
        }
        f.write_str("Matcher{")?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str("[")?;
            for (j, value) in rule.values.iter().enumerate() {
                if j > 0 {
                    f.write_str(" & ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

/// Traversal state: which values of each rule have been seen so far.
struct Search<'a> {
    rules: &'a [Rule],
    found: Vec<Vec<bool>>,
}

impl<'a> Search<'a> {
    fn new(rules: &'a [Rule]) -> Self {
        let found = rules.iter().map(|r| vec![false; r.values.len()]).collect();
        Self { rules, found }
    }

    /// Visits every primitive leaf; returns `true` at the first leaf that
    /// completes a rule.
    fn visit(&mut self, node: &Value) -> bool {
        match node {
            Value::Object(map) => map.values().any(|child| self.visit(child)),
            Value::Array(items) => items.iter().any(|child| self.visit(child)),
            leaf => self.test(leaf),
        }
    }

    fn test(&mut self, leaf: &Value) -> bool {
        for (rule, found) in self.rules.iter().zip(self.found.iter_mut()) {
            for (value, seen) in rule.values.iter().zip(found.iter_mut()) {
                if !*seen && value.matches(leaf) {
                    *seen = true;
                }
            }
            if found.iter().all(|seen| *seen) {
                return true;
            }
        }
        false
    }
}

/// Incremental construction: values are AND-ed into the current rule until a
/// new rule is started.
#[derive(Clone, Debug, Default)]
pub struct MatcherBuilder {
    rules: Vec<Rule>,
    values: Vec<RuleValue>,
}

impl MatcherBuilder {
    /// ANDs `value` into the current rule.
    pub fn and(mut self, value: impl Into<RuleValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Starts a new OR-ed rule containing `value`.
    pub fn or(self, value: impl Into<RuleValue>) -> Self {
        self.new_rule().and(value)
    }

    /// Closes the current rule. Does nothing if it is empty.
    pub fn new_rule(mut self) -> Self {
        if !self.values.is_empty() {
            let values = std::mem::take(&mut self.values);
            self.rules.push(Rule::new(values));
        }
        self
    }

    /// Finalises the matcher. With no values this is [`Matcher::any`].
    pub fn build(self) -> Matcher {
        let built = self.new_rule();
        Matcher::new(built.rules)
    }
}

//! # Rule Bundles and Rule Trees
//!
//! A [`RuleBundle`] is everything compiled for one property; a [`RuleTree`]
//! maps property keys to bundles.
//!
//! ## Invariants
//!
//! - A bundle carries exactly one type entry: `schemaType` or `schemaTypes`.
//!   [`TypeCheck`] makes "both" and "neither" unrepresentable.
//! - A bundle carries at most one numeric range entry: `schemaBetween`,
//!   `schemaMinimum`, or `schemaMaximum`. [`RangeCheck`] enforces this.
//! - Bundles are assembled by a crate-private builder and never change once
//!   returned.

use std::collections::BTreeMap;

use ruletree_core::{RuleName, EACH_KEY};
use serde_json::{Map, Value};

use crate::validator::Validator;

/// The type entry of a bundle.
#[derive(Debug, Clone)]
pub enum TypeCheck<V> {
    /// `schemaType`
    Single(V),
    /// `schemaTypes`
    Union(V),
}

impl<V> TypeCheck<V> {
    pub fn name(&self) -> RuleName {
        match self {
            Self::Single(_) => RuleName::SchemaType,
            Self::Union(_) => RuleName::SchemaTypes,
        }
    }

    pub fn validator(&self) -> &V {
        match self {
            Self::Single(v) | Self::Union(v) => v,
        }
    }
}

/// The numeric range entry of a bundle.
#[derive(Debug, Clone)]
pub enum RangeCheck<V> {
    /// `schemaBetween`: both bounds declared.
    Between(V),
    /// `schemaMinimum`: only the lower bound declared.
    Minimum(V),
    /// `schemaMaximum`: only the upper bound declared.
    Maximum(V),
}

impl<V> RangeCheck<V> {
    pub fn name(&self) -> RuleName {
        match self {
            Self::Between(_) => RuleName::SchemaBetween,
            Self::Minimum(_) => RuleName::SchemaMinimum,
            Self::Maximum(_) => RuleName::SchemaMaximum,
        }
    }

    pub fn validator(&self) -> &V {
        match self {
            Self::Between(v) | Self::Minimum(v) | Self::Maximum(v) => v,
        }
    }
}

/// Compiled rules for a single property.
#[derive(Debug, Clone)]
pub struct RuleBundle<V> {
    type_check: TypeCheck<V>,
    range: Option<RangeCheck<V>>,
    rules: BTreeMap<RuleName, V>,
    properties: Option<RuleTree<V>>,
    each: Option<RuleTree<V>>,
}

impl<V> RuleBundle<V> {
    pub fn type_check(&self) -> &TypeCheck<V> {
        &self.type_check
    }

    pub fn range(&self) -> Option<&RangeCheck<V>> {
        self.range.as_ref()
    }

    /// Look up any rule by name, type and range entries included.
    pub fn get(&self, name: RuleName) -> Option<&V> {
        if self.type_check.name() == name {
            return Some(self.type_check.validator());
        }
        if let Some(range) = &self.range {
            if range.name() == name {
                return Some(range.validator());
            }
        }
        self.rules.get(&name)
    }

    pub fn contains(&self, name: RuleName) -> bool {
        self.get(name).is_some()
    }

    /// Names of every attached rule, in [`RuleName`] order.
    pub fn rule_names(&self) -> Vec<RuleName> {
        let mut names: Vec<RuleName> = std::iter::once(self.type_check.name())
            .chain(self.range.as_ref().map(RangeCheck::name))
            .chain(self.rules.keys().copied())
            .collect();
        names.sort();
        names
    }

    /// Iterate `(name, validator)` pairs in [`RuleName`] order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleName, &V)> {
        self.rule_names()
            .into_iter()
            .filter_map(move |name| self.get(name).map(|v| (name, v)))
    }

    /// Nested rules of an object property.
    pub fn properties(&self) -> Option<&RuleTree<V>> {
        self.properties.as_ref()
    }

    /// Per-element rules of an array of objects (the `$each` tree).
    pub fn each(&self) -> Option<&RuleTree<V>> {
        self.each.as_ref()
    }
}

impl<V: Validator> RuleBundle<V> {
    /// Render the bundle as JSON: nested property keys, then rule names,
    /// then `$each`. A rule name shadows a nested property of the same name.
    pub fn describe(&self) -> Value {
        let mut out = Map::new();
        if let Some(properties) = &self.properties {
            for (key, bundle) in properties.iter() {
                out.insert(key.clone(), bundle.describe());
            }
        }
        for (name, validator) in self.rules() {
            // `Constraint` holds only string-keyed maps and finite numbers, so
            // serialization cannot fail.
            let description = serde_json::to_value(validator.describe()).unwrap_or(Value::Null);
            out.insert(name.as_str().to_string(), description);
        }
        if let Some(each) = &self.each {
            out.insert(EACH_KEY.to_string(), each.describe());
        }
        Value::Object(out)
    }
}

/// Accumulates a bundle; [`build`](RuleBundleBuilder::build) hands out the
/// finished, immutable value.
#[derive(Debug)]
pub(crate) struct RuleBundleBuilder<V> {
    type_check: TypeCheck<V>,
    range: Option<RangeCheck<V>>,
    rules: BTreeMap<RuleName, V>,
    properties: Option<RuleTree<V>>,
    each: Option<RuleTree<V>>,
}

impl<V> RuleBundleBuilder<V> {
    pub(crate) fn new(type_check: TypeCheck<V>) -> Self {
        Self {
            type_check,
            range: None,
            rules: BTreeMap::new(),
            properties: None,
            each: None,
        }
    }

    /// Attach a rule other than the type and range entries.
    pub(crate) fn insert(&mut self, name: RuleName, validator: V) {
        debug_assert!(
            !matches!(
                name,
                RuleName::SchemaType
                    | RuleName::SchemaTypes
                    | RuleName::SchemaBetween
                    | RuleName::SchemaMinimum
                    | RuleName::SchemaMaximum
            ),
            "{name} has a dedicated slot"
        );
        self.rules.insert(name, validator);
    }

    pub(crate) fn range(&mut self, range: RangeCheck<V>) {
        self.range = Some(range);
    }

    pub(crate) fn properties(&mut self, tree: RuleTree<V>) {
        self.properties = Some(tree);
    }

    pub(crate) fn each(&mut self, tree: RuleTree<V>) {
        self.each = Some(tree);
    }

    pub(crate) fn build(self) -> RuleBundle<V> {
        RuleBundle {
            type_check: self.type_check,
            range: self.range,
            rules: self.rules,
            properties: self.properties,
            each: self.each,
        }
    }
}

/// Compiled rules keyed by property name.
#[derive(Debug, Clone)]
pub struct RuleTree<V> {
    bundles: BTreeMap<String, RuleBundle<V>>,
}

impl<V> RuleTree<V> {
    pub fn get(&self, key: &str) -> Option<&RuleBundle<V>> {
        self.bundles.get(key)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Property keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleBundle<V>)> {
        self.bundles.iter()
    }
}

impl<V: Validator> RuleTree<V> {
    /// Render the whole tree as JSON, one member per property.
    pub fn describe(&self) -> Value {
        Value::Object(
            self.bundles
                .iter()
                .map(|(key, bundle)| (key.clone(), bundle.describe()))
                .collect(),
        )
    }
}

impl<V> FromIterator<(String, RuleBundle<V>)> for RuleTree<V> {
    fn from_iter<I: IntoIterator<Item = (String, RuleBundle<V>)>>(iter: I) -> Self {
        Self {
            bundles: iter.into_iter().collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a RuleTree<V> {
    type Item = (&'a String, &'a RuleBundle<V>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, RuleBundle<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.iter()
    }
}

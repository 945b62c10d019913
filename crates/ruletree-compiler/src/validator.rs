//! # Validator Seam
//!
//! The compiler never inspects or runs the validators it attaches. It only
//! asks a [`ValidatorFactory`] to build one per applicable constraint and
//! stores the result. The factory trait mirrors the collaborator contract:
//! one constructor per leaf check, each taking the property's schema
//! fragment plus the bound constraint values.
//!
//! ## Extensibility
//!
//! [`BuiltinValidators`](crate::BuiltinValidators) is the default factory.
//! Callers with their own validator representation implement
//! [`ValidatorFactory`] and hand it to
//! [`RuleCompiler::with_factory`](crate::RuleCompiler::with_factory).

use std::fmt;

use fancy_regex::Regex;
use ruletree_core::{Schema, TypeName};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::items::ItemRules;

/// A compiled, pre-bound check.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Describe the constraint this validator is bound to.
    fn describe(&self) -> Constraint;
}

/// Serializable description of a bound constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Constraint {
    /// Value must have the given type. `None` when the schema declares no type.
    Type { expected: Option<TypeName> },
    /// Value must satisfy at least one of the alternatives.
    AnyOf { alternatives: Vec<Constraint> },
    Required,
    /// Length or element count must be at least `limit`.
    MinLength { limit: u64 },
    /// Length or element count must be at most `limit`.
    MaxLength { limit: u64 },
    Minimum { limit: Number },
    Maximum { limit: Number },
    /// Inclusive range.
    Between { minimum: Number, maximum: Number },
    Pattern { source: String },
    Enum { values: Vec<Value> },
    Const { value: Value },
    UniqueItems,
    /// Every element must satisfy the rules compiled from `items`.
    Items { items: Schema },
}

/// Constructors for every leaf check the compiler can attach.
///
/// Each constructor receives the schema fragment of the property being
/// compiled. `minItems`/`maxItems` are built through [`min_length`] and
/// [`max_length`]: both express a count bound.
///
/// [`min_length`]: ValidatorFactory::min_length
/// [`max_length`]: ValidatorFactory::max_length
pub trait ValidatorFactory: Send + Sync + Sized + 'static {
    type Output: Validator;

    fn type_match(&self, schema: &Schema, expected: Option<&TypeName>) -> Self::Output;

    /// Combine per-member type checks into "matches at least one".
    fn type_union(&self, schema: &Schema, members: Vec<Self::Output>) -> Self::Output;

    fn required(&self, schema: &Schema) -> Self::Output;

    fn min_length(&self, schema: &Schema, limit: u64) -> Self::Output;

    fn max_length(&self, schema: &Schema, limit: u64) -> Self::Output;

    fn minimum(&self, schema: &Schema, limit: &Number) -> Self::Output;

    fn maximum(&self, schema: &Schema, limit: &Number) -> Self::Output;

    fn between(&self, schema: &Schema, minimum: &Number, maximum: &Number) -> Self::Output;

    /// Receives the already compiled expression.
    fn pattern(&self, schema: &Schema, regex: Regex) -> Self::Output;

    /// Membership in the `enum` value list.
    fn one_of(&self, schema: &Schema, values: &[Value]) -> Self::Output;

    /// Equality with the `const` value.
    fn equal(&self, schema: &Schema, value: &Value) -> Self::Output;

    fn unique_items(&self, schema: &Schema) -> Self::Output;

    /// Per-element check for arrays. `rules` compiles the item schema on
    /// demand, when the validator is eventually run.
    fn items(&self, schema: &Schema, rules: ItemRules<Self>) -> Self::Output;
}

//! # ruletree-compiler — Schema to Rule Tree Compilation
//!
//! Compiles a [`Schema`](ruletree_core::Schema) into a tree of named,
//! independently invocable validation rules: for every declared property a
//! [`RuleBundle`] holding a type check plus whichever length, range,
//! pattern, enumeration, constant, uniqueness, and item checks apply, with
//! nested bundles for object properties and arrays of objects.
//!
//! ## Entry Points
//!
//! - [`compile_rule_tree`] / [`compile_property_rule`] — compile with the
//!   [`BuiltinValidators`] factory and default [`CompileOptions`].
//! - [`RuleCompiler`] — the same operations over any [`ValidatorFactory`],
//!   with configurable options.
//!
//! ## Example
//!
//! ```
//! use ruletree_compiler::compile_rule_tree;
//! use ruletree_core::{RuleName, Schema};
//!
//! let schema = Schema::object()
//!     .with_property("age", Schema::of_type("integer").with_minimum(0).with_maximum(120))
//!     .require("age");
//!
//! let tree = compile_rule_tree(&schema).unwrap();
//! let age = tree.get("age").unwrap();
//! assert!(age.contains(RuleName::SchemaBetween));
//! assert!(!age.contains(RuleName::SchemaMinimum));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `ruletree-core` internally.
//! - Compilation is synchronous and stateless; the only failures are
//!   [`CompileError::InvalidPattern`] and [`CompileError::SchemaTooDeep`].
//! - Libraries log through `tracing` and never install a subscriber.

pub mod builtin;
pub mod bundle;
pub mod compiler;
pub mod error;
pub mod items;
pub mod options;
pub mod validator;

pub use builtin::{BuiltinValidators, Rule};
pub use bundle::{RangeCheck, RuleBundle, RuleTree, TypeCheck};
pub use compiler::RuleCompiler;
pub use error::{CompileError, OptionsError};
pub use items::ItemRules;
pub use options::{CompileOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_ENV};
pub use validator::{Constraint, Validator, ValidatorFactory};

use ruletree_core::Schema;

/// Compile `schema.properties` with the builtin validators.
///
/// # Errors
///
/// See [`RuleCompiler::compile_rule_tree`].
pub fn compile_rule_tree(schema: &Schema) -> Result<RuleTree<Rule>, CompileError> {
    RuleCompiler::new().compile_rule_tree(schema)
}

/// Compile one property of `parent` with the builtin validators.
///
/// # Errors
///
/// See [`RuleCompiler::compile_property_rule`].
pub fn compile_property_rule(
    parent: &Schema,
    property: &Schema,
    key: &str,
) -> Result<RuleBundle<Rule>, CompileError> {
    RuleCompiler::new().compile_property_rule(parent, property, key)
}

//! # Rule Compiler
//!
//! Walks a schema and decides, for every declared property, which checks
//! apply. Two mutually recursive entry points:
//!
//! - [`RuleCompiler::compile_rule_tree`] iterates a schema's `properties`
//!   and compiles each one.
//! - [`RuleCompiler::compile_property_rule`] compiles one property in the
//!   context of its parent (the parent owns `required`).
//!
//! ## Decision Policy
//!
//! 1. An `"object"` property compiles to its nested rule tree plus a
//!    `schemaType` entry. Scalar constraints on it are ignored.
//! 2. A union `type` yields `schemaTypes`; anything else yields `schemaType`.
//! 3. `schemaRequired` when the parent lists the key as required.
//! 4. Length and count bounds, each independently.
//! 5. Numeric range: `schemaBetween` when both bounds are declared, else the
//!    single bound that is.
//! 6. `pattern` is compiled here with a backtracking engine, so ECMA-262
//!    look-around and backreferences are accepted. A malformed expression
//!    aborts the whole compile with `CompileError::InvalidPattern`.
//! 7. `enum`, `const`, and `uniqueItems` on presence alone.
//! 8. An `"array"` with `items` gets `schemaItems`, plus a `$each` tree when
//!    the item schema is an object.

use std::sync::Arc;

use fancy_regex::Regex;
use ruletree_core::{PropertyPath, RuleName, Schema, Shape, TypeName};

use crate::builtin::BuiltinValidators;
use crate::bundle::{RangeCheck, RuleBundle, RuleBundleBuilder, RuleTree, TypeCheck};
use crate::error::CompileError;
use crate::items::ItemRules;
use crate::options::CompileOptions;
use crate::validator::ValidatorFactory;

/// Compiles schemas into rule trees using a [`ValidatorFactory`].
///
/// Holds no per-compile state: each call is a pure function of its
/// arguments, and one compiler may be shared across threads.
pub struct RuleCompiler<F: ValidatorFactory = BuiltinValidators> {
    factory: Arc<F>,
    options: CompileOptions,
}

impl RuleCompiler<BuiltinValidators> {
    /// A compiler producing [`Rule`](crate::Rule)s with default options.
    pub fn new() -> Self {
        Self::with_factory(BuiltinValidators)
    }
}

impl Default for RuleCompiler<BuiltinValidators> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ValidatorFactory> RuleCompiler<F> {
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile every entry of `schema.properties` into a rule tree.
    ///
    /// A schema without properties yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns the first `CompileError` raised by any property; no partial
    /// tree is returned.
    pub fn compile_rule_tree(
        &self,
        schema: &Schema,
    ) -> Result<RuleTree<F::Output>, CompileError> {
        let tree = self.build_tree(schema, &PropertyPath::root(), 0)?;
        tracing::debug!(properties = tree.len(), "compiled rule tree");
        Ok(tree)
    }

    /// Compile a single property of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::InvalidPattern` if the property (or anything
    /// nested in it) declares a malformed `pattern`, and
    /// `CompileError::SchemaTooDeep` past the configured nesting limit.
    pub fn compile_property_rule(
        &self,
        parent: &Schema,
        property: &Schema,
        key: &str,
    ) -> Result<RuleBundle<F::Output>, CompileError> {
        self.compile_property_at(parent, property, key, PropertyPath::root().child(key), 1)
    }

    fn build_tree(
        &self,
        schema: &Schema,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<RuleTree<F::Output>, CompileError> {
        schema
            .properties
            .iter()
            .map(|(key, property)| {
                let bundle =
                    self.compile_property_at(schema, property, key, path.child(key), depth + 1)?;
                Ok((key.clone(), bundle))
            })
            .collect()
    }

    pub(crate) fn compile_property_at(
        &self,
        parent: &Schema,
        property: &Schema,
        key: &str,
        path: PropertyPath,
        depth: usize,
    ) -> Result<RuleBundle<F::Output>, CompileError> {
        self.options.check_depth(&path, depth)?;
        let factory = self.factory.as_ref();

        let (type_check, items) = match property.shape() {
            Shape::Object { properties } => {
                tracing::debug!(%path, properties = properties.len(), "compiling object property");
                let nested = self.build_tree(property, &path, depth)?;
                let mut builder = RuleBundleBuilder::new(TypeCheck::Single(
                    factory.type_match(property, Some(&TypeName::Object)),
                ));
                builder.properties(nested);
                return Ok(builder.build());
            }
            Shape::Union(members) => {
                let checks = members
                    .iter()
                    .map(|member| factory.type_match(property, Some(member)))
                    .collect();
                (TypeCheck::Union(factory.type_union(property, checks)), None)
            }
            Shape::Scalar(name) => (TypeCheck::Single(factory.type_match(property, name)), None),
            Shape::Array { items } => (
                TypeCheck::Single(factory.type_match(property, Some(&TypeName::Array))),
                items,
            ),
        };

        let mut builder = RuleBundleBuilder::new(type_check);
        let mut attach = |name: RuleName, validator: F::Output| {
            tracing::trace!(%path, rule = %name, "attaching rule");
            builder.insert(name, validator);
        };

        if parent.is_required(key) {
            attach(RuleName::SchemaRequired, factory.required(property));
        }

        let c = &property.constraints;
        if let Some(limit) = c.min_length {
            attach(RuleName::SchemaMinLength, factory.min_length(property, limit));
        }
        if let Some(limit) = c.max_length {
            attach(RuleName::SchemaMaxLength, factory.max_length(property, limit));
        }
        if let Some(limit) = c.min_items {
            attach(RuleName::SchemaMinItems, factory.min_length(property, limit));
        }
        if let Some(limit) = c.max_items {
            attach(RuleName::SchemaMaxItems, factory.max_length(property, limit));
        }

        if let Some(source) = &c.pattern {
            let regex = Regex::new(source).map_err(|e| {
                tracing::debug!(%path, pattern = %source, error = %e, "rejecting invalid pattern");
                CompileError::InvalidPattern {
                    path: path.clone(),
                    pattern: source.clone(),
                    source: e,
                }
            })?;
            attach(RuleName::SchemaPattern, factory.pattern(property, regex));
        }

        if let Some(values) = &c.enum_values {
            attach(RuleName::SchemaEnum, factory.one_of(property, values));
        }
        if let Some(value) = &c.const_value {
            attach(RuleName::SchemaConst, factory.equal(property, value));
        }
        if c.unique_items.is_some() {
            attach(RuleName::SchemaUniqueItems, factory.unique_items(property));
        }

        let each = match items {
            Some(item_schema) => {
                let rules = ItemRules::new(self.clone(), property, item_schema, path.clone(), depth);
                attach(RuleName::SchemaItems, factory.items(property, rules));
                if item_schema.is_object() {
                    Some(self.build_tree(item_schema, &path.each(), depth + 1)?)
                } else {
                    None
                }
            }
            None => None,
        };

        if let Some(range) = range_check(factory, property) {
            builder.range(range);
        }
        if let Some(each) = each {
            builder.each(each);
        }
        Ok(builder.build())
    }
}

/// Pick the single numeric range entry, if any.
fn range_check<F: ValidatorFactory>(
    factory: &F,
    property: &Schema,
) -> Option<RangeCheck<F::Output>> {
    let c = &property.constraints;
    match (&c.minimum, &c.maximum) {
        (Some(lo), Some(hi)) => Some(RangeCheck::Between(factory.between(property, lo, hi))),
        (Some(lo), None) => Some(RangeCheck::Minimum(factory.minimum(property, lo))),
        (None, Some(hi)) => Some(RangeCheck::Maximum(factory.maximum(property, hi))),
        (None, None) => None,
    }
}

impl<F: ValidatorFactory> Clone for RuleCompiler<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            options: self.options.clone(),
        }
    }
}

impl<F: ValidatorFactory> std::fmt::Debug for RuleCompiler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCompiler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

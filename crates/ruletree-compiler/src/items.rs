//! # Array Item Rules
//!
//! Arrays are validated element by element, but elements are only known
//! when data arrives. [`ItemRules`] is the handle an items validator keeps
//! so it can compile the item schema at that point, using the same compiler
//! (factory and options) that built the surrounding tree.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use ruletree_core::{PropertyPath, Schema};

use crate::bundle::RuleBundle;
use crate::compiler::RuleCompiler;
use crate::error::CompileError;
use crate::validator::ValidatorFactory;

/// Deferred compiler for the elements of one array property.
pub struct ItemRules<F: ValidatorFactory> {
    compiler: RuleCompiler<F>,
    /// Stands in for the array schema as the elements' parent; carries only
    /// its `required` set.
    element_parent: Arc<Schema>,
    item_schema: Arc<Schema>,
    path: PropertyPath,
    depth: usize,
}

impl<F: ValidatorFactory> ItemRules<F> {
    pub(crate) fn new(
        compiler: RuleCompiler<F>,
        array_schema: &Schema,
        item_schema: &Arc<Schema>,
        path: PropertyPath,
        depth: usize,
    ) -> Self {
        let element_parent = Schema {
            required: array_schema.required.clone(),
            ..Schema::default()
        };
        Self {
            compiler,
            element_parent: Arc::new(element_parent),
            item_schema: Arc::clone(item_schema),
            path,
            depth,
        }
    }

    /// The `items` schema every element is checked against.
    pub fn item_schema(&self) -> &Schema {
        &self.item_schema
    }

    /// Element keys the array schema lists as required.
    pub fn required(&self) -> &BTreeSet<String> {
        &self.element_parent.required
    }

    /// Path of the array property.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Compile the rules for the element at `index`.
    ///
    /// The element is compiled as property `index` of the array schema, so
    /// the array schema's own `required` set is consulted with the decimal
    /// index as key.
    ///
    /// # Errors
    ///
    /// Propagates `CompileError` from the item schema (invalid pattern, or
    /// nesting past the depth limit).
    pub fn compile_element(&self, index: usize) -> Result<RuleBundle<F::Output>, CompileError> {
        self.compiler.compile_property_at(
            &self.element_parent,
            &self.item_schema,
            &index.to_string(),
            self.path.element(index),
            self.depth + 1,
        )
    }
}

impl<F: ValidatorFactory> Clone for ItemRules<F> {
    fn clone(&self) -> Self {
        Self {
            compiler: self.compiler.clone(),
            element_parent: Arc::clone(&self.element_parent),
            item_schema: Arc::clone(&self.item_schema),
            path: self.path.clone(),
            depth: self.depth,
        }
    }
}

impl<F: ValidatorFactory> fmt::Debug for ItemRules<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRules")
            .field("path", &self.path)
            .field("item_schema", &self.item_schema)
            .finish_non_exhaustive()
    }
}

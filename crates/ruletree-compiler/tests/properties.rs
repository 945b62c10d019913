//! Property-based tests over generated schemas: coverage, type-entry and
//! range exclusivity, and required propagation hold for every input.

use std::collections::BTreeSet;

use proptest::prelude::*;
use ruletree_compiler::compile_rule_tree;
use ruletree_core::{RuleName, Schema, TypeDecl, TypeName};
use serde_json::Value;

const TYPES: &[&str] = &["string", "number", "integer", "boolean", "null", "array", "custom"];

fn type_name() -> impl Strategy<Value = TypeName> {
    prop::sample::select(TYPES).prop_map(TypeName::from)
}

fn type_decl() -> impl Strategy<Value = Option<TypeDecl>> {
    prop_oneof![
        Just(None),
        type_name().prop_map(|t| Some(TypeDecl::Single(t))),
        prop::collection::vec(type_name(), 0..4).prop_map(|ts| Some(TypeDecl::Union(ts))),
    ]
}

/// A non-object property with an arbitrary mix of scalar constraints.
fn property() -> impl Strategy<Value = Schema> {
    (
        type_decl(),
        prop::option::of(0u64..10),
        prop::option::of(0u64..10),
        prop::option::of(-100i64..100),
        prop::option::of(-100i64..100),
        prop::option::of(prop_oneof![any::<bool>().prop_map(Value::Bool), Just(Value::Null)]),
    )
        .prop_map(|(type_decl, min_len, max_len, minimum, maximum, unique)| {
            let mut schema = Schema {
                type_decl,
                ..Schema::default()
            };
            schema.constraints.min_length = min_len;
            schema.constraints.max_length = max_len;
            schema.constraints.minimum = minimum.map(Into::into);
            schema.constraints.maximum = maximum.map(Into::into);
            schema.constraints.unique_items = unique;
            schema
        })
}

/// A root schema plus the subset of keys it marks required. Some required
/// keys deliberately name no property.
fn root_schema() -> impl Strategy<Value = Schema> {
    (
        prop::collection::btree_map("[a-z]{1,6}", property(), 0..8),
        prop::collection::btree_set("[a-z]{1,6}", 0..8),
    )
        .prop_map(|(properties, required)| Schema {
            type_decl: Some(TypeDecl::Single(TypeName::Object)),
            properties,
            required,
            ..Schema::default()
        })
}

proptest! {
    /// Exactly one tree entry per declared property.
    #[test]
    fn tree_covers_every_property(schema in root_schema()) {
        let tree = compile_rule_tree(&schema).unwrap();
        let compiled: BTreeSet<&str> = tree.keys().collect();
        let declared: BTreeSet<&str> = schema.properties.keys().map(String::as_str).collect();
        prop_assert_eq!(compiled, declared);
    }

    /// `schemaTypes` iff the type is a union, otherwise `schemaType`.
    #[test]
    fn exactly_one_type_entry(schema in root_schema()) {
        let tree = compile_rule_tree(&schema).unwrap();
        for (key, bundle) in &tree {
            let is_union = matches!(schema.properties[key].type_decl, Some(TypeDecl::Union(_)));
            prop_assert_eq!(bundle.contains(RuleName::SchemaTypes), is_union);
            prop_assert_eq!(bundle.contains(RuleName::SchemaType), !is_union);
        }
    }

    /// At most one range entry, chosen by which bounds are declared.
    #[test]
    fn range_entries_are_exclusive(schema in root_schema()) {
        let tree = compile_rule_tree(&schema).unwrap();
        for (key, bundle) in &tree {
            let c = &schema.properties[key].constraints;
            let expected = match (c.minimum.is_some(), c.maximum.is_some()) {
                (true, true) => Some(RuleName::SchemaBetween),
                (true, false) => Some(RuleName::SchemaMinimum),
                (false, true) => Some(RuleName::SchemaMaximum),
                (false, false) => None,
            };
            let present: Vec<RuleName> = [
                RuleName::SchemaBetween,
                RuleName::SchemaMinimum,
                RuleName::SchemaMaximum,
            ]
            .into_iter()
            .filter(|name| bundle.contains(*name))
            .collect();
            prop_assert_eq!(present, expected.into_iter().collect::<Vec<_>>());
        }
    }

    /// `schemaRequired` iff the parent lists the key.
    #[test]
    fn required_follows_parent(schema in root_schema()) {
        let tree = compile_rule_tree(&schema).unwrap();
        for (key, bundle) in &tree {
            prop_assert_eq!(
                bundle.contains(RuleName::SchemaRequired),
                schema.required.contains(key)
            );
        }
    }

    /// Presence of `uniqueItems` is all that matters.
    #[test]
    fn unique_items_is_presence_gated(schema in root_schema()) {
        let tree = compile_rule_tree(&schema).unwrap();
        for (key, bundle) in &tree {
            prop_assert_eq!(
                bundle.contains(RuleName::SchemaUniqueItems),
                schema.properties[key].constraints.unique_items.is_some()
            );
        }
    }
}

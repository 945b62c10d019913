//! # Schema Model
//!
//! A recursive, typed description of an expected data shape. Field names
//! serialize with their JSON Schema spelling (`minLength`, `uniqueItems`,
//! `enum`, ...) so a `serde_json::Value` already in memory converts with
//! `serde_json::from_value`.
//!
//! ## Presence Semantics
//!
//! Constraint keys are gated on presence, not on value: `uniqueItems: false`
//! still counts as declared, and so do `uniqueItems: null` and `const: null`.
//! Keys that bind a value into their rule (`minLength`, `minimum`,
//! `pattern`, `enum`, ...) reject an explicit `null` instead, so a declared
//! key is never mistaken for an absent one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// A named data type.
///
/// The seven JSON Schema primitive names get their own variants. Anything
/// else is preserved in [`TypeName::Other`] and forwarded to validator
/// constructors untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeName {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Array,
    Object,
    /// A type name this crate does not recognise.
    Other(String),
}

impl TypeName {
    /// Returns the wire spelling of this type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "array" => Self::Array,
            "object" => Self::Object,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// The declared `type` of a schema fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `"type": "string"`
    Single(TypeName),
    /// `"type": ["string", "null"]` — acceptable under any member.
    Union(Vec<TypeName>),
}

/// Scalar constraint keys that may appear on any schema fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Inclusive lower bound. Kept as a JSON number so integer bounds stay
    /// integers.
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Inclusive upper bound.
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Regular expression source, compiled by the rule compiler.
    #[serde(deserialize_with = "deserialize_non_null", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(
        rename = "enum",
        deserialize_with = "deserialize_non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<Value>>,
    /// `Some(Value::Null)` means `"const": null` was declared.
    #[serde(
        rename = "const",
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub const_value: Option<Value>,
    /// Usually a bool, but any value, `null` included, declares the key.
    #[serde(deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<Value>,
}

/// Treat any present value, `null` included, as `Some`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Reject an explicit `null` for keys whose rule needs a concrete value.
fn deserialize_non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| D::Error::custom("constraint value must not be null"))
}

/// A schema fragment: the root description or any nested property/item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_decl: Option<TypeDecl>,

    /// Nested property schemas. Absent and empty are equivalent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    /// Keys of `properties` that must be present. Declared by the parent,
    /// never by the property itself.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<String>,

    /// Element schema for arrays. Shared, not copied, by compiled item rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Arc<Schema>>,

    #[serde(flatten)]
    pub constraints: Constraints,
}

/// Structural classification of a schema fragment.
///
/// Only a single `"object"` or `"array"` type opens a structural branch;
/// a union that happens to contain `"object"` is still a [`Shape::Union`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Object {
        properties: &'a BTreeMap<String, Schema>,
    },
    Array {
        items: Option<&'a Arc<Schema>>,
    },
    /// A single non-structural type, or `None` when no type is declared.
    Scalar(Option<&'a TypeName>),
    Union(&'a [TypeName]),
}

impl Schema {
    /// An empty `"type": "object"` schema.
    pub fn object() -> Self {
        Self::of_type(TypeName::Object)
    }

    /// A schema declaring a single type.
    pub fn of_type(name: impl Into<TypeName>) -> Self {
        Self {
            type_decl: Some(TypeDecl::Single(name.into())),
            ..Self::default()
        }
    }

    /// A schema declaring a union of types.
    pub fn union<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        Self {
            type_decl: Some(TypeDecl::Union(members.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// Classify this fragment for the compiler.
    pub fn shape(&self) -> Shape<'_> {
        match &self.type_decl {
            Some(TypeDecl::Single(TypeName::Object)) => Shape::Object {
                properties: &self.properties,
            },
            Some(TypeDecl::Single(TypeName::Array)) => Shape::Array {
                items: self.items.as_ref(),
            },
            Some(TypeDecl::Single(name)) => Shape::Scalar(Some(name)),
            Some(TypeDecl::Union(members)) => Shape::Union(members),
            None => Shape::Scalar(None),
        }
    }

    /// True when the declared type is exactly `"object"`.
    pub fn is_object(&self) -> bool {
        matches!(self.shape(), Shape::Object { .. })
    }

    /// True when `key` is listed in this schema's `required` set.
    pub fn is_required(&self, key: &str) -> bool {
        self.required.contains(key)
    }

    pub fn with_property(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(key.into(), schema);
        self
    }

    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required.insert(key.into());
        self
    }

    pub fn with_items(mut self, items: Schema) -> Self {
        self.items = Some(Arc::new(items));
        self
    }

    pub fn with_min_length(mut self, limit: u64) -> Self {
        self.constraints.min_length = Some(limit);
        self
    }

    pub fn with_max_length(mut self, limit: u64) -> Self {
        self.constraints.max_length = Some(limit);
        self
    }

    pub fn with_min_items(mut self, limit: u64) -> Self {
        self.constraints.min_items = Some(limit);
        self
    }

    pub fn with_max_items(mut self, limit: u64) -> Self {
        self.constraints.max_items = Some(limit);
        self
    }

    pub fn with_minimum(mut self, bound: impl Into<Number>) -> Self {
        self.constraints.minimum = Some(bound.into());
        self
    }

    pub fn with_maximum(mut self, bound: impl Into<Number>) -> Self {
        self.constraints.maximum = Some(bound.into());
        self
    }

    pub fn with_pattern(mut self, source: impl Into<String>) -> Self {
        self.constraints.pattern = Some(source.into());
        self
    }

    pub fn with_enum<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.constraints.enum_values = Some(values.into_iter().collect());
        self
    }

    pub fn with_const(mut self, value: Value) -> Self {
        self.constraints.const_value = Some(value);
        self
    }

    pub fn with_unique_items(mut self, unique: bool) -> Self {
        self.constraints.unique_items = Some(Value::Bool(unique));
        self
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any type name survives the string round trip unchanged.
        #[test]
        fn type_name_round_trips(name in "[a-z]{1,12}") {
            let parsed = TypeName::from(name.clone());
            prop_assert_eq!(parsed.as_str(), name.as_str());
            prop_assert_eq!(String::from(parsed), name);
        }

        /// Unions keep member order and length.
        #[test]
        fn union_preserves_members(names in prop::collection::vec("[a-z]{1,8}", 0..6)) {
            let schema = Schema::union(names.iter().map(String::as_str));
            match schema.shape() {
                Shape::Union(members) => {
                    let spelled: Vec<&str> = members.iter().map(TypeName::as_str).collect();
                    let expected: Vec<&str> = names.iter().map(String::as_str).collect();
                    prop_assert_eq!(spelled, expected);
                }
                other => prop_assert!(false, "expected union, got {:?}", other),
            }
        }
    }
}

//! # Rule Names — Single Source of Truth
//!
//! The fixed set of names under which compiled validators are stored in a
//! rule bundle. Every `match` on [`RuleName`] is exhaustive, so adding a
//! rule forces every consumer to handle it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved key for the nested rule tree applied to every element of an
/// array of objects.
pub const EACH_KEY: &str = "$each";

/// A well-known rule name.
///
/// | Name | Attached when |
/// |------|---------------|
/// | `schemaType` | single (or absent) `type` |
/// | `schemaTypes` | `type` is a union |
/// | `schemaRequired` | key listed in the parent's `required` |
/// | `schemaMinLength` / `schemaMaxLength` | `minLength` / `maxLength` |
/// | `schemaMinItems` / `schemaMaxItems` | `minItems` / `maxItems` |
/// | `schemaBetween` | both `minimum` and `maximum` |
/// | `schemaMinimum` / `schemaMaximum` | exactly one numeric bound |
/// | `schemaPattern` | `pattern` |
/// | `schemaEnum` | `enum` |
/// | `schemaConst` | `const` |
/// | `schemaUniqueItems` | `uniqueItems`, whatever its value |
/// | `schemaItems` | `type: "array"` with `items` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleName {
    SchemaType,
    SchemaTypes,
    SchemaRequired,
    SchemaMinLength,
    SchemaMaxLength,
    SchemaMinItems,
    SchemaMaxItems,
    SchemaBetween,
    SchemaMinimum,
    SchemaMaximum,
    SchemaPattern,
    SchemaEnum,
    SchemaConst,
    SchemaUniqueItems,
    SchemaItems,
}

/// Total number of rule names.
pub const RULE_NAME_COUNT: usize = 15;

impl RuleName {
    /// Returns every rule name in declaration order.
    pub fn all() -> &'static [RuleName] {
        &[
            Self::SchemaType,
            Self::SchemaTypes,
            Self::SchemaRequired,
            Self::SchemaMinLength,
            Self::SchemaMaxLength,
            Self::SchemaMinItems,
            Self::SchemaMaxItems,
            Self::SchemaBetween,
            Self::SchemaMinimum,
            Self::SchemaMaximum,
            Self::SchemaPattern,
            Self::SchemaEnum,
            Self::SchemaConst,
            Self::SchemaUniqueItems,
            Self::SchemaItems,
        ]
    }

    /// Returns the camelCase wire name. Must match the serde spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaType => "schemaType",
            Self::SchemaTypes => "schemaTypes",
            Self::SchemaRequired => "schemaRequired",
            Self::SchemaMinLength => "schemaMinLength",
            Self::SchemaMaxLength => "schemaMaxLength",
            Self::SchemaMinItems => "schemaMinItems",
            Self::SchemaMaxItems => "schemaMaxItems",
            Self::SchemaBetween => "schemaBetween",
            Self::SchemaMinimum => "schemaMinimum",
            Self::SchemaMaximum => "schemaMaximum",
            Self::SchemaPattern => "schemaPattern",
            Self::SchemaEnum => "schemaEnum",
            Self::SchemaConst => "schemaConst",
            Self::SchemaUniqueItems => "schemaUniqueItems",
            Self::SchemaItems => "schemaItems",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`RuleName::from_str`] for names outside the fixed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown rule name: {0:?}")]
pub struct UnknownRuleName(pub String);

impl FromStr for RuleName {
    type Err = UnknownRuleName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownRuleName(s.to_string()))
    }
}

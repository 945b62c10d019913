//! # Builtin Validators
//!
//! The default [`ValidatorFactory`]. Each constructor binds its constraint
//! values into a variant of the closed [`Rule`] enum; dispatch over rules is
//! a plain `match`, no boxed callables.
//!
//! Rules here only describe what they check. Running them against data is
//! left to the consumer of the rule tree.

use fancy_regex::Regex;
use ruletree_core::{Schema, TypeName};
use serde_json::{Number, Value};

use crate::items::ItemRules;
use crate::validator::{Constraint, Validator, ValidatorFactory};

/// Factory producing [`Rule`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinValidators;

/// A bound leaf check.
#[derive(Debug, Clone)]
pub enum Rule {
    Type { expected: Option<TypeName> },
    AnyType { members: Vec<Rule> },
    Required,
    MinLength { limit: u64 },
    MaxLength { limit: u64 },
    Minimum { limit: Number },
    Maximum { limit: Number },
    Between { minimum: Number, maximum: Number },
    Pattern { regex: Regex },
    OneOf { values: Vec<Value> },
    Equal { value: Value },
    UniqueItems,
    Items(ItemRules<BuiltinValidators>),
}

impl Validator for Rule {
    fn describe(&self) -> Constraint {
        match self {
            Self::Type { expected } => Constraint::Type {
                expected: expected.clone(),
            },
            Self::AnyType { members } => Constraint::AnyOf {
                alternatives: members.iter().map(Validator::describe).collect(),
            },
            Self::Required => Constraint::Required,
            Self::MinLength { limit } => Constraint::MinLength { limit: *limit },
            Self::MaxLength { limit } => Constraint::MaxLength { limit: *limit },
            Self::Minimum { limit } => Constraint::Minimum {
                limit: limit.clone(),
            },
            Self::Maximum { limit } => Constraint::Maximum {
                limit: limit.clone(),
            },
            Self::Between { minimum, maximum } => Constraint::Between {
                minimum: minimum.clone(),
                maximum: maximum.clone(),
            },
            Self::Pattern { regex } => Constraint::Pattern {
                source: regex.as_str().to_string(),
            },
            Self::OneOf { values } => Constraint::Enum {
                values: values.clone(),
            },
            Self::Equal { value } => Constraint::Const {
                value: value.clone(),
            },
            Self::UniqueItems => Constraint::UniqueItems,
            Self::Items(rules) => Constraint::Items {
                items: rules.item_schema().clone(),
            },
        }
    }
}

impl ValidatorFactory for BuiltinValidators {
    type Output = Rule;

    fn type_match(&self, _schema: &Schema, expected: Option<&TypeName>) -> Rule {
        Rule::Type {
            expected: expected.cloned(),
        }
    }

    fn type_union(&self, _schema: &Schema, members: Vec<Rule>) -> Rule {
        Rule::AnyType { members }
    }

    fn required(&self, _schema: &Schema) -> Rule {
        Rule::Required
    }

    fn min_length(&self, _schema: &Schema, limit: u64) -> Rule {
        Rule::MinLength { limit }
    }

    fn max_length(&self, _schema: &Schema, limit: u64) -> Rule {
        Rule::MaxLength { limit }
    }

    fn minimum(&self, _schema: &Schema, limit: &Number) -> Rule {
        Rule::Minimum {
            limit: limit.clone(),
        }
    }

    fn maximum(&self, _schema: &Schema, limit: &Number) -> Rule {
        Rule::Maximum {
            limit: limit.clone(),
        }
    }

    fn between(&self, _schema: &Schema, minimum: &Number, maximum: &Number) -> Rule {
        Rule::Between {
            minimum: minimum.clone(),
            maximum: maximum.clone(),
        }
    }

    fn pattern(&self, _schema: &Schema, regex: Regex) -> Rule {
        Rule::Pattern { regex }
    }

    fn one_of(&self, _schema: &Schema, values: &[Value]) -> Rule {
        Rule::OneOf {
            values: values.to_vec(),
        }
    }

    fn equal(&self, _schema: &Schema, value: &Value) -> Rule {
        Rule::Equal {
            value: value.clone(),
        }
    }

    fn unique_items(&self, _schema: &Schema) -> Rule {
        Rule::UniqueItems
    }

    fn items(&self, _schema: &Schema, rules: ItemRules<Self>) -> Rule {
        Rule::Items(rules)
    }
}

//! # Property Paths
//!
//! Locates a property inside a schema for error messages and log fields.
//! Rendered like a JSON pointer over property keys: `/address/street`,
//! `/tags/$each/name`, `/tags/3`. The root renders as `/`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule_name::EACH_KEY;

/// Path from the root schema to a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to the named property below this one.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Path to the per-element tree of an array of objects.
    pub fn each(&self) -> Self {
        self.child(EACH_KEY)
    }

    /// Path to one concrete array element.
    pub fn element(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    /// Number of segments below the root.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

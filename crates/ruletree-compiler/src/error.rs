//! # Error Types
//!
//! Compilation has exactly two failure modes: a `pattern` that is not a
//! valid regular expression, and a schema nested deeper than the configured
//! limit. Both abort the whole compile; no partial rule tree is returned.

use ruletree_core::PropertyPath;
use thiserror::Error;

/// Error raised while compiling a schema into rules.
#[derive(Error, Debug)]
pub enum CompileError {
    /// A `pattern` constraint could not be compiled.
    #[error("invalid pattern {pattern:?} at {path}: {source}")]
    InvalidPattern {
        /// Property carrying the pattern.
        path: PropertyPath,
        /// The offending regular expression source.
        pattern: String,
        /// Underlying parse error.
        #[source]
        source: fancy_regex::Error,
    },

    /// The schema nests deeper than `CompileOptions::max_depth`.
    #[error("schema too deep at {path}: depth {depth} exceeds limit {limit}")]
    SchemaTooDeep {
        /// First property past the limit.
        path: PropertyPath,
        /// Nesting depth of that property.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl CompileError {
    /// The property at which compilation stopped.
    pub fn path(&self) -> &PropertyPath {
        match self {
            Self::InvalidPattern { path, .. } | Self::SchemaTooDeep { path, .. } => path,
        }
    }
}

/// Error reading [`CompileOptions`](crate::CompileOptions) from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("invalid value {value:?} for {variable}: {reason}")]
    InvalidEnv {
        variable: String,
        value: String,
        reason: String,
    },
}

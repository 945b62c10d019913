//! # Compile Options
//!
//! Tunables for a [`RuleCompiler`](crate::RuleCompiler). The only knob is the
//! nesting-depth guard: schemas are normally small, hand-written shapes, but
//! the compiler recurses once per nesting level and a hostile or generated
//! schema could exhaust the stack.
//!
//! ## Depth Accounting
//!
//! Top-level properties sit at depth 1. Each nested object property, each
//! `$each` element tree, and each element compiled through
//! [`ItemRules`](crate::ItemRules) adds one level.

use ruletree_core::PropertyPath;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, OptionsError};

/// Default nesting-depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Environment variable consulted by [`CompileOptions::from_env`].
pub const MAX_DEPTH_ENV: &str = "RULETREE_MAX_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Maximum nesting depth, or `None` for no limit.
    pub max_depth: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl CompileOptions {
    /// Options with the depth guard disabled.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Read options from `RULETREE_MAX_DEPTH`.
    ///
    /// - unset: default limit
    /// - `none` or `unbounded`: no limit
    /// - a non-negative integer: that limit
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::InvalidEnv` for any other value.
    pub fn from_env() -> Result<Self, OptionsError> {
        match std::env::var(MAX_DEPTH_ENV) {
            Ok(raw) => Ok(Self {
                max_depth: parse_max_depth(&raw)?,
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Fail with `SchemaTooDeep` when `depth` is past the limit.
    pub(crate) fn check_depth(&self, path: &PropertyPath, depth: usize) -> Result<(), CompileError> {
        match self.max_depth {
            Some(limit) if depth > limit => {
                tracing::debug!(%path, depth, limit, "schema nesting limit exceeded");
                Err(CompileError::SchemaTooDeep {
                    path: path.clone(),
                    depth,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }
}

fn parse_max_depth(raw: &str) -> Result<Option<usize>, OptionsError> {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "none" | "unbounded" => Ok(None),
        _ => trimmed
            .parse::<usize>()
            .map(Some)
            .map_err(|e| OptionsError::InvalidEnv {
                variable: MAX_DEPTH_ENV.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            }),
    }
}

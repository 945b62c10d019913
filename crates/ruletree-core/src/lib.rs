//! # ruletree-core — Schema Data Model
//!
//! Typed representation of the data-shape descriptions that the rule tree
//! compiler consumes. Every other crate in the workspace depends on
//! `ruletree-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged type declarations.** A property's `type` is either a single
//!    [`TypeName`] or a union of them ([`TypeDecl`]). Unrecognised names are
//!    carried verbatim in [`TypeName::Other`] rather than rejected.
//!
//! 2. **Structural shapes.** [`Schema::shape()`] classifies a fragment as an
//!    object, an array, a scalar, or a union. Consumers match on [`Shape`]
//!    exhaustively instead of probing for keys.
//!
//! 3. **Single `RuleName` enum.** The fifteen well-known rule names live in
//!    one place, together with their camelCase wire spelling.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ruletree-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Schemas are plain values: nothing here mutates a schema after
//!   construction.

pub mod path;
pub mod rule_name;
pub mod schema;

pub use path::PropertyPath;
pub use rule_name::{RuleName, UnknownRuleName, EACH_KEY, RULE_NAME_COUNT};
pub use schema::{Constraints, Schema, Shape, TypeDecl, TypeName};

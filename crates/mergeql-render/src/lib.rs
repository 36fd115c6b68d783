//! mergeql-render: Validating renderer for Cypher merge fragments.
//!
//! Turns merge configuration objects into canonical
//! `<path> ON CREATE SET ... ON MATCH SET ...` text. Every renderer is a pure
//! function of its input: validation happens before any text is produced, and
//! the same configuration always renders to the same bytes.
//!
//! Three renderers compose top-down:
//! - [`PropertyAssignment`]: one `n.member = value` or `n = $param` item
//! - [`MultiPropertyAssignment`]: comma-joined member items on one variable
//! - [`MergeClause`]: path plus the optional `ON CREATE` / `ON MATCH` actions

pub mod assignment;
pub mod fingerprint;
pub mod members;
pub mod merge;
pub mod operator;

pub use assignment::PropertyAssignment;
pub use fingerprint::fingerprint;
pub use members::MultiPropertyAssignment;
pub use merge::{MergeClause, MergeSpec, OnMatch};
pub use operator::AssignmentOperator;

pub use mergeql_core::{FunctionCall, Literal, Parameter, RenderError, Result, Value};

//! mergeql-core: Value model and literal rendering for MergeQL.
//!
//! This crate provides the building blocks shared by every MergeQL renderer:
//! - Assignment values (literal, parameter placeholder, function call)
//! - Cypher literal quoting and escaping
//! - The render error taxonomy

pub mod error;
pub mod literal;
pub mod value;

pub use error::{RenderError, Result};
pub use value::{FunctionCall, Literal, Parameter, Value};

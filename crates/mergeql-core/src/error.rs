//! Validation errors raised while rendering merge configurations.

use thiserror::Error;

/// Every way a merge configuration can fail to render.
///
/// Errors are deterministic functions of the input: rendering the same
/// configuration again yields the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("variable name can not be empty")]
    MissingIdentifier,

    #[error("merge path can not be empty")]
    MissingPath,

    #[error("target or target function has to be defined")]
    MissingValue,

    #[error("target and target function can not both be defined")]
    ConflictingValue,

    #[error("member can not be empty for variable {variable}")]
    MissingMember { variable: String },

    #[error("operator {operator} is not supported for {context}")]
    UnsupportedOperator { operator: String, context: String },

    #[error("ON MATCH single assignment and ON MATCH member set can not coexist")]
    ConflictingOnMatch,

    #[error("member set for variable {variable} can not be empty")]
    EmptyMemberSet { variable: String },

    #[error("invalid parameter name: {0:?}")]
    InvalidParameter(String),

    #[error("non-finite float can not be rendered as a literal: {0}")]
    NonFiniteFloat(f64),
}

pub type Result<T> = std::result::Result<T, RenderError>;

//! Assignment operators and the contexts they're allowed in.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use mergeql_core::{RenderError, Result};

/// The closed set of operators a `SET` item may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum AssignmentOperator {
    /// `=`
    #[default]
    Equal,
    /// `+=`, merging a map parameter into the whole variable.
    PlusEqual,
}

/// How the left-hand side of an assignment is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentMode {
    /// `n = $props`
    WholeVariable,
    /// `n.member = value`
    Member,
}

/// The kind of right-hand side, as far as operator rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Literal,
    Placeholder,
    FunctionCall,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::PlusEqual => "+=",
        }
    }

    /// Resolve the operator text for a given addressing mode and value kind.
    ///
    /// `=` is accepted everywhere. `+=` is only accepted when a placeholder is
    /// assigned to the whole variable.
    pub fn resolve(self, mode: AssignmentMode, kind: ValueKind) -> Result<&'static str> {
        match (self, mode, kind) {
            (Self::Equal, _, _) => Ok(self.as_str()),
            (Self::PlusEqual, AssignmentMode::WholeVariable, ValueKind::Placeholder) => {
                Ok(self.as_str())
            }
            (Self::PlusEqual, _, ValueKind::FunctionCall) => {
                Err(self.unsupported("function-call values"))
            }
            (Self::PlusEqual, _, _) => Err(self.unsupported("member assignment")),
        }
    }

    fn unsupported(self, context: &str) -> RenderError {
        RenderError::UnsupportedOperator {
            operator: self.as_str().to_string(),
            context: context.to_string(),
        }
    }
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentOperator {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" => Ok(Self::Equal),
            "+=" => Ok(Self::PlusEqual),
            other => Err(RenderError::UnsupportedOperator {
                operator: other.to_string(),
                context: "assignment".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AssignmentOperator {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("=".parse::<AssignmentOperator>().unwrap(), AssignmentOperator::Equal);
        assert_eq!(
            "+=".parse::<AssignmentOperator>().unwrap(),
            AssignmentOperator::PlusEqual
        );
        assert!(matches!(
            "-=".parse::<AssignmentOperator>(),
            Err(RenderError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_default_is_equal() {
        assert_eq!(AssignmentOperator::default(), AssignmentOperator::Equal);
    }

    #[test]
    fn test_equal_everywhere() {
        for mode in [AssignmentMode::WholeVariable, AssignmentMode::Member] {
            for kind in [ValueKind::Literal, ValueKind::Placeholder, ValueKind::FunctionCall] {
                assert_eq!(AssignmentOperator::Equal.resolve(mode, kind).unwrap(), "=");
            }
        }
    }

    #[test]
    fn test_plus_equal_contexts() {
        let op = AssignmentOperator::PlusEqual;
        assert_eq!(
            op.resolve(AssignmentMode::WholeVariable, ValueKind::Placeholder)
                .unwrap(),
            "+="
        );
        assert!(op
            .resolve(AssignmentMode::Member, ValueKind::Placeholder)
            .is_err());
        assert!(op.resolve(AssignmentMode::Member, ValueKind::Literal).is_err());
        assert_eq!(
            op.resolve(AssignmentMode::Member, ValueKind::FunctionCall),
            Err(RenderError::UnsupportedOperator {
                operator: "+=".to_string(),
                context: "function-call values".to_string(),
            })
        );
    }

    #[test]
    fn test_deserialize() {
        let op: AssignmentOperator = serde_json::from_str("\"+=\"").unwrap();
        assert_eq!(op, AssignmentOperator::PlusEqual);
        assert!(serde_json::from_str::<AssignmentOperator>("\"*=\"").is_err());
    }
}

//! Single `SET` item: `n.member = value` or `n = $param`.

use std::collections::BTreeSet;

use serde::Deserialize;

use mergeql_core::literal::quote_key;
use mergeql_core::{FunctionCall, RenderError, Result, Value};

use crate::operator::{AssignmentMode, AssignmentOperator, ValueKind};

/// One property assignment.
///
/// Exactly one of `value` and `function` must be set. A placeholder value
/// with no `member` assigns the whole variable; everything else needs a
/// member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyAssignment {
    /// Variable bound by the merge path (e.g. `n`).
    #[serde(default)]
    pub variable: String,
    /// Property on the variable; empty means "not set".
    #[serde(default)]
    pub member: Option<String>,
    /// Literal or placeholder right-hand side.
    #[serde(default)]
    pub value: Option<Value>,
    /// Function-call right-hand side.
    #[serde(default)]
    pub function: Option<FunctionCall>,
    #[serde(default)]
    pub operator: AssignmentOperator,
}

/// The right-hand side once the value cardinality has been checked.
#[derive(Clone, Copy)]
enum Rhs<'a> {
    Value(&'a Value),
    Function(&'a FunctionCall),
}

impl Rhs<'_> {
    fn kind(self) -> ValueKind {
        match self {
            Rhs::Value(Value::Literal(_)) => ValueKind::Literal,
            Rhs::Value(Value::Placeholder(_)) => ValueKind::Placeholder,
            Rhs::Value(Value::FunctionCall(_)) | Rhs::Function(_) => ValueKind::FunctionCall,
        }
    }

    fn render(self) -> Result<String> {
        match self {
            Rhs::Value(value) => value.render(),
            Rhs::Function(call) => call.render(),
        }
    }
}

impl PropertyAssignment {
    /// Start an assignment on `variable`; add a member and a value with the
    /// `with_*` setters.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ..Default::default()
        }
    }

    /// `variable.member = value`
    pub fn member(
        variable: impl Into<String>,
        member: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(variable).with_member(member).with_value(value)
    }

    /// `variable = $param`
    pub fn replace(variable: impl Into<String>, param: impl Into<String>) -> Self {
        Self::new(variable).with_value(Value::param(param))
    }

    /// `variable += $param`
    pub fn merge_map(variable: impl Into<String>, param: impl Into<String>) -> Self {
        Self::replace(variable, param).with_operator(AssignmentOperator::PlusEqual)
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_function(mut self, function: FunctionCall) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_operator(mut self, operator: AssignmentOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Render the assignment, validating it first. Nothing is emitted on error.
    pub fn render(&self) -> Result<String> {
        if self.variable.is_empty() {
            return Err(RenderError::MissingIdentifier);
        }

        let rhs = match (&self.value, &self.function) {
            (None, None) => return Err(RenderError::MissingValue),
            (Some(_), Some(_)) => return Err(RenderError::ConflictingValue),
            (Some(value), None) => Rhs::Value(value),
            (None, Some(call)) => Rhs::Function(call),
        };
        let kind = rhs.kind();

        // Function calls only ever take `=`, member or not.
        if kind == ValueKind::FunctionCall && self.operator != AssignmentOperator::Equal {
            return Err(RenderError::UnsupportedOperator {
                operator: self.operator.to_string(),
                context: "function-call values".to_string(),
            });
        }

        let member = self.member.as_deref().filter(|m| !m.is_empty());
        let mode = match (kind, member) {
            (ValueKind::Placeholder, None) => AssignmentMode::WholeVariable,
            (_, Some(_)) => AssignmentMode::Member,
            (_, None) => {
                return Err(RenderError::MissingMember {
                    variable: self.variable.clone(),
                })
            }
        };

        let op = self.operator.resolve(mode, kind)?;
        let rendered = rhs.render()?;

        let variable = quote_key(&self.variable);
        Ok(match member {
            Some(member) if mode == AssignmentMode::Member => {
                format!("{}.{} {} {}", variable, quote_key(member), op, rendered)
            }
            _ => format!("{} {} {}", variable, op, rendered),
        })
    }

    /// Placeholder names referenced by this assignment, without `$`.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(value) = &self.value {
            value.collect_parameters(&mut out);
        }
        if let Some(call) = &self.function {
            for arg in &call.args {
                arg.collect_parameters(&mut out);
            }
        }
        out
    }
}

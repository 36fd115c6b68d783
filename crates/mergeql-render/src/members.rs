//! Comma-joined member assignments on one variable: `n.a = 1, n.b = 'x'`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Deserialize;

use mergeql_core::literal::quote_key;
use mergeql_core::{RenderError, Result, Value};

use crate::operator::AssignmentOperator;

/// Several member assignments on the same variable, always with `=`.
///
/// Members render in lexicographic key order, so the output never depends on
/// how the caller built the map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiPropertyAssignment {
    #[serde(default)]
    pub variable: String,
    #[serde(default)]
    pub members: BTreeMap<String, Value>,
}

impl MultiPropertyAssignment {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            members: BTreeMap::new(),
        }
    }

    /// Set (or overwrite) one member.
    pub fn with_member(mut self, member: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(member.into(), value.into());
        self
    }

    pub fn with_members<K, V, I>(mut self, members: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.members
            .extend(members.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn render(&self) -> Result<String> {
        if self.variable.is_empty() {
            return Err(RenderError::MissingIdentifier);
        }
        if self.members.is_empty() {
            return Err(RenderError::EmptyMemberSet {
                variable: self.variable.clone(),
            });
        }

        let op = AssignmentOperator::Equal;
        let variable = quote_key(&self.variable);
        let mut parts = Vec::with_capacity(self.members.len());
        for (member, value) in &self.members {
            if member.is_empty() {
                return Err(RenderError::MissingMember {
                    variable: self.variable.clone(),
                });
            }
            parts.push(format!(
                "{}.{} {} {}",
                variable,
                quote_key(member),
                op,
                value.render()?
            ));
        }
        Ok(parts.join(", "))
    }

    /// Placeholder names referenced by any member, without `$`.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for value in self.members.values() {
            value.collect_parameters(&mut out);
        }
        out
    }
}

impl<V: Into<Value>> From<(String, HashMap<String, V>)> for MultiPropertyAssignment {
    fn from((variable, members): (String, HashMap<String, V>)) -> Self {
        Self::new(variable).with_members(members)
    }
}

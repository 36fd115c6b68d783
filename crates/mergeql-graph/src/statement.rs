//! A rendered `MERGE` statement together with its parameter bindings.

use std::collections::BTreeMap;

use neo4rs::{query, BoltList, BoltMap, BoltNull, BoltString, BoltType, Query};

use mergeql_core::{Literal, Parameter};
use mergeql_render::{fingerprint, MergeClause};

use crate::client::{GraphError, Result};

/// `MERGE <clause>` plus the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatement {
    clause: MergeClause,
    params: BTreeMap<String, Literal>,
}

impl MergeStatement {
    pub fn new(clause: MergeClause) -> Self {
        Self {
            clause,
            params: BTreeMap::new(),
        }
    }

    /// Bind a parameter; the `$` sigil on `name` is optional.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        let name = Parameter::new(name).name().to_string();
        self.params.insert(name, value.into());
        self
    }

    pub fn clause(&self) -> &MergeClause {
        &self.clause
    }

    pub fn params(&self) -> &BTreeMap<String, Literal> {
        &self.params
    }

    /// The full statement text.
    pub fn cypher(&self) -> Result<String> {
        Ok(format!("MERGE {}", self.clause.render()?))
    }

    /// Placeholders used by the clause's assignments that have no binding.
    pub fn unbound_parameters(&self) -> Vec<String> {
        self.clause
            .parameters()
            .into_iter()
            .filter(|name| !self.params.contains_key(name))
            .collect()
    }

    /// Build a driver query. Fails if the clause doesn't render or if any
    /// placeholder its assignments reference is unbound.
    pub fn to_query(&self) -> Result<Query> {
        let cypher = self.cypher()?;
        if let Some(name) = self.unbound_parameters().into_iter().next() {
            return Err(GraphError::MissingParameter(name));
        }

        tracing::debug!(
            fingerprint = %fingerprint(&cypher),
            params = self.params.len(),
            "Built merge query"
        );

        let q = self
            .params
            .iter()
            .fold(query(&cypher), |q, (name, value)| {
                q.param(name, to_bolt(value))
            });
        Ok(q)
    }
}

/// Convert a literal to a Bolt value. Datetimes travel as RFC 3339 strings.
fn to_bolt(literal: &Literal) -> BoltType {
    match literal {
        Literal::Null => BoltType::Null(BoltNull),
        Literal::Bool(b) => BoltType::from(*b),
        Literal::Integer(n) => BoltType::from(*n),
        Literal::Float(f) => BoltType::from(*f),
        Literal::String(s) => BoltType::from(s.as_str()),
        Literal::DateTime(dt) => BoltType::from(dt.to_rfc3339()),
        Literal::List(items) => {
            let mut list = BoltList::with_capacity(items.len());
            for item in items {
                list.push(to_bolt(item));
            }
            BoltType::List(list)
        }
        Literal::Map(entries) => {
            let mut map = BoltMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.put(BoltString::from(key.as_str()), to_bolt(value));
            }
            BoltType::Map(map)
        }
    }
}

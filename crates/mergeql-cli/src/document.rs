//! Merge documents: JSON files describing one or more merge statements.
//!
//! A document is either a single entry or an array of entries:
//!
//! ```json
//! [
//!   {
//!     "merge": {
//!       "path": "(n:Host {id: $id})",
//!       "on_create": {"variable": "n", "value": {"$param": "props"}},
//!       "on_match_members": {"variable": "n", "members": {"last_seen": {"$fn": {"name": "timestamp"}}}}
//!     },
//!     "params": {"id": "host-1", "props": {"ip": "10.0.1.1"}}
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mergeql_core::Literal;
use mergeql_graph::{GraphError, MergeStatement};
use mergeql_render::{fingerprint, MergeClause, MergeSpec};

use crate::error::{CliError, Result};

/// One statement in a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeEntry {
    pub merge: MergeSpec,
    #[serde(default)]
    pub params: BTreeMap<String, Literal>,
}

impl MergeEntry {
    /// Validate and convert into an executable statement.
    pub fn statement(&self) -> std::result::Result<MergeStatement, GraphError> {
        let clause = MergeClause::try_from(self.merge.clone())?;
        Ok(self
            .params
            .iter()
            .fold(MergeStatement::new(clause), |stmt, (name, value)| {
                stmt.param(name.as_str(), value.clone())
            }))
    }
}

/// A rendered entry, as printed by `mergeql render`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEntry {
    pub index: usize,
    pub cypher: String,
    pub fingerprint: String,
    /// Placeholders referenced by the assignments.
    pub parameters: Vec<String>,
    /// Referenced placeholders with no binding in `params`.
    pub unbound: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MergeDocument {
    pub entries: Vec<MergeEntry>,
}

impl MergeDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        let entries = match json {
            serde_json::Value::Array(_) => serde_json::from_value(json)?,
            other => vec![serde_json::from_value(other)?],
        };
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Convert every entry, stopping at the first invalid one.
    pub fn statements(&self) -> Result<Vec<MergeStatement>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .statement()
                    .map_err(|source| CliError::Entry { index, source })
            })
            .collect()
    }

    /// Render every entry, stopping at the first invalid one.
    pub fn render(&self) -> Result<Vec<RenderedEntry>> {
        self.statements()?
            .iter()
            .enumerate()
            .map(|(index, stmt)| {
                let cypher = stmt
                    .cypher()
                    .map_err(|source| CliError::Entry { index, source })?;
                Ok(RenderedEntry {
                    index,
                    fingerprint: fingerprint(&cypher),
                    cypher,
                    parameters: stmt.clause().parameters().into_iter().collect(),
                    unbound: stmt.unbound_parameters(),
                })
            })
            .collect()
    }
}

//! `MERGE` fragment: path, then `ON CREATE SET`, then `ON MATCH SET`.
//!
//! The output grammar is fixed: `ON CREATE` always precedes `ON MATCH`,
//! whatever order the caller configured them in. The leading `MERGE`
//! keyword is not emitted; the fragment is meant to be spliced into a larger
//! statement.

use std::collections::BTreeSet;

use serde::Deserialize;

use mergeql_core::{RenderError, Result};

use crate::assignment::PropertyAssignment;
use crate::fingerprint::fingerprint;
use crate::members::MultiPropertyAssignment;

const ON_CREATE_SET: &str = " ON CREATE SET ";
const ON_MATCH_SET: &str = " ON MATCH SET ";

/// What to set when the pattern already exists.
#[derive(Debug, Clone, PartialEq)]
pub enum OnMatch {
    Single(PropertyAssignment),
    Multi(MultiPropertyAssignment),
}

impl OnMatch {
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Single(assignment) => assignment.render(),
            Self::Multi(members) => members.render(),
        }
    }

    pub fn parameters(&self) -> BTreeSet<String> {
        match self {
            Self::Single(assignment) => assignment.parameters(),
            Self::Multi(members) => members.parameters(),
        }
    }
}

impl From<PropertyAssignment> for OnMatch {
    fn from(assignment: PropertyAssignment) -> Self {
        Self::Single(assignment)
    }
}

impl From<MultiPropertyAssignment> for OnMatch {
    fn from(members: MultiPropertyAssignment) -> Self {
        Self::Multi(members)
    }
}

/// A merge clause with at most one `ON MATCH` form.
///
/// ```
/// use mergeql_render::{MergeClause, PropertyAssignment};
///
/// let clause = MergeClause::new("(n:Host {id: $id})")
///     .on_create(PropertyAssignment::replace("n", "$props"))
///     .on_match(PropertyAssignment::merge_map("n", "$props"));
/// assert_eq!(
///     clause.render().unwrap(),
///     "(n:Host {id: $id}) ON CREATE SET n = $props ON MATCH SET n += $props"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeClause {
    pub path: String,
    pub on_create: Option<PropertyAssignment>,
    pub on_match: Option<OnMatch>,
}

impl MergeClause {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn on_create(mut self, assignment: PropertyAssignment) -> Self {
        self.on_create = Some(assignment);
        self
    }

    /// Set the `ON MATCH` action, replacing any earlier one.
    pub fn on_match(mut self, on_match: impl Into<OnMatch>) -> Self {
        self.on_match = Some(on_match.into());
        self
    }

    /// Render the fragment. Any nested failure aborts the whole render.
    pub fn render(&self) -> Result<String> {
        let mut out = begin(&self.path)?;
        push_on_create(&mut out, self.on_create.as_ref())?;
        push_on_match(&mut out, self.on_match.as_ref())?;
        trace_rendered(&out);
        Ok(out)
    }

    /// Every placeholder name referenced by the clause, without `$`.
    ///
    /// Only assignment values are inspected; placeholders written inside
    /// `path` are the caller's text and aren't parsed.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(create) = &self.on_create {
            out.extend(create.parameters());
        }
        if let Some(on_match) = &self.on_match {
            out.extend(on_match.parameters());
        }
        out
    }
}

/// Merge configuration as it arrives from documents: two independent
/// `ON MATCH` slots that must not both be filled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeSpec {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub on_create: Option<PropertyAssignment>,
    #[serde(default)]
    pub on_match: Option<PropertyAssignment>,
    #[serde(default)]
    pub on_match_members: Option<MultiPropertyAssignment>,
}

impl MergeSpec {
    /// Render with the same validation order as [`MergeClause::render`],
    /// with the `ON MATCH` conflict checked once `ON CREATE` has rendered.
    pub fn render(&self) -> Result<String> {
        let mut out = begin(&self.path)?;
        push_on_create(&mut out, self.on_create.as_ref())?;
        let on_match = self.resolve_on_match()?;
        push_on_match(&mut out, on_match.as_ref())?;
        trace_rendered(&out);
        Ok(out)
    }

    fn resolve_on_match(&self) -> Result<Option<OnMatch>> {
        match (&self.on_match, &self.on_match_members) {
            (Some(_), Some(_)) => Err(RenderError::ConflictingOnMatch),
            (Some(single), None) => Ok(Some(OnMatch::Single(single.clone()))),
            (None, Some(multi)) => Ok(Some(OnMatch::Multi(multi.clone()))),
            (None, None) => Ok(None),
        }
    }
}

impl TryFrom<MergeSpec> for MergeClause {
    type Error = RenderError;

    /// Errors come out in the same order as [`MergeSpec::render`]: path,
    /// then `ON CREATE`, then the `ON MATCH` conflict.
    fn try_from(spec: MergeSpec) -> Result<Self> {
        begin(&spec.path)?;
        if let Some(create) = &spec.on_create {
            create.render()?;
        }
        let on_match = match (spec.on_match, spec.on_match_members) {
            (Some(_), Some(_)) => return Err(RenderError::ConflictingOnMatch),
            (Some(single), None) => Some(OnMatch::Single(single)),
            (None, Some(multi)) => Some(OnMatch::Multi(multi)),
            (None, None) => None,
        };
        Ok(Self {
            path: spec.path,
            on_create: spec.on_create,
            on_match,
        })
    }
}

impl From<MergeClause> for MergeSpec {
    fn from(clause: MergeClause) -> Self {
        let (on_match, on_match_members) = match clause.on_match {
            Some(OnMatch::Single(single)) => (Some(single), None),
            Some(OnMatch::Multi(multi)) => (None, Some(multi)),
            None => (None, None),
        };
        Self {
            path: clause.path,
            on_create: clause.on_create,
            on_match,
            on_match_members,
        }
    }
}

fn begin(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(RenderError::MissingPath);
    }
    Ok(path.to_string())
}

fn push_on_create(out: &mut String, on_create: Option<&PropertyAssignment>) -> Result<()> {
    if let Some(assignment) = on_create {
        let rendered = assignment.render()?;
        out.push_str(ON_CREATE_SET);
        out.push_str(&rendered);
    }
    Ok(())
}

fn push_on_match(out: &mut String, on_match: Option<&OnMatch>) -> Result<()> {
    if let Some(on_match) = on_match {
        let rendered = on_match.render()?;
        out.push_str(ON_MATCH_SET);
        out.push_str(&rendered);
    }
    Ok(())
}

fn trace_rendered(fragment: &str) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(
            fingerprint = %fingerprint(fragment),
            len = fragment.len(),
            "Rendered merge fragment"
        );
    }
}

//! Right-hand side values of property assignments.
//!
//! A [`Value`] is exactly one of a literal, a parameter placeholder, or a
//! function-call expression. Renderers dispatch on the variant; there is no
//! runtime type inspection.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{RenderError, Result};
use crate::literal;

/// Document tag for a parameter placeholder: `{"$param": "props"}`.
pub const PARAM_TAG: &str = "$param";
/// Document tag for a function call: `{"$fn": {"name": "timestamp"}}`.
pub const FUNCTION_TAG: &str = "$fn";
/// Document tag for a datetime literal: `{"$datetime": "2024-01-15T10:00:00Z"}`.
pub const DATETIME_TAG: &str = "$datetime";

/// Sigil that marks a placeholder in query text.
pub const PARAMETER_SIGIL: char = '$';

// ── Literal ──────────────────────────────────────────────────────

/// A scalar or nested literal, rendered with Cypher literal syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    List(Vec<Literal>),
    /// Keys render in sorted order.
    Map(BTreeMap<String, Literal>),
}

impl Literal {
    /// Render this literal as Cypher text.
    pub fn render(&self) -> Result<String> {
        literal::render_literal(self)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for Literal {
    type Error = String;

    fn try_from(json: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Self::Null),
            Json::Bool(b) => Ok(Self::Bool(b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if n.is_u64() {
                    Err(format!("integer {n} does not fit in a signed 64-bit literal"))
                } else {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| format!("unrepresentable number {n}"))
                }
            }
            Json::String(s) => Ok(Self::String(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::List),
            Json::Object(mut map) => {
                if map.len() == 1 {
                    if let Some(raw) = map.remove(DATETIME_TAG) {
                        return parse_datetime(&raw);
                    }
                    if let Some(tag) = [PARAM_TAG, FUNCTION_TAG]
                        .into_iter()
                        .find(|tag| map.contains_key(*tag))
                    {
                        return Err(format!(
                            "{tag} is not allowed inside a literal list or map"
                        ));
                    }
                }
                map.into_iter()
                    .map(|(k, v)| Self::try_from(v).map(|lit| (k, lit)))
                    .collect::<std::result::Result<BTreeMap<_, _>, _>>()
                    .map(Self::Map)
            }
        }
    }
}

fn parse_datetime(raw: &serde_json::Value) -> std::result::Result<Literal, String> {
    let text = raw
        .as_str()
        .ok_or_else(|| format!("{DATETIME_TAG} expects an RFC 3339 string"))?;
    DateTime::parse_from_rfc3339(text)
        .map(|dt| Literal::DateTime(dt.with_timezone(&Utc)))
        .map_err(|e| format!("invalid {DATETIME_TAG} value {text:?}: {e}"))
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(json).map_err(serde::de::Error::custom)
    }
}

// ── Parameter ────────────────────────────────────────────────────

/// A named query parameter, rendered verbatim as `$name`.
///
/// The stored name never carries the `$` sigil; construction strips it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameter(String);

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(PARAMETER_SIGIL) {
            Some(stripped) => Self(stripped.to_string()),
            None => Self(name),
        }
    }

    /// Name without the sigil.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Render as `$name`, rejecting names Cypher can't reference unquoted.
    pub fn render(&self) -> Result<String> {
        if !literal::is_plain_identifier(&self.0) {
            return Err(RenderError::InvalidParameter(self.0.clone()));
        }
        Ok(self.to_string())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PARAMETER_SIGIL}{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Parameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

// ── Function call ────────────────────────────────────────────────

/// A function-call expression such as `timestamp()` or `coalesce(n.x, 0)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Render as `name(arg1, arg2, ...)`.
    pub fn render(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(RenderError::MissingIdentifier);
        }
        let args = self
            .args
            .iter()
            .map(Value::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{}({})", self.name, args.join(", ")))
    }
}

// ── Value ────────────────────────────────────────────────────────

/// The right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal(Literal),
    Placeholder(Parameter),
    FunctionCall(FunctionCall),
}

impl Value {
    /// Shorthand for a placeholder value; the `$` sigil is optional.
    pub fn param(name: impl Into<String>) -> Self {
        Self::Placeholder(Parameter::new(name))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Render as Cypher text: literals quoted, placeholders verbatim,
    /// function calls delegated to [`FunctionCall::render`].
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Literal(lit) => lit.render(),
            Self::Placeholder(param) => param.render(),
            Self::FunctionCall(call) => call.render(),
        }
    }

    /// Add every placeholder name referenced by this value to `out`.
    pub fn collect_parameters(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Literal(_) => {}
            Self::Placeholder(param) => {
                out.insert(param.name().to_string());
            }
            Self::FunctionCall(call) => {
                for arg in &call.args {
                    arg.collect_parameters(out);
                }
            }
        }
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

macro_rules! literal_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Literal(Literal::from(v))
                }
            }
        )*
    };
}

literal_value_from!(bool, i64, i32, u32, f64, &str, String, DateTime<Utc>);

impl From<Parameter> for Value {
    fn from(param: Parameter) -> Self {
        Self::Placeholder(param)
    }
}

impl From<FunctionCall> for Value {
    fn from(call: FunctionCall) -> Self {
        Self::FunctionCall(call)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = String;

    fn try_from(json: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        if let serde_json::Value::Object(map) = &json {
            if map.len() == 1 {
                if let Some(name) = map.get(PARAM_TAG) {
                    let name = name
                        .as_str()
                        .ok_or_else(|| format!("{PARAM_TAG} expects a string"))?;
                    return Ok(Self::param(name));
                }
                if let Some(call) = map.get(FUNCTION_TAG) {
                    return serde_json::from_value::<FunctionCall>(call.clone())
                        .map(Self::FunctionCall)
                        .map_err(|e| format!("invalid {FUNCTION_TAG} value: {e}"));
                }
            }
        }
        Literal::try_from(json).map(Self::Literal)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(json).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_strips_sigil() {
        assert_eq!(Parameter::new("$props").name(), "props");
        assert_eq!(Parameter::new("props").name(), "props");
        assert_eq!(Parameter::new("$props").render().unwrap(), "$props");
    }

    #[test]
    fn parameter_rejects_bad_names() {
        assert_eq!(
            Parameter::new("$").render(),
            Err(RenderError::InvalidParameter(String::new()))
        );
        assert!(Parameter::new("1st").render().is_err());
        assert!(Parameter::new("a-b").render().is_err());
    }

    #[test]
    fn function_call_renders_args() {
        let call = FunctionCall::new("coalesce")
            .arg(Value::param("$name"))
            .arg("unknown");
        assert_eq!(call.render().unwrap(), "coalesce($name, 'unknown')");
        assert_eq!(FunctionCall::new("test").render().unwrap(), "test()");
    }

    #[test]
    fn function_call_requires_name() {
        assert_eq!(
            FunctionCall::new("").render(),
            Err(RenderError::MissingIdentifier)
        );
    }

    #[test]
    fn nested_function_args_propagate_errors() {
        let call = FunctionCall::new("toFloat").arg(f64::NAN);
        assert!(matches!(call.render(), Err(RenderError::NonFiniteFloat(_))));
    }

    #[test]
    fn collects_parameters_through_function_args() {
        let value = Value::from(
            FunctionCall::new("coalesce")
                .arg(Value::param("a"))
                .arg(FunctionCall::new("toUpper").arg(Value::param("$b"))),
        );
        let mut params = BTreeSet::new();
        value.collect_parameters(&mut params);
        assert_eq!(
            params.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn deserialize_tagged_values() {
        let v: Value = serde_json::from_value(json!({"$param": "props"})).unwrap();
        assert_eq!(v, Value::param("props"));

        let v: Value =
            serde_json::from_value(json!({"$fn": {"name": "timestamp"}})).unwrap();
        assert_eq!(v, Value::FunctionCall(FunctionCall::new("timestamp")));

        let v: Value =
            serde_json::from_value(json!({"$datetime": "2024-01-15T10:00:00Z"})).unwrap();
        assert!(matches!(v, Value::Literal(Literal::DateTime(_))));
    }

    #[test]
    fn deserialize_plain_literals() {
        let v: Value = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(v, Value::Literal(Literal::Integer(1)));

        let v: Value = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(v, Value::Literal(Literal::Float(1.5)));

        let v: Value = serde_json::from_value(json!({"a": [true, null]})).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert(
            "a".to_string(),
            Literal::List(vec![Literal::Bool(true), Literal::Null]),
        );
        assert_eq!(v, Value::Literal(Literal::Map(expected)));
    }

    #[test]
    fn deserialize_rejects_tags_nested_in_literals() {
        let res: std::result::Result<Value, _> =
            serde_json::from_value(json!([{"$param": "tag"}]));
        let err = res.unwrap_err().to_string();
        assert!(err.contains("$param"), "{err}");

        let res: std::result::Result<Value, _> =
            serde_json::from_value(json!({"k": {"$fn": {"name": "timestamp"}}}));
        let err = res.unwrap_err().to_string();
        assert!(err.contains("$fn"), "{err}");

        assert!(Literal::try_from(json!({"$param": "tag"})).is_err());
        assert!(Literal::try_from(json!([[{"$fn": {"name": "rand"}}]])).is_err());
    }

    #[test]
    fn tag_keys_alongside_other_keys_stay_map_entries() {
        let v: Value = serde_json::from_value(json!({"$param": "x", "other": 1})).unwrap();
        assert!(matches!(v, Value::Literal(Literal::Map(ref m)) if m.len() == 2));
    }

    #[test]
    fn deserialize_rejects_bad_datetime() {
        let res: std::result::Result<Value, _> =
            serde_json::from_value(json!({"$datetime": "yesterday"}));
        assert!(res.is_err());
    }
}

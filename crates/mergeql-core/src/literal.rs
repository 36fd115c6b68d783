//! Cypher literal syntax.
//!
//! Strings are single-quoted with backslash escapes, numbers and booleans are
//! bare, lists and maps nest recursively. Map keys render in sorted order so
//! the output is a pure function of the value.

use crate::error::{RenderError, Result};
use crate::value::Literal;

/// Render a literal as Cypher text.
pub fn render_literal(literal: &Literal) -> Result<String> {
    match literal {
        Literal::Null => Ok("null".to_string()),
        Literal::Bool(b) => Ok(b.to_string()),
        Literal::Integer(n) => Ok(n.to_string()),
        Literal::Float(f) => render_float(*f),
        Literal::String(s) => Ok(quote_string(s)),
        Literal::DateTime(dt) => Ok(format!("datetime({})", quote_string(&dt.to_rfc3339()))),
        Literal::List(items) => {
            let items = items
                .iter()
                .map(render_literal)
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        Literal::Map(entries) => {
            let entries = entries
                .iter()
                .map(|(k, v)| Ok(format!("{}: {}", quote_key(k), render_literal(v)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("{{{}}}", entries.join(", ")))
        }
    }
}

/// Floats always keep a fractional part or exponent so they don't read back
/// as integers.
fn render_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(RenderError::NonFiniteFloat(f));
    }
    Ok(format!("{f:?}"))
}

/// Single-quote a string, escaping backslashes, quotes, and control whitespace.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Map keys that aren't plain identifiers get backtick-quoted.
pub fn quote_key(key: &str) -> String {
    if is_plain_identifier(key) {
        key.to_string()
    } else {
        format!("`{}`", key.replace('`', "``"))
    }
}

/// ASCII letter or underscore, then letters, digits, or underscores.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn test_scalars() {
        assert_eq!(render_literal(&Literal::Integer(1)).unwrap(), "1");
        assert_eq!(render_literal(&Literal::Integer(-42)).unwrap(), "-42");
        assert_eq!(render_literal(&Literal::Bool(true)).unwrap(), "true");
        assert_eq!(render_literal(&Literal::Null).unwrap(), "null");
        assert_eq!(render_literal(&Literal::from("value2")).unwrap(), "'value2'");
    }

    #[test]
    fn test_floats_keep_fraction() {
        assert_eq!(render_literal(&Literal::Float(1.0)).unwrap(), "1.0");
        assert_eq!(render_literal(&Literal::Float(0.25)).unwrap(), "0.25");
        assert_eq!(
            render_literal(&Literal::Float(f64::INFINITY)),
            Err(RenderError::NonFiniteFloat(f64::INFINITY))
        );
        assert!(render_literal(&Literal::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(quote_string("it's"), r"'it\'s'");
        assert_eq!(quote_string(r"C:\tmp"), r"'C:\\tmp'");
        assert_eq!(quote_string("a\nb\tc"), r"'a\nb\tc'");
    }

    #[test]
    fn test_nested() {
        let mut map = BTreeMap::new();
        map.insert("zeta".to_string(), Literal::from(vec![1, 2]));
        map.insert("alpha".to_string(), Literal::from("x"));
        map.insert("two words".to_string(), Literal::Bool(false));
        assert_eq!(
            render_literal(&Literal::Map(map)).unwrap(),
            "{alpha: 'x', `two words`: false, zeta: [1, 2]}"
        );
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(
            render_literal(&Literal::DateTime(dt)).unwrap(),
            "datetime('2024-01-15T10:00:00+00:00')"
        );
    }

    #[test]
    fn test_identifiers() {
        assert!(is_plain_identifier("last_seen"));
        assert!(is_plain_identifier("_x1"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("9lives"));
        assert!(!is_plain_identifier("a.b"));
        assert_eq!(quote_key("a`b"), "`a``b`");
    }
}

//! Printing rendered entries.

use crate::config::OutputFormat;
use crate::document::RenderedEntry;
use crate::error::Result;

/// Format rendered entries for stdout.
pub fn format_entries(entries: &[RenderedEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|e| format!("{};\n", e.cypher))
            .collect()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)? + "\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, cypher: &str) -> RenderedEntry {
        RenderedEntry {
            index,
            cypher: cypher.to_string(),
            fingerprint: mergeql_render::fingerprint(cypher),
            parameters: vec!["props".to_string()],
            unbound: Vec::new(),
        }
    }

    #[test]
    fn test_text_format() {
        let out = format_entries(
            &[entry(0, "MERGE (a)"), entry(1, "MERGE (b) ON MATCH SET b = $props")],
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(out, "MERGE (a);\nMERGE (b) ON MATCH SET b = $props;\n");
    }

    #[test]
    fn test_json_format() {
        let out = format_entries(&[entry(0, "MERGE (a)")], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["cypher"], "MERGE (a)");
        assert_eq!(parsed[0]["parameters"][0], "props");
        assert_eq!(parsed[0]["fingerprint"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_entries(&[], OutputFormat::Text).unwrap(), "");
    }
}

//! Configuration for the mergeql command-line tool.

use serde::Deserialize;

use mergeql_graph::GraphConfig;

use crate::error::Result;

/// Top-level CLI configuration.
///
/// Loaded from `mergeql.toml` (optional) and `MERGEQL__` environment
/// variables, e.g. `MERGEQL__NEO4J__URI`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Connection settings used by `execute`.
    #[serde(default)]
    pub neo4j: GraphConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Default output format for `render` when `--format` isn't given.
    #[serde(default)]
    pub format: OutputFormat,
}

/// How rendered statements are printed.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `MERGE ...;` statement per line.
    #[default]
    Text,
    /// A JSON array with statement text, fingerprint, and parameters.
    Json,
}

/// Load configuration from `<file_prefix>.{toml,json,yaml,...}` and the
/// environment.
pub fn load(file_prefix: &str) -> Result<CliConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MERGEQL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(cfg.try_deserialize()?)
}

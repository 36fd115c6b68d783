//! Error types for the mergeql-cli crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid merge document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: mergeql_graph::GraphError,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] mergeql_graph::GraphError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CliError>;

//! CLI entry point for mergeql.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use mergeql_cli::config::{self, OutputFormat};
use mergeql_cli::document::MergeDocument;
use mergeql_cli::output::format_entries;
use mergeql_graph::GraphClient;

#[derive(Parser)]
#[command(name = "mergeql")]
#[command(about = "Render and execute Cypher MERGE documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: mergeql).
    #[arg(short, long, default_value = "mergeql", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render every statement in a document and print it.
    Render {
        /// Path to a JSON merge document.
        file: PathBuf,

        /// Output format (overrides output.format in config).
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Render every statement and execute them in one transaction.
    Execute {
        /// Path to a JSON merge document.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let cli_config = config::load(&cli.config)?;

    match cli.command {
        Command::Render { file, format } => {
            let doc = MergeDocument::load(&file)?;
            let entries = doc
                .render()
                .with_context(|| format!("rendering {}", file.display()))?;
            let format = format.unwrap_or(cli_config.output.format);
            let out = format_entries(&entries, format)?;
            std::io::stdout().write_all(out.as_bytes())?;
            tracing::info!(count = entries.len(), file = %file.display(), "Rendered document");
        }
        Command::Execute { file } => {
            let doc = MergeDocument::load(&file)?;
            let statements = doc
                .statements()
                .with_context(|| format!("rendering {}", file.display()))?;
            let graph = GraphClient::connect(&cli_config.neo4j).await?;
            graph
                .merge_all(&statements)
                .await
                .with_context(|| format!("executing {}", file.display()))?;
        }
    }

    Ok(())
}

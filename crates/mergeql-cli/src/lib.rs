//! mergeql-cli: Command-line front end for MergeQL.
//!
//! Reads JSON merge documents, renders them to Cypher `MERGE` statements,
//! and optionally executes them against Neo4j.

pub mod config;
pub mod document;
pub mod error;
pub mod output;

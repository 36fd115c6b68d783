//! MergeQL Graph — Neo4j execution for rendered merge statements.
//!
//! Wraps a rendered [`MergeClause`](mergeql_render::MergeClause) in a
//! `MERGE` statement, binds its parameters, and runs it through a pooled
//! neo4rs client.

pub mod client;
pub mod mutations;
pub mod statement;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use statement::MergeStatement;

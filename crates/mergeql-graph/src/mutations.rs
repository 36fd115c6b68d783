//! Write operations: executing merge statements.
//!
//! Every statement is rendered and checked before anything is sent, so a
//! batch with one invalid statement leaves the graph untouched.

use mergeql_render::fingerprint;

use crate::client::{GraphClient, Result};
use crate::statement::MergeStatement;

impl GraphClient {
    /// Execute a single merge statement.
    pub async fn merge(&self, statement: &MergeStatement) -> Result<()> {
        let q = statement.to_query()?;
        self.run(q).await?;
        tracing::info!(
            fingerprint = %fingerprint(&statement.cypher()?),
            "Executed merge"
        );
        Ok(())
    }

    /// Execute several merge statements in one transaction.
    pub async fn merge_all(&self, statements: &[MergeStatement]) -> Result<()> {
        let queries = statements
            .iter()
            .map(MergeStatement::to_query)
            .collect::<Result<Vec<_>>>()?;

        let mut txn = self.start_txn().await?;
        for q in queries {
            txn.run(q).await?;
        }
        txn.commit().await?;

        tracing::info!(count = statements.len(), "Executed merge batch");
        Ok(())
    }
}

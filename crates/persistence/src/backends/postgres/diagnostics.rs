//! Table counts and samples for the PostgreSQL backend.

use async_trait::async_trait;
use deadpool_postgres::{Client, Transaction};
use serde_json::Value;
use tokio_postgres::IsolationLevel;

use crate::core::{DiagnosticsProvider, DiagnosticsReport, SAMPLE_SIZE};
use crate::error::StorageResult;

use super::PostgresBackend;
use super::cancel::CancelOnDrop;
use super::dissociation::classify_pg_error;
use super::query_builder::{DissociationQueryBuilder, SchemaName};

const DIALECT: &str = "postgresql";

async fn count(tx: &Transaction<'_>, schema: &SchemaName, table: &str) -> StorageResult<i64> {
    let row = tx
        .query_one(&DissociationQueryBuilder::count(schema, table), &[])
        .await
        .map_err(|e| classify_pg_error(&format!("Failed to count {}", table), e))?;
    row.try_get(0)
        .map_err(|e| classify_pg_error(&format!("Unreadable count for {}", table), e))
}

/// Runs a sample query under a savepoint. A failure rolls back to the
/// savepoint and yields an empty sample; the outer transaction stays usable.
async fn sample(tx: &mut Transaction<'_>, name: &str, sql: &str) -> Vec<Value> {
    let savepoint = match tx.savepoint(name).await {
        Ok(sp) => sp,
        Err(e) => {
            tracing::warn!(sample = %name, error = %e, "Failed to open savepoint");
            return Vec::new();
        }
    };

    match savepoint.query(sql, &[&SAMPLE_SIZE]).await {
        Ok(rows) => {
            let values = rows
                .iter()
                .filter_map(|row| row.try_get::<_, Value>(0).ok())
                .collect();
            if let Err(e) = savepoint.commit().await {
                tracing::warn!(sample = %name, error = %e, "Failed to release savepoint");
            }
            values
        }
        Err(e) => {
            tracing::warn!(sample = %name, error = %e, "Sample query failed");
            if let Err(e) = savepoint.rollback().await {
                tracing::warn!(sample = %name, error = %e, "Failed to roll back savepoint");
            }
            Vec::new()
        }
    }
}

async fn collect(
    client: &mut Client,
    schema: &SchemaName,
    statement_timeout_ms: u64,
) -> StorageResult<DiagnosticsReport> {
    let mut tx = client
        .build_transaction()
        .isolation_level(IsolationLevel::RepeatableRead)
        .read_only(true)
        .start()
        .await
        .map_err(|e| classify_pg_error("Failed to begin transaction", e))?;

    tx.batch_execute(&format!(
        "SET LOCAL statement_timeout = {}",
        statement_timeout_ms
    ))
    .await
    .map_err(|e| classify_pg_error("Failed to set statement_timeout", e))?;

    let version: String = tx
        .query_one("SELECT version()", &[])
        .await
        .and_then(|row| row.try_get(0))
        .map_err(|e| classify_pg_error("Failed to read server version", e))?;

    let coordinates_count = count(&tx, schema, "coordinates").await?;
    let metadata_count = count(&tx, schema, "metadata").await?;
    let annotations_terms_count = count(&tx, schema, "annotations_terms").await?;

    let coordinates_sample = sample(
        &mut tx,
        "coordinates_sample",
        &DissociationQueryBuilder::coordinates_sample(schema),
    )
    .await;
    let metadata_sample = sample(
        &mut tx,
        "metadata_sample",
        &DissociationQueryBuilder::metadata_sample(schema),
    )
    .await;
    let annotations_terms_sample = sample(
        &mut tx,
        "annotations_terms_sample",
        &DissociationQueryBuilder::annotations_sample(schema),
    )
    .await;

    tx.commit()
        .await
        .map_err(|e| classify_pg_error("Failed to commit transaction", e))?;

    Ok(DiagnosticsReport {
        version,
        coordinates_count,
        metadata_count,
        annotations_terms_count,
        coordinates_sample,
        metadata_sample,
        annotations_terms_sample,
    })
}

#[async_trait]
impl DiagnosticsProvider for PostgresBackend {
    fn dialect(&self) -> &'static str {
        DIALECT
    }

    async fn diagnostics(&self) -> StorageResult<DiagnosticsReport> {
        let schema = self.schema();
        let statement_timeout_ms = self.config().statement_timeout_ms;

        let report = self
            .with_client("diagnostics", move |client| async move {
                let mut lease = CancelOnDrop::new(client);
                let report = collect(lease.client_mut()?, schema, statement_timeout_ms).await;
                lease.release();
                report
            })
            .await?;

        tracing::debug!(
            coordinates = report.coordinates_count,
            metadata = report.metadata_count,
            annotations_terms = report.annotations_terms_count,
            "Diagnostics collected"
        );

        Ok(report)
    }
}

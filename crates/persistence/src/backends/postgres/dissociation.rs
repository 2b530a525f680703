//! Dissociation query execution for the PostgreSQL backend.

use std::time::Instant;

use async_trait::async_trait;
use deadpool_postgres::Client;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{IsolationLevel, Row};

use crate::core::DissociationProvider;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{
    SpatialDissociation, StudyRecord, TermDissociation, dedup_by_study, map_rows,
};

use super::PostgresBackend;
use super::cancel::CancelOnDrop;
use super::query_builder::DissociationQueryBuilder;

/// Maps a driver error onto the storage error hierarchy.
///
/// Closed connections are reported as connection failures so the caller
/// can retry on a fresh connection; everything else is a query failure.
pub(crate) fn classify_pg_error(context: &str, err: tokio_postgres::Error) -> StorageError {
    if err.is_closed() {
        return StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: format!("{}: {}", context, err),
        });
    }

    let detail = err
        .as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| err.to_string());

    if err.code() == Some(&SqlState::QUERY_CANCELED) {
        StorageError::Backend(BackendError::Cancelled {
            message: format!("{}: {}", context, detail),
        })
    } else {
        StorageError::Backend(BackendError::QueryFailed {
            message: format!("{}: {}", context, detail),
        })
    }
}

/// Runs one statement inside a read-only, repeatable-read transaction so
/// the positive and negative predicates see the same snapshot.
pub(crate) async fn query_in_snapshot(
    client: &mut Client,
    statement_timeout_ms: u64,
    sql: &str,
    params: &[&(dyn ToSql + Sync)],
) -> StorageResult<Vec<Row>> {
    let tx = client
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

    let rows = tx
        .query(sql, params)
        .await
        .map_err(|e| classify_pg_error("Failed to execute dissociation query", e))?;

    tx.commit()
        .await
        .map_err(|e| classify_pg_error("Failed to commit transaction", e))?;

    Ok(rows)
}

fn study_row(row: &Row) -> StorageResult<(String, Option<String>)> {
    let study_id: String = row.try_get("study_id").map_err(|e| {
        StorageError::Backend(BackendError::QueryFailed {
            message: format!("Unreadable study_id column: {}", e),
        })
    })?;
    let title: Option<String> = row.try_get("title").map_err(|e| {
        StorageError::Backend(BackendError::QueryFailed {
            message: format!("Unreadable title column: {}", e),
        })
    })?;
    Ok((study_id, title))
}

impl PostgresBackend {
    async fn run_dissociation(
        &self,
        operation: &'static str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StorageResult<Vec<StudyRecord>> {
        let statement_timeout_ms = self.config().statement_timeout_ms;
        let started = Instant::now();

        let rows = self
            .with_client(operation, move |client| async move {
                let mut lease = CancelOnDrop::new(client);
                let result =
                    query_in_snapshot(lease.client_mut()?, statement_timeout_ms, sql, params).await;
                lease.release();
                result
            })
            .await?;

        let tuples = rows
            .iter()
            .map(study_row)
            .collect::<StorageResult<Vec<_>>>()?;
        let studies = dedup_by_study(map_rows(tuples));

        tracing::debug!(
            operation = %operation,
            studies = studies.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dissociation query complete"
        );

        Ok(studies)
    }
}

#[async_trait]
impl DissociationProvider for PostgresBackend {
    async fn dissociate_terms(
        &self,
        request: &TermDissociation,
    ) -> StorageResult<Vec<StudyRecord>> {
        let sql = DissociationQueryBuilder::term_dissociation(self.schema());
        let include = request.terms.include.as_str();
        let exclude = request.terms.exclude.as_str();
        let limit = i64::from(request.limit);

        tracing::debug!(include = %include, exclude = %exclude, limit, "Dissociating terms");

        self.run_dissociation("dissociate_terms", &sql, &[&include, &exclude, &limit])
            .await
    }

    async fn dissociate_locations(
        &self,
        request: &SpatialDissociation,
    ) -> StorageResult<Vec<StudyRecord>> {
        let sql = DissociationQueryBuilder::spatial_dissociation(self.schema());
        let include = request.points.include;
        let exclude = request.points.exclude;
        let radius = request.radius.value();
        let limit = i64::from(request.limit);

        tracing::debug!(
            include = %include,
            exclude = %exclude,
            radius,
            limit,
            "Dissociating locations"
        );

        self.run_dissociation(
            "dissociate_locations",
            &sql,
            &[
                &include.x,
                &include.y,
                &include.z,
                &exclude.x,
                &exclude.y,
                &exclude.z,
                &radius,
                &limit,
            ],
        )
        .await
    }
}

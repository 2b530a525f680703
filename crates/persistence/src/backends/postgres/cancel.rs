//! Server-side cancellation of abandoned statements.

use deadpool_postgres::Client;
use tokio_postgres::NoTls;

use crate::error::{BackendError, StorageError, StorageResult};

/// Holds a pooled client for the duration of one statement.
///
/// Dropping a query future (caller deadline, client disconnect) stops the
/// local wait but not the server. If the lease is dropped before
/// [`release`](Self::release), it sends a cancel request and keeps the client
/// out of the pool until that request has completed, so the cancel can only
/// ever hit the abandoned statement.
pub(crate) struct CancelOnDrop {
    client: Option<Client>,
}

impl CancelOnDrop {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// The leased client.
    pub(crate) fn client_mut(&mut self) -> StorageResult<&mut Client> {
        self.client.as_mut().ok_or_else(|| {
            StorageError::Backend(BackendError::Internal {
                backend_name: "postgres".to_string(),
                message: "connection lease already released".to_string(),
                source: None,
            })
        })
    }

    /// Marks the statement as finished and returns the client to the pool.
    pub(crate) fn release(mut self) {
        self.client = None;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        tracing::debug!("Query abandoned, sending cancel request");
        let token = client.cancel_token();
        handle.spawn(async move {
            if let Err(e) = token.cancel_query(NoTls).await {
                tracing::warn!(error = %e, "Failed to cancel abandoned query");
            }
            drop(client);
        });
    }
}

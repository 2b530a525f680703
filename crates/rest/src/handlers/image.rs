//! Static image endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use dissoc_persistence::core::Backend;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler serving the configured image file as `image/gif`.
///
/// # HTTP Request
///
/// `GET [base]/img`
///
/// # Response
///
/// - `200 OK` - The file contents
/// - `404 Not Found` - The file does not exist
pub async fn image_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: Backend + 'static,
{
    let path = &state.config().image_path;
    debug!(path = %path.display(), "Serving image");

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RestError::NotFound {
                message: format!("image {} not found", path.display()),
            }
        } else {
            RestError::InternalError {
                message: format!("failed to read image {}: {}", path.display(), e),
            }
        }
    })?;

    Ok(([(header::CONTENT_TYPE, "image/gif")], bytes).into_response())
}

//! Single-term and single-location endpoints.
//!
//! Both echo their parsed input and do not query the database.

use axum::{Json, extract::Path};
use tracing::debug;

use crate::extractors::CoordinatePath;

/// Handler echoing the raw term segment.
///
/// # HTTP Request
///
/// `GET [base]/terms/{term}/studies`
pub async fn term_studies_handler(Path(term): Path<String>) -> String {
    debug!(term = %term, "Processing term studies request");
    term
}

/// Handler echoing the parsed coordinate as `[x, y, z]`.
///
/// # HTTP Request
///
/// `GET [base]/locations/{coords}/studies`
///
/// # Response
///
/// - `200 OK` - `[x, y, z]`
/// - `400 Bad Request` - The segment is not three `_`-separated numbers
pub async fn location_studies_handler(
    CoordinatePath(coordinate): CoordinatePath,
) -> Json<[f64; 3]> {
    debug!(coordinate = %coordinate, "Processing location studies request");
    Json(coordinate.to_array())
}

//! Coordinate extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use dissoc_persistence::types::{CoordinatePair, MniCoordinate};

use crate::error::RestError;

/// Extracts a single `{coords}` segment as an MNI coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePath(pub MniCoordinate);

impl<S> FromRequestParts<S> for CoordinatePath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(token) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::MalformedInput {
                message: e.body_text(),
            })?;

        let coordinate = MniCoordinate::parse(&token)?;
        Ok(CoordinatePath(coordinate))
    }
}

/// Extracts the `{coords_a}/{coords_b}` segments as an include/exclude pair.
///
/// Both tokens are parsed before the handler runs, so a malformed token
/// never reaches the database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePairPath(pub CoordinatePair);

impl<S> FromRequestParts<S> for CoordinatePairPath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((include, exclude)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::MalformedInput {
                message: e.body_text(),
            })?;

        let pair = CoordinatePair::parse(&include, &exclude)?;
        Ok(CoordinatePairPath(pair))
    }
}

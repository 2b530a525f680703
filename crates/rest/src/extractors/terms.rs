//! Term pair extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use dissoc_persistence::types::TermPair;

use crate::error::RestError;

/// Extracts the `{term_a}/{term_b}` segments as normalized search phrases.
///
/// Tokens are never rejected: `working_memory` becomes `working memory`, an
/// empty token becomes an empty phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct TermPairPath(pub TermPair);

impl<S> FromRequestParts<S> for TermPairPath
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

        Ok(TermPairPath(TermPair::from_tokens(&include, &exclude)))
    }
}

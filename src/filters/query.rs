//! Axum extractor for filtered list endpoints.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tracing::debug;

use super::{ListFilter, build_list_filter};
use crate::error::ApiError;

/// Date and amount filters parsed from the request's query string.
/// Rejects with 400 and the [`super::InvalidQuery`] message.
pub struct ListFilterQuery(pub ListFilter);

impl<S> FromRequestParts<S> for ListFilterQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("Invalid query string"))?;

        build_list_filter(&params).map(ListFilterQuery).map_err(|e| {
            debug!(error = %e, "Rejected filter parameters");
            ApiError::from(e)
        })
    }
}

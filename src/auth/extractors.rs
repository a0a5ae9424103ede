//! Axum extractors and middleware for authentication.

use std::cell::RefCell;

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::cookie::{access_cookie, token_pair};
use super::errors::ApiAuthError;
use super::state::HasAuthState;
use crate::authz::{Cause, Policy, verify};
use crate::jwt::SessionClaims;

tokio::task_local! {
    /// Task-local storage for the new access token cookie.
    /// Used to pass the cookie from the auth check to the response middleware.
    pub static NEW_ACCESS_TOKEN_COOKIE: RefCell<Option<String>>;
}

/// Verify the request cookies against `policy`.
///
/// On a renewal the new access token cookie is queued for
/// [`add_access_token_cookie`]; outside that middleware it is dropped.
pub fn authorize<S>(headers: &HeaderMap, state: &S, policy: &Policy) -> Result<SessionClaims, ApiAuthError>
where
    S: HasAuthState,
{
    let outcome = verify(state.codec(), token_pair(headers), policy);
    if !outcome.is_authorized() {
        return Err(ApiAuthError::new(outcome.verdict.cause, state.secure_cookies()));
    }

    if let Some(renewal) = &outcome.renewal {
        let cookie = access_cookie(renewal, state.secure_cookies());
        let queued = NEW_ACCESS_TOKEN_COOKIE.try_with(|cell| {
            cell.borrow_mut().replace(cookie);
        });
        if queued.is_err() {
            warn!("Renewed access token outside add_access_token_cookie middleware");
        }
    }

    outcome
        .session
        .ok_or_else(|| ApiAuthError::new(Cause::Unauthorized, state.secure_cookies()))
}

/// Response middleware that appends a queued access token cookie.
pub async fn add_access_token_cookie(request: Request, next: Next) -> Response {
    NEW_ACCESS_TOKEN_COOKIE
        .scope(RefCell::new(None), async move {
            let mut response = next.run(request).await;
            let cookie = NEW_ACCESS_TOKEN_COOKIE.with(|cell| cell.borrow_mut().take());
            if let Some(cookie) = cookie {
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
            }
            response
        })
        .await
}

/// Extractor for endpoints open to any valid session.
pub struct Auth(pub SessionClaims);

impl<S> FromRequestParts<S> for Auth
where
    S: HasAuthState + Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(&parts.headers, state, &Policy::Simple).map(Auth)
    }
}

/// Extractor for endpoints restricted to admins.
pub struct AdminOnly(pub SessionClaims);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: HasAuthState + Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(&parts.headers, state, &Policy::Admin).map(AdminOnly)
    }
}

//! Authentication error response.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::cookie::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, clear_cookie};
use crate::authz::Cause;

/// Rejection for a request whose verdict was unauthorized. Always 401; the
/// body carries the verdict cause.
#[derive(Debug)]
pub struct ApiAuthError {
    pub cause: Cause,
    secure_cookies: bool,
}

impl ApiAuthError {
    pub fn new(cause: Cause, secure_cookies: bool) -> Self {
        Self {
            cause,
            secure_cookies,
        }
    }

    /// The presented tokens can never succeed, so the client should drop them.
    /// Policy mismatches keep the session: the user may use other routes.
    fn clears_session(&self) -> bool {
        matches!(
            self.cause,
            Cause::Codec(_) | Cause::MissingInformation | Cause::LoginAgain
        )
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: Cause,
        }

        let mut response = (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: self.cause }),
        )
            .into_response();

        if self.clears_session() {
            let headers = response.headers_mut();
            for name in [ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME] {
                if let Ok(value) = HeaderValue::from_str(&clear_cookie(name, self.secure_cookies)) {
                    headers.append(header::SET_COOKIE, value);
                }
            }
        }

        response
    }
}

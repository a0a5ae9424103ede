//! HTTP boundary for session verification.
//!
//! Reads the `accessToken`/`refreshToken` cookies, runs the verifier and turns
//! its outcome into either the authorized identity or a 401. Renewed access
//! tokens reach the client through the [`add_access_token_cookie`] middleware.

mod cookie;
mod errors;
mod extractors;
mod state;

pub use cookie::{
    ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, access_cookie, clear_cookie, get_cookie, token_pair,
};
pub use errors::ApiAuthError;
pub use extractors::{AdminOnly, Auth, NEW_ACCESS_TOKEN_COOKIE, add_access_token_cookie, authorize};
pub use state::HasAuthState;

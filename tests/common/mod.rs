#![allow(dead_code)]

use tollgate::jwt::{Role, SessionClaims, TokenClaims, TokenCodec, now_secs};

pub const TEST_SECRET: &[u8] = b"test-jwt-secret-for-testing";

pub fn codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET)
}

/// Session for `username` with email `<username>@example.com`.
pub fn session(username: &str, role: Role) -> SessionClaims {
    SessionClaims {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        role,
    }
}

pub fn alice() -> SessionClaims {
    session("alice", Role::Regular)
}

pub fn root() -> SessionClaims {
    session("root", Role::Admin)
}

/// Token valid for ten minutes.
pub fn live_token(codec: &TokenCodec, session: &SessionClaims) -> String {
    codec.sign(session, 600).expect("Failed to sign token").token
}

/// Token that expired a minute ago.
pub fn expired_token(codec: &TokenCodec, session: &SessionClaims) -> String {
    let now = now_secs().expect("Failed to read clock");
    codec
        .encode(&TokenClaims::for_session(session, now - 120, 60).expect("Failed to build claims"))
        .expect("Failed to sign token")
}

/// Live token with some identity fields stripped.
pub fn partial_token(codec: &TokenCodec, claims: TokenClaims) -> String {
    codec.encode(&claims).expect("Failed to sign token")
}

/// Live claims for `session`, for callers that want to strip fields.
pub fn live_claims(session: &SessionClaims) -> TokenClaims {
    let now = now_secs().expect("Failed to read clock");
    TokenClaims::for_session(session, now, 600).expect("Failed to build claims")
}

/// Token signed with a different secret.
pub fn foreign_token(session: &SessionClaims) -> String {
    live_token(&TokenCodec::new(b"some-other-secret"), session)
}

pub fn auth_cookies(access_token: &str, refresh_token: &str) -> String {
    format!("accessToken={}; refreshToken={}", access_token, refresh_token)
}

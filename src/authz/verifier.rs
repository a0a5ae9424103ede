//! Token pair verification.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. either token absent
//! 2. codec failure (access, then refresh)
//! 3. incomplete identity claims (access, then refresh)
//! 4. refresh token expired
//! 5. policy
//!
//! An expired access token with a live refresh token that satisfies the policy
//! is authorized and comes back with a freshly signed access token.

use tracing::{debug, error};

use super::policy::{Mismatch, Policy};
use super::verdict::{Cause, Verdict};
use crate::jwt::{DecodedToken, SessionClaims, TokenCodec};

/// The two tokens presented with a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPair<'a> {
    pub access: Option<&'a str>,
    pub refresh: Option<&'a str>,
}

impl<'a> TokenPair<'a> {
    pub fn new(access: Option<&'a str>, refresh: Option<&'a str>) -> Self {
        Self { access, refresh }
    }
}

/// A new access token to hand back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub token: String,
    /// Lifetime in seconds, for the cookie's Max-Age.
    pub max_age: u64,
}

/// Result of [`verify`].
#[derive(Debug, Clone)]
pub struct Outcome {
    pub verdict: Verdict,
    /// Set only when the access token was renewed.
    pub renewal: Option<Renewal>,
    /// Identity the request was authorized as.
    pub session: Option<SessionClaims>,
}

impl Outcome {
    fn denied(cause: Cause) -> Self {
        debug!(cause = %cause, "Authorization denied");
        Self {
            verdict: Verdict::denied(cause),
            renewal: None,
            session: None,
        }
    }

    fn authorized(session: SessionClaims, renewal: Option<Renewal>) -> Self {
        Self {
            verdict: Verdict::authorized(),
            renewal,
            session: Some(session),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.verdict.authorized
    }
}

/// Decide whether `pair` is authorized under `policy`.
pub fn verify(codec: &TokenCodec, pair: TokenPair<'_>, policy: &Policy) -> Outcome {
    let access = pair.access.filter(|t| !t.is_empty());
    let refresh = pair.refresh.filter(|t| !t.is_empty());
    let (Some(access), Some(refresh)) = (access, refresh) else {
        return Outcome::denied(Cause::Unauthorized);
    };

    let access = match decode(codec, access) {
        Ok(decoded) => decoded,
        Err(cause) => return Outcome::denied(cause),
    };
    let refresh = match decode(codec, refresh) {
        Ok(decoded) => decoded,
        Err(cause) => return Outcome::denied(cause),
    };

    let Some(access_session) = access.claims.session() else {
        return Outcome::denied(Cause::MissingInformation);
    };
    let Some(refresh_session) = refresh.claims.session() else {
        return Outcome::denied(Cause::MissingInformation);
    };

    if refresh.expired {
        return Outcome::denied(Cause::LoginAgain);
    }

    if access.expired {
        // The access token is about to be replaced, so only the refresh claims count.
        if !policy.permits(&refresh_session) {
            return Outcome::denied(policy.mismatch(Mismatch::AccessExpired));
        }
        return renew(codec, refresh_session);
    }

    if !policy.permits(&access_session) {
        return Outcome::denied(policy.mismatch(Mismatch::Access));
    }
    if !policy.permits(&refresh_session) {
        return Outcome::denied(policy.mismatch(Mismatch::Refresh));
    }

    Outcome::authorized(access_session, None)
}

fn decode(codec: &TokenCodec, token: &str) -> Result<DecodedToken, Cause> {
    codec.decode(token).map_err(|e| Cause::Codec(e.name()))
}

fn renew(codec: &TokenCodec, session: SessionClaims) -> Outcome {
    match codec.sign_access(&session) {
        Ok(signed) => {
            debug!(username = %session.username, "Renewed access token");
            let renewal = Renewal {
                token: signed.token,
                max_age: signed.duration,
            };
            Outcome::authorized(session, Some(renewal))
        }
        Err(e) => {
            error!("Failed to renew access token: {}", e);
            Outcome::denied(Cause::RenewalFailed)
        }
    }
}

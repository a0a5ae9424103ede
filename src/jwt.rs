//! JWT signing and decoding for session tokens.
//!
//! Access and refresh tokens share one claims shape and one secret. Decoding
//! checks the signature but not the expiry: an expired token still yields its
//! claims, flagged as expired, so the verifier can decide what to do with it.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Access token duration: 5 minutes
pub const ACCESS_TOKEN_DURATION_SECS: u64 = 5 * 60;

/// Refresh token duration: 2 weeks
pub const REFRESH_TOKEN_DURATION_SECS: u64 = 14 * 24 * 60 * 60;

/// User role carried in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Regular,
    Admin,
}

/// Raw JWT payload. Identity fields are optional here because a token signed
/// by us can still lack them; [`TokenClaims::session`] tells whether it is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl TokenClaims {
    /// Build claims for `session` expiring `duration` seconds after `now`.
    pub fn for_session(
        session: &SessionClaims,
        now: u64,
        duration: u64,
    ) -> Result<Self, CodecError> {
        let exp = now
            .checked_add(duration)
            .ok_or(CodecError::ExpiryOverflow)?;

        Ok(Self {
            username: Some(session.username.clone()),
            email: Some(session.email.clone()),
            role: Some(session.role),
            iat: Some(now),
            exp,
        })
    }

    /// Complete identity, or `None` if any of username, email or role is
    /// absent. Empty strings count as absent.
    pub fn session(&self) -> Option<SessionClaims> {
        Some(SessionClaims {
            username: non_empty(&self.username)?,
            email: non_empty(&self.email)?,
            role: self.role?,
        })
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Identity carried by a usable token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// A token whose signature checked out.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub claims: TokenClaims,
    /// `exp` is at or before the decode time.
    pub expired: bool,
}

/// Result of signing a token.
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// The JWT token string
    pub token: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
    /// Token duration in seconds
    pub duration: u64,
}

/// Verifies and mints tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_duration: u64,
}

impl TokenCodec {
    /// Create a codec for the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_duration: ACCESS_TOKEN_DURATION_SECS,
        }
    }

    /// Override the lifetime given to renewed access tokens.
    pub fn with_access_duration(mut self, secs: u64) -> Self {
        self.access_duration = secs;
        self
    }

    pub fn access_duration(&self) -> u64 {
        self.access_duration
    }

    /// Check the signature and decode the claims. Expiry is reported, not rejected.
    pub fn decode(&self, token: &str) -> Result<DecodedToken, CodecError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;

        let token_data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(CodecError::Decoding)?;

        let now = now_secs()?;
        let expired = token_data.claims.exp <= now;

        Ok(DecodedToken {
            claims: token_data.claims,
            expired,
        })
    }

    /// Sign `session` into a token valid for `duration` seconds.
    pub fn sign(&self, session: &SessionClaims, duration: u64) -> Result<SignedToken, CodecError> {
        let now = now_secs()?;
        let claims = TokenClaims::for_session(session, now, duration)?;
        let token = self.encode(&claims)?;

        Ok(SignedToken {
            token,
            expires_at: claims.exp,
            duration,
        })
    }

    /// Sign a short-lived access token for `session`.
    pub fn sign_access(&self, session: &SessionClaims) -> Result<SignedToken, CodecError> {
        self.sign(session, self.access_duration)
    }

    /// Sign a long-lived refresh token for `session`.
    pub fn sign_refresh(&self, session: &SessionClaims) -> Result<SignedToken, CodecError> {
        self.sign(session, REFRESH_TOKEN_DURATION_SECS)
    }

    /// Sign raw claims as-is, including their `exp`.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, CodecError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(CodecError::Encoding)
    }
}

/// Current Unix time in seconds.
pub fn now_secs() -> Result<u64, CodecError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| CodecError::TimeError)
}

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum CodecError {
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// Error decoding the token
    Decoding(jsonwebtoken::errors::Error),
    /// System time error
    TimeError,
    /// `iat + duration` does not fit in a timestamp
    ExpiryOverflow,
}

impl CodecError {
    /// Stable label for this failure, surfaced as the verdict cause.
    pub fn name(&self) -> &'static str {
        match self {
            CodecError::Encoding(_) => "EncodingFailed",
            CodecError::TimeError => "TimeError",
            CodecError::ExpiryOverflow => "ExpiryOverflow",
            CodecError::Decoding(e) => match e.kind() {
                ErrorKind::InvalidSignature => "InvalidSignature",
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => "MalformedToken",
                ErrorKind::InvalidAlgorithm => "InvalidAlgorithm",
                ErrorKind::MissingRequiredClaim(_) => "MissingRequiredClaim",
                _ => "InvalidToken",
            },
        }
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            CodecError::Decoding(e) => write!(f, "Failed to decode token: {}", e),
            CodecError::TimeError => write!(f, "System time error"),
            CodecError::ExpiryOverflow => write!(f, "Token expiry out of range"),
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SessionClaims {
        SessionClaims {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Regular,
        }
    }

    #[test]
    fn test_sign_and_decode_access_token() {
        let codec = TokenCodec::new(b"test-secret-key-for-testing");

        let result = codec.sign_access(&alice()).unwrap();
        assert_eq!(result.duration, ACCESS_TOKEN_DURATION_SECS);

        let decoded = codec.decode(&result.token).unwrap();
        assert!(!decoded.expired);
        assert_eq!(decoded.claims.exp, result.expires_at);
        assert_eq!(decoded.claims.session(), Some(alice()));
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let codec = TokenCodec::new(b"test-secret-key-for-testing");

        let access = codec.sign_access(&alice()).unwrap();
        let refresh = codec.sign_refresh(&alice()).unwrap();

        assert_eq!(refresh.duration, REFRESH_TOKEN_DURATION_SECS);
        assert!(refresh.expires_at > access.expires_at);
    }

    #[test]
    fn test_custom_access_duration() {
        let codec = TokenCodec::new(b"test-secret").with_access_duration(60);
        let result = codec.sign_access(&alice()).unwrap();
        assert_eq!(result.duration, 60);
    }

    #[test]
    fn test_admin_role_in_token() {
        let codec = TokenCodec::new(b"test-secret-key-for-testing");
        let admin = SessionClaims {
            role: Role::Admin,
            ..alice()
        };

        let result = codec.sign_access(&admin).unwrap();
        let decoded = codec.decode(&result.token).unwrap();
        assert_eq!(decoded.claims.role, Some(Role::Admin));
    }

    #[test]
    fn test_malformed_token() {
        let codec = TokenCodec::new(b"test-secret-key-for-testing");

        let err = codec.decode("invalid-token").unwrap_err();
        assert_eq!(err.name(), "MalformedToken");
    }

    #[test]
    fn test_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret-1");
        let codec2 = TokenCodec::new(b"secret-2");

        let result = codec1.sign_access(&alice()).unwrap();

        let err = codec2.decode(&result.token).unwrap_err();
        assert_eq!(err.name(), "InvalidSignature");
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let codec = TokenCodec::new(b"test-secret");
        let now = now_secs().unwrap();

        let mut claims = TokenClaims::for_session(&alice(), now - 100, 50).unwrap();
        assert_eq!(claims.exp, now - 50);
        let token = codec.encode(&claims).unwrap();

        let decoded = codec.decode(&token).unwrap();
        assert!(decoded.expired);
        assert_eq!(decoded.claims.session(), Some(alice()));

        claims.exp = now;
        let token = codec.encode(&claims).unwrap();
        assert!(codec.decode(&token).unwrap().expired);
    }

    #[test]
    fn test_session_requires_all_identity_fields() {
        let now = now_secs().unwrap();
        let full = TokenClaims::for_session(&alice(), now, 60).unwrap();

        let no_email = TokenClaims {
            email: None,
            ..full.clone()
        };
        let no_role = TokenClaims {
            role: None,
            ..full.clone()
        };
        let no_username = TokenClaims {
            username: None,
            ..full.clone()
        };

        assert!(full.session().is_some());
        assert!(no_email.session().is_none());
        assert!(no_role.session().is_none());
        assert!(no_username.session().is_none());
    }

    #[test]
    fn test_missing_identity_field_survives_round_trip() {
        let codec = TokenCodec::new(b"test-secret");
        let claims = TokenClaims {
            username: Some("bob".to_string()),
            email: None,
            role: Some(Role::Regular),
            iat: None,
            exp: now_secs().unwrap() + 60,
        };

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.claims, claims);
        assert!(decoded.claims.session().is_none());
    }

    #[test]
    fn test_empty_identity_fields_are_missing() {
        let now = now_secs().unwrap();
        let full = TokenClaims::for_session(&alice(), now, 60).unwrap();

        let empty_username = TokenClaims {
            username: Some(String::new()),
            ..full.clone()
        };
        let empty_email = TokenClaims {
            email: Some(String::new()),
            ..full.clone()
        };

        assert!(empty_username.session().is_none());
        assert!(empty_email.session().is_none());
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let err = TokenClaims::for_session(&alice(), 10, u64::MAX).unwrap_err();
        assert_eq!(err.name(), "ExpiryOverflow");

        let codec = TokenCodec::new(b"test-secret").with_access_duration(u64::MAX);
        let err = codec.sign_access(&alice()).unwrap_err();
        assert!(matches!(err, CodecError::ExpiryOverflow));
    }
}

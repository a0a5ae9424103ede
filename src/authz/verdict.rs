//! Authorization verdicts and their cause labels.

use serde::{Serialize, Serializer};

/// Why a request was or was not authorized.
///
/// Callers match on [`Cause::as_str`], so the strings are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Authorized,
    /// One or both tokens absent.
    Unauthorized,
    /// The codec rejected a token; holds [`crate::jwt::CodecError::name`].
    Codec(&'static str),
    MissingInformation,
    /// The refresh token has expired.
    LoginAgain,
    UserMismatch,
    /// Access token matched the user, refresh token did not.
    RefreshUserMismatch,
    ExpiredUserMismatch,
    AdminMismatch,
    ExpiredAdminMismatch,
    GroupMismatch,
    ExpiredGroupMismatch,
    RenewalFailed,
}

impl Cause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cause::Authorized => "Authorized",
            Cause::Unauthorized => "Unauthorized",
            Cause::Codec(name) => *name,
            Cause::MissingInformation => "Token is missing information",
            Cause::LoginAgain => "Perform login again",
            Cause::UserMismatch => "User: Mismatched users",
            Cause::RefreshUserMismatch => "Mismatched users",
            Cause::ExpiredUserMismatch => "Token Expired: Mismatched users",
            Cause::AdminMismatch => "Admin: Mismatched role",
            Cause::ExpiredAdminMismatch => "Admin: Access Token Expired and Mismatched role",
            Cause::GroupMismatch => "Group: user not in group",
            Cause::ExpiredGroupMismatch => "Group: Access Token Expired and user not in group",
            Cause::RenewalFailed => "Token renewal failed",
        }
    }
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Cause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Authorization decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub authorized: bool,
    pub cause: Cause,
}

impl Verdict {
    pub fn authorized() -> Self {
        Self {
            authorized: true,
            cause: Cause::Authorized,
        }
    }

    pub fn denied(cause: Cause) -> Self {
        Self {
            authorized: false,
            cause,
        }
    }
}

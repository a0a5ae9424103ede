//! Authorization policies a route can require.

use std::collections::HashSet;

use super::verdict::Cause;
use crate::jwt::{Role, SessionClaims};

/// Rule applied to the claims of both tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Any well-formed, valid token pair.
    Simple,
    /// Tokens must belong to this username.
    User(String),
    /// Tokens must carry the admin role.
    Admin,
    /// Token email must be one of these.
    Group(HashSet<String>),
}

/// Which check failed when a policy was not satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The live access token failed.
    Access,
    /// The access token passed but the refresh token failed.
    Refresh,
    /// The access token had expired and the refresh token failed.
    AccessExpired,
}

impl Policy {
    pub fn user(username: impl Into<String>) -> Self {
        Policy::User(username.into())
    }

    pub fn group<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Policy::Group(emails.into_iter().map(Into::into).collect())
    }

    /// Whether `claims` satisfy this policy.
    pub fn permits(&self, claims: &SessionClaims) -> bool {
        match self {
            Policy::Simple => true,
            Policy::User(expected) => claims.username == *expected,
            Policy::Admin => claims.role == Role::Admin,
            Policy::Group(emails) => emails.contains(&claims.email),
        }
    }

    /// Cause label for a failed check. Only `User` distinguishes a refresh-only failure.
    pub fn mismatch(&self, mismatch: Mismatch) -> Cause {
        match (self, mismatch) {
            // permits() never fails for Simple
            (Policy::Simple, _) => Cause::Unauthorized,
            (Policy::User(_), Mismatch::Access) => Cause::UserMismatch,
            (Policy::User(_), Mismatch::Refresh) => Cause::RefreshUserMismatch,
            (Policy::User(_), Mismatch::AccessExpired) => Cause::ExpiredUserMismatch,
            (Policy::Admin, Mismatch::AccessExpired) => Cause::ExpiredAdminMismatch,
            (Policy::Admin, _) => Cause::AdminMismatch,
            (Policy::Group(_), Mismatch::AccessExpired) => Cause::ExpiredGroupMismatch,
            (Policy::Group(_), _) => Cause::GroupMismatch,
        }
    }
}

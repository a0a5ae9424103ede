//! Request validation for a multi-tenant backend.
//!
//! - [`authz`] decides whether an access/refresh token pair satisfies a
//!   [`authz::Policy`], renewing an expired access token when the refresh
//!   token still allows it.
//! - [`filters`] turns `date`/`from`/`upTo` and `min`/`max` query parameters
//!   into inclusive range filters.
//! - [`auth`] and [`filters::ListFilterQuery`] wire both into axum.

pub mod auth;
pub mod authz;
pub mod cli;
pub mod error;
pub mod filters;
pub mod jwt;

pub use authz::{Cause, Outcome, Policy, Renewal, TokenPair, Verdict, verify};
pub use filters::{InvalidQuery, build_amount_filter, build_date_filter, build_list_filter};
pub use jwt::TokenCodec;

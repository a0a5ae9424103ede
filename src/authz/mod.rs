//! Session token verification and policy enforcement.
//!
//! Pure decision logic: no HTTP types here. The boundary layer in
//! [`crate::auth`] turns a renewal into a cookie.

mod policy;
mod verdict;
mod verifier;

pub use policy::{Mismatch, Policy};
pub use verdict::{Cause, Verdict};
pub use verifier::{Outcome, Renewal, TokenPair, verify};

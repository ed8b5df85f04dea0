//! Placeholder authentication.
//!
//! There is no user store: login and registration always succeed and hand
//! out signed tokens that carry the profile. This is not a security
//! boundary; no other endpoint requires a token.

pub mod jwt;

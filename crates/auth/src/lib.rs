//! Authentication and authorization for DinePass.
//!
//! HMAC-signed JWTs carry the employee identity and role between the
//! server and its clients. In production a deployment fronts the server
//! with its real identity provider and mints compatible tokens; the
//! bundled manager covers development and single-site installs.

mod error;
mod jwt;

pub use error::*;
pub use jwt::*;

/// Default token lifetime in hours.
pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 24;

/// Default `iss` claim.
pub const DEFAULT_JWT_ISSUER: &str = "dinepass";

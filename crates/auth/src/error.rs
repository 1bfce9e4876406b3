//! Auth error types.

use thiserror::Error;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token claims are malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// Token could not be encoded.
    #[error("Token encoding failed: {0}")]
    JwtEncoding(String),

    /// Token failed signature or claim validation.
    #[error("Token validation failed: {0}")]
    JwtValidation(#[from] jsonwebtoken::errors::Error),
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

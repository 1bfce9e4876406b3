//! Wire error codes and the error body shape.

use serde::{Deserialize, Serialize};

/// Stable string codes carried by error responses.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const AUTHENTICATION_REQUIRED: &str = "AUTHENTICATION_REQUIRED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error payload carried by non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code from [`error_codes`].
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_wire_shape() {
        let body = ErrorBody {
            code: error_codes::RESOURCE_NOT_FOUND.to_string(),
            message: "Restaurant not found".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(json["message"], "Restaurant not found");
    }
}

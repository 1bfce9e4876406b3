//! Authentication middleware.

use std::sync::Arc;

use auth::{Claims, JwtManager};
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dine_store::DineStore;
use serde_json::json;
use uuid::Uuid;

use crate::state::AppState;

/// Authenticated employee information.
#[derive(Debug, Clone)]
pub struct AuthenticatedEmployee {
    /// Employee ID.
    pub id: Uuid,
    /// Employee email.
    pub email: String,
    /// Employee display name.
    pub name: Option<String>,
    /// Employee role (`staff` or `manager`).
    pub role: String,
}

impl AuthenticatedEmployee {
    /// Returns true if the bearer holds the manager role.
    pub fn is_manager(&self) -> bool {
        self.role == "manager"
    }
}

impl TryFrom<Claims> for AuthenticatedEmployee {
    type Error = auth::AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.employee_id()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Validates a JWT token and returns the claims.
fn validate_token(jwt_manager: &JwtManager, token: &str) -> Result<Claims, StatusCode> {
    jwt_manager
        .validate_token(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Authentication middleware.
///
/// Extracts the JWT token from the Authorization header, validates it,
/// and stores the authenticated employee in the request extensions.
/// When auth is disabled, every request passes through untouched.
pub async fn auth_middleware<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    // Skip when auth is disabled
    if !state.auth_enabled() {
        return next.run(request).await;
    }

    // Get JWT manager
    let jwt_manager = match &state.jwt_manager {
        Some(manager) => manager,
        None => {
            tracing::error!("JWT manager not configured but auth is enabled");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Authentication misconfigured" })),
            )
                .into_response();
        }
    };

    // Extract and validate token
    let token = match extract_token(&request) {
        Some(token) => token,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing authorization header" })),
            )
                .into_response();
        }
    };

    let claims = match validate_token(jwt_manager, token) {
        Ok(claims) => claims,
        Err(status) => return (status, Json(json!({ "error": "Invalid token" }))).into_response(),
    };

    // Store authenticated employee in request extensions
    match AuthenticatedEmployee::try_from(claims) {
        Ok(employee) => {
            request.extensions_mut().insert(employee);
        }
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid token claims" })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_employee_from_claims() {
        let employee_id = Uuid::new_v4();
        let claims = Claims::new(
            employee_id,
            "mina@example.com".to_string(),
            Some("Mina".to_string()),
            "manager".to_string(),
            24,
        );

        let employee = AuthenticatedEmployee::try_from(claims).unwrap();
        assert_eq!(employee.id, employee_id);
        assert_eq!(employee.email, "mina@example.com");
        assert_eq!(employee.name, Some("Mina".to_string()));
        assert!(employee.is_manager());
    }

    #[test]
    fn test_extract_token_valid() {
        let auth_header = "Bearer test-token-123";
        let token = auth_header.strip_prefix("Bearer ");
        assert_eq!(token, Some("test-token-123"));
    }

    #[test]
    fn test_extract_token_missing_bearer() {
        let auth_header = "Basic credentials";
        let token = auth_header.strip_prefix("Bearer ");
        assert_eq!(token, None);
    }
}

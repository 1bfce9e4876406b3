//! Authentication API endpoints.
//!
//! The identity provider is expected to be external in production;
//! these endpoints cover development and single-site deployments where
//! the bundled JWT manager mints tokens directly.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use dine_store::DineStore;
use rpc_protocol::{LoginRequest, LoginResponse, MeResponse};

use crate::api::employee::to_rpc_employee;
use crate::api::restaurant_names;
use crate::error::{ServerError, ServerResult};
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Issues a token for an approved employee.
pub async fn login<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    if !state.auth_enabled() {
        return Err(ServerError::InvalidRequest(
            "Authentication is disabled".to_string(),
        ));
    }

    let jwt_manager = state
        .jwt_manager
        .as_ref()
        .ok_or_else(|| ServerError::Internal("JWT manager not configured".to_string()))?;

    let employee = state
        .store
        .get_employee_by_email(&request.email)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    if !employee.is_approved() {
        return Err(ServerError::PermissionDenied(
            "Employee is not approved".to_string(),
        ));
    }

    let token = jwt_manager.generate_token(
        employee.id,
        employee.email.clone(),
        employee.name.clone(),
        employee.role.as_str().to_string(),
    )?;

    tracing::info!(employee_id = %employee.id, "Employee logged in");

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(LoginResponse {
        token,
        employee: to_rpc_employee(&employee, &names),
    }))
}

/// Returns the employee behind the presented token.
pub async fn get_current_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
) -> ServerResult<Json<MeResponse>> {
    let actor = actor.ok_or(ServerError::AuthenticationRequired)?;

    let employee = state
        .store
        .get_employee(actor.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(MeResponse {
        employee: to_rpc_employee(&employee, &names),
    }))
}

//! Employee management API endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use dine_store::{DineStore, EmployeeFilter};
use entities::{Employee, EmployeeStatus as EntityEmployeeStatus};
use rpc_protocol::{
    ApproveEmployeeRequest, ApproveEmployeeResponse, DeleteEmployeeRequest,
    DeleteEmployeeResponse, DiscountCard, DiscountCardRequest, DiscountCardResponse,
    EmployeeRole, EmployeeStatus, GetEmployeeRequest, GetEmployeeResponse, ListEmployeesRequest,
    ListEmployeesResponse, RegisterEmployeeRequest, RegisterEmployeeResponse,
    RejectEmployeeRequest, RejectEmployeeResponse, UpdateEmployeeRequest, UpdateEmployeeResponse,
};
use uuid::Uuid;

use crate::api::{parse_uuid, require_manager, restaurant_names};
use crate::error::{ServerError, ServerResult};
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Converts RPC EmployeeStatus to the entity form.
fn to_entity_status(status: EmployeeStatus) -> EntityEmployeeStatus {
    match status {
        EmployeeStatus::Pending => EntityEmployeeStatus::Pending,
        EmployeeStatus::Approved => EntityEmployeeStatus::Approved,
        EmployeeStatus::Rejected => EntityEmployeeStatus::Rejected,
    }
}

/// Converts entity EmployeeStatus to the RPC form.
fn to_rpc_status(status: EntityEmployeeStatus) -> EmployeeStatus {
    match status {
        EntityEmployeeStatus::Pending => EmployeeStatus::Pending,
        EntityEmployeeStatus::Approved => EmployeeStatus::Approved,
        EntityEmployeeStatus::Rejected => EmployeeStatus::Rejected,
    }
}

/// Converts entity EmployeeRole to the RPC form.
fn to_rpc_role(role: entities::EmployeeRole) -> EmployeeRole {
    match role {
        entities::EmployeeRole::Staff => EmployeeRole::Staff,
        entities::EmployeeRole::Manager => EmployeeRole::Manager,
    }
}

/// Converts an entity employee to its RPC shape, resolving the home
/// restaurant's display name.
pub(crate) fn to_rpc_employee(
    employee: &Employee,
    names: &HashMap<Uuid, String>,
) -> rpc_protocol::Employee {
    rpc_protocol::Employee {
        id: employee.id.to_string(),
        email: employee.email.clone(),
        name: employee.name.clone(),
        home_restaurant_id: employee.home_restaurant_id.map(|id| id.to_string()),
        home_restaurant_name: employee
            .home_restaurant_id
            .and_then(|id| names.get(&id).cloned()),
        role: to_rpc_role(employee.role),
        status: to_rpc_status(employee.status),
        created_at: employee.created_at,
        updated_at: employee.updated_at,
    }
}

/// Registers a new employee, pending approval.
pub async fn register_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RegisterEmployeeRequest>,
) -> ServerResult<Json<RegisterEmployeeResponse>> {
    if request.email.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Email is required".to_string()));
    }

    if state
        .store
        .get_employee_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(ServerError::InvalidRequest(
            "Email already registered".to_string(),
        ));
    }

    let mut employee = Employee::new(request.email);
    if let Some(name) = request.name {
        employee = employee.with_name(name);
    }
    if let Some(raw) = request.home_restaurant_id {
        let restaurant_id = parse_uuid(&raw, "home_restaurant_id")?;
        // Verify the restaurant exists
        state
            .store
            .get_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;
        employee = employee.with_home_restaurant(restaurant_id);
    }

    let employee = state.store.create_employee(employee).await?;

    tracing::info!(employee_id = %employee.id, "Employee registered");

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(RegisterEmployeeResponse {
        employee: to_rpc_employee(&employee, &names),
    }))
}

/// Gets an employee by ID.
pub async fn get_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetEmployeeRequest>,
) -> ServerResult<Json<GetEmployeeResponse>> {
    let id = parse_uuid(&request.employee_id, "employee_id")?;

    let employee = state
        .store
        .get_employee(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(GetEmployeeResponse {
        employee: to_rpc_employee(&employee, &names),
    }))
}

/// Lists employees with optional filters.
pub async fn list_employees<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListEmployeesRequest>,
) -> ServerResult<Json<ListEmployeesResponse>> {
    let filter = EmployeeFilter {
        home_restaurant_id: request
            .home_restaurant_id
            .as_deref()
            .map(|raw| parse_uuid(raw, "home_restaurant_id"))
            .transpose()?,
        status: request.status.map(to_entity_status),
        limit: request.limit,
        offset: request.offset,
    };

    let (employees, total_count) = state.store.list_employees(filter).await?;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(ListEmployeesResponse {
        employees: employees
            .iter()
            .map(|e| to_rpc_employee(e, &names))
            .collect(),
        total_count,
    }))
}

/// Sets an employee's status, shared by approve and reject.
async fn set_employee_status<S: DineStore + 'static>(
    state: &AppState<S>,
    employee_id: &str,
    status: EntityEmployeeStatus,
) -> ServerResult<rpc_protocol::Employee> {
    let id = parse_uuid(employee_id, "employee_id")?;

    let mut employee = state
        .store
        .get_employee(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    employee.status = status;
    employee.updated_at = Utc::now();
    let employee = state.store.update_employee(employee).await?;

    tracing::info!(
        employee_id = %employee.id,
        status = employee.status.as_str(),
        "Employee status updated"
    );

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(to_rpc_employee(&employee, &names))
}

/// Approves an employee for the discount program. Manager action.
pub async fn approve_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<ApproveEmployeeRequest>,
) -> ServerResult<Json<ApproveEmployeeResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let employee =
        set_employee_status(&state, &request.employee_id, EntityEmployeeStatus::Approved).await?;
    Ok(Json(ApproveEmployeeResponse { employee }))
}

/// Rejects an employee. Manager action.
pub async fn reject_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<RejectEmployeeRequest>,
) -> ServerResult<Json<RejectEmployeeResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let employee =
        set_employee_status(&state, &request.employee_id, EntityEmployeeStatus::Rejected).await?;
    Ok(Json(RejectEmployeeResponse { employee }))
}

/// Updates an employee's name or home restaurant.
pub async fn update_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> ServerResult<Json<UpdateEmployeeResponse>> {
    let id = parse_uuid(&request.employee_id, "employee_id")?;

    let mut employee = state
        .store
        .get_employee(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    if let Some(name) = request.name {
        employee.name = Some(name);
    }
    if let Some(raw) = request.home_restaurant_id {
        let restaurant_id = parse_uuid(&raw, "home_restaurant_id")?;
        state
            .store
            .get_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;
        employee.home_restaurant_id = Some(restaurant_id);
    }
    employee.updated_at = Utc::now();

    let employee = state.store.update_employee(employee).await?;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(UpdateEmployeeResponse {
        employee: to_rpc_employee(&employee, &names),
    }))
}

/// Deletes an employee. Manager action.
pub async fn delete_employee<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<DeleteEmployeeRequest>,
) -> ServerResult<Json<DeleteEmployeeResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let id = parse_uuid(&request.employee_id, "employee_id")?;
    state.store.delete_employee(id).await?;

    tracing::info!(employee_id = %id, "Employee deleted");

    Ok(Json(DeleteEmployeeResponse {}))
}

/// Returns the time-stamped discount card payload for an approved
/// employee.
pub async fn discount_card<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<DiscountCardRequest>,
) -> ServerResult<Json<DiscountCardResponse>> {
    let id = parse_uuid(&request.employee_id, "employee_id")?;

    let employee = state
        .store
        .get_employee(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    if !employee.is_approved() {
        return Err(ServerError::PermissionDenied(
            "Employee is not approved for the discount program".to_string(),
        ));
    }

    let home_restaurant_name = match employee.home_restaurant_id {
        Some(restaurant_id) => state
            .store
            .get_restaurant(restaurant_id)
            .await?
            .map(|r| r.name),
        None => None,
    };

    let card = DiscountCard {
        employee_id: employee.id.to_string(),
        employee_name: employee.name.unwrap_or(employee.email),
        home_restaurant_name,
        issued_at: Utc::now(),
    };

    Ok(Json(DiscountCardResponse { card }))
}

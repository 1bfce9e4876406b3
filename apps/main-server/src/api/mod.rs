//! API endpoints.

pub mod auth;
pub mod employee;
pub mod restaurant;
pub mod ticket;
pub mod traffic;
pub mod visit;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use dine_store::DineStore;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Creates the API router with all authenticated endpoints.
pub fn create_router<S: DineStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Restaurant endpoints
        .route("/api/restaurant/create", post(restaurant::create_restaurant))
        .route("/api/restaurant/get", post(restaurant::get_restaurant))
        .route("/api/restaurant/list", post(restaurant::list_restaurants))
        .route("/api/restaurant/update", post(restaurant::update_restaurant))
        .route("/api/restaurant/delete", post(restaurant::delete_restaurant))
        // Employee endpoints
        .route("/api/employee/register", post(employee::register_employee))
        .route("/api/employee/get", post(employee::get_employee))
        .route("/api/employee/list", post(employee::list_employees))
        .route("/api/employee/approve", post(employee::approve_employee))
        .route("/api/employee/reject", post(employee::reject_employee))
        .route("/api/employee/update", post(employee::update_employee))
        .route("/api/employee/delete", post(employee::delete_employee))
        .route("/api/employee/discount-card", post(employee::discount_card))
        // Visit endpoints
        .route("/api/visit/record", post(visit::record_visit))
        .route("/api/visit/cooldown", post(visit::cooldown_status))
        .route("/api/visit/list", post(visit::list_visits))
        .route("/api/visit/subscribe", get(visit::subscribe))
        // Traffic endpoints
        .route("/api/traffic/visit-counts", post(traffic::visit_counts))
        .route("/api/traffic/flow", post(traffic::traffic_flow))
        // Ticket endpoints
        .route("/api/ticket/create", post(ticket::create_ticket))
        .route("/api/ticket/get", post(ticket::get_ticket))
        .route("/api/ticket/list", post(ticket::list_tickets))
        .route("/api/ticket/schedule", post(ticket::schedule_ticket))
        .route("/api/ticket/resolve", post(ticket::resolve_ticket))
        .route("/api/ticket/add-photo", post(ticket::add_ticket_photo))
        .route("/api/ticket/delete", post(ticket::delete_ticket))
        // Auth endpoints
        .route("/api/auth/me", get(auth::get_current_employee))
}

/// Health check endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Parses a UUID request field.
pub(crate) fn parse_uuid(raw: &str, field: &str) -> ServerResult<Uuid> {
    raw.parse()
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid {field}")))
}

/// Resolves restaurant display names by id for response assembly. Names
/// exist only at this boundary; everything inward is keyed by id.
pub(crate) async fn restaurant_names<S: DineStore>(
    store: &S,
) -> ServerResult<HashMap<Uuid, String>> {
    let restaurants = store.list_restaurants().await?;
    Ok(restaurants.into_iter().map(|r| (r.id, r.name)).collect())
}

/// Rejects non-manager bearers. Anonymous requests (auth disabled) pass;
/// the deployment has opted out of enforcement.
pub(crate) fn require_manager(actor: Option<&AuthenticatedEmployee>) -> ServerResult<()> {
    match actor {
        Some(employee) if !employee.is_manager() => Err(ServerError::PermissionDenied(
            "Manager role required".to_string(),
        )),
        _ => Ok(()),
    }
}

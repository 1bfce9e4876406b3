//! Maintenance ticket API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use dine_store::{DineStore, DineStoreError, TicketFilter};
use entities::{MaintenanceTicket, TicketPhoto, TicketStatus as EntityTicketStatus};
use rpc_protocol::{
    AddTicketPhotoRequest, AddTicketPhotoResponse, CreateTicketRequest, CreateTicketResponse,
    DeleteTicketRequest, DeleteTicketResponse, GetTicketRequest, GetTicketResponse,
    ListTicketsRequest, ListTicketsResponse, ResolveTicketRequest, ResolveTicketResponse,
    ScheduleTicketRequest, ScheduleTicketResponse, TicketStatus,
};
use uuid::Uuid;

use crate::api::{parse_uuid, require_manager};
use crate::error::{ServerError, ServerResult};
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Converts RPC TicketStatus to the entity form.
fn to_entity_status(status: TicketStatus) -> EntityTicketStatus {
    match status {
        TicketStatus::Open => EntityTicketStatus::Open,
        TicketStatus::Scheduled => EntityTicketStatus::Scheduled,
        TicketStatus::Resolved => EntityTicketStatus::Resolved,
    }
}

/// Converts entity TicketStatus to the RPC form.
fn to_rpc_status(status: EntityTicketStatus) -> TicketStatus {
    match status {
        EntityTicketStatus::Open => TicketStatus::Open,
        EntityTicketStatus::Scheduled => TicketStatus::Scheduled,
        EntityTicketStatus::Resolved => TicketStatus::Resolved,
    }
}

/// Converts an entity ticket to its RPC shape.
pub(crate) fn to_rpc_ticket(ticket: &MaintenanceTicket) -> rpc_protocol::MaintenanceTicket {
    rpc_protocol::MaintenanceTicket {
        id: ticket.id.to_string(),
        restaurant_id: ticket.restaurant_id.to_string(),
        reported_by: ticket.reported_by.to_string(),
        title: ticket.title.clone(),
        description: ticket.description.clone(),
        status: to_rpc_status(ticket.status),
        scheduled_for: ticket.scheduled_for,
        resolved_at: ticket.resolved_at,
        photos: ticket
            .photos
            .iter()
            .map(|photo| rpc_protocol::TicketPhoto {
                id: photo.id.to_string(),
                file_name: photo.file_name.clone(),
                content_type: photo.content_type.clone(),
                size_bytes: photo.size_bytes,
                uploaded_at: photo.uploaded_at,
            })
            .collect(),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

async fn fetch_ticket<S: DineStore + 'static>(
    state: &AppState<S>,
    ticket_id: Uuid,
) -> ServerResult<MaintenanceTicket> {
    state
        .store
        .get_ticket(ticket_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Ticket not found".to_string()))
}

/// Files a new maintenance ticket.
pub async fn create_ticket<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateTicketRequest>,
) -> ServerResult<Json<CreateTicketResponse>> {
    let restaurant_id = parse_uuid(&request.restaurant_id, "restaurant_id")?;
    let reported_by = parse_uuid(&request.reported_by, "reported_by")?;

    if request.title.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Title is required".to_string()));
    }

    // Verify the restaurant and the reporter exist
    state
        .store
        .get_restaurant(restaurant_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;
    state
        .store
        .get_employee(reported_by)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;

    let ticket = MaintenanceTicket::new(
        restaurant_id,
        reported_by,
        request.title,
        request.description,
    );
    let ticket = state.store.create_ticket(ticket).await?;

    tracing::info!(
        ticket_id = %ticket.id,
        restaurant_id = %ticket.restaurant_id,
        "Maintenance ticket filed"
    );

    Ok(Json(CreateTicketResponse {
        ticket: to_rpc_ticket(&ticket),
    }))
}

/// Gets a ticket by ID.
pub async fn get_ticket<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetTicketRequest>,
) -> ServerResult<Json<GetTicketResponse>> {
    let ticket_id = parse_uuid(&request.ticket_id, "ticket_id")?;
    let ticket = fetch_ticket(&state, ticket_id).await?;

    Ok(Json(GetTicketResponse {
        ticket: to_rpc_ticket(&ticket),
    }))
}

/// Lists tickets with optional filters.
pub async fn list_tickets<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListTicketsRequest>,
) -> ServerResult<Json<ListTicketsResponse>> {
    let filter = TicketFilter {
        restaurant_id: request
            .restaurant_id
            .as_deref()
            .map(|raw| parse_uuid(raw, "restaurant_id"))
            .transpose()?,
        status: request.status.map(to_entity_status),
        limit: request.limit,
        offset: request.offset,
    };

    let (tickets, total_count) = state.store.list_tickets(filter).await?;

    Ok(Json(ListTicketsResponse {
        tickets: tickets.iter().map(to_rpc_ticket).collect(),
        total_count,
    }))
}

/// Schedules (or reschedules) the repair visit for a ticket.
pub async fn schedule_ticket<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ScheduleTicketRequest>,
) -> ServerResult<Json<ScheduleTicketResponse>> {
    let ticket_id = parse_uuid(&request.ticket_id, "ticket_id")?;
    let mut ticket = fetch_ticket(&state, ticket_id).await?;

    if !ticket.can_transition_to(EntityTicketStatus::Scheduled) {
        return Err(ServerError::Store(DineStoreError::invalid_transition(
            ticket.status.as_str(),
            EntityTicketStatus::Scheduled.as_str(),
        )));
    }

    ticket.schedule(request.scheduled_for);
    let ticket = state.store.update_ticket(ticket).await?;

    tracing::info!(
        ticket_id = %ticket.id,
        scheduled_for = ?ticket.scheduled_for,
        "Maintenance ticket scheduled"
    );

    Ok(Json(ScheduleTicketResponse {
        ticket: to_rpc_ticket(&ticket),
    }))
}

/// Marks a ticket resolved.
pub async fn resolve_ticket<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ResolveTicketRequest>,
) -> ServerResult<Json<ResolveTicketResponse>> {
    let ticket_id = parse_uuid(&request.ticket_id, "ticket_id")?;
    let mut ticket = fetch_ticket(&state, ticket_id).await?;

    if !ticket.can_transition_to(EntityTicketStatus::Resolved) {
        return Err(ServerError::Store(DineStoreError::invalid_transition(
            ticket.status.as_str(),
            EntityTicketStatus::Resolved.as_str(),
        )));
    }

    ticket.resolve();
    let ticket = state.store.update_ticket(ticket).await?;

    tracing::info!(ticket_id = %ticket.id, "Maintenance ticket resolved");

    Ok(Json(ResolveTicketResponse {
        ticket: to_rpc_ticket(&ticket),
    }))
}

/// Attaches a photo record to a ticket.
pub async fn add_ticket_photo<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<AddTicketPhotoRequest>,
) -> ServerResult<Json<AddTicketPhotoResponse>> {
    let ticket_id = parse_uuid(&request.ticket_id, "ticket_id")?;

    if request.size_bytes < 0 {
        return Err(ServerError::InvalidRequest(
            "Photo size must be non-negative".to_string(),
        ));
    }

    let photo = TicketPhoto::new(request.file_name, request.content_type, request.size_bytes);
    let ticket = state.store.add_ticket_photo(ticket_id, photo).await?;

    Ok(Json(AddTicketPhotoResponse {
        ticket: to_rpc_ticket(&ticket),
    }))
}

/// Deletes a ticket. Manager action.
pub async fn delete_ticket<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<DeleteTicketRequest>,
) -> ServerResult<Json<DeleteTicketResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let ticket_id = parse_uuid(&request.ticket_id, "ticket_id")?;
    state.store.delete_ticket(ticket_id).await?;

    tracing::info!(ticket_id = %ticket_id, "Maintenance ticket deleted");

    Ok(Json(DeleteTicketResponse {}))
}

//! Visit recording, cooldown state, and the live cooldown feed.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use chrono::Utc;
use dine_store::{DineStore, VisitFilter};
use entities::VisitEvent;
use rpc_protocol::{
    CooldownStatus, CooldownStatusRequest, CooldownStatusResponse, ListVisitsRequest,
    ListVisitsResponse, RecordVisitRequest, RecordVisitResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use visits::{CooldownState, CooldownSubscription, format_remaining};

use crate::api::{parse_uuid, restaurant_names};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Converts an entity visit event to its RPC shape.
pub(crate) fn to_rpc_event(
    event: &VisitEvent,
    names: &HashMap<Uuid, String>,
) -> rpc_protocol::VisitEvent {
    rpc_protocol::VisitEvent {
        id: event.id.to_string(),
        user_id: event.user_id.to_string(),
        home_restaurant_id: event.home_restaurant_id.map(|id| id.to_string()),
        visited_restaurant_id: event.visited_restaurant_id.to_string(),
        visited_restaurant_name: names.get(&event.visited_restaurant_id).cloned(),
        recorded_at: event.recorded_at,
        cooldown_until: event.cooldown_until,
    }
}

/// Builds the wire cooldown status from a derived state, resolving the
/// visited restaurant's display name.
pub(crate) async fn to_cooldown_status<S: DineStore>(
    store: &S,
    state: &CooldownState,
) -> CooldownStatus {
    match state {
        CooldownState::Idle => CooldownStatus {
            in_cooldown: false,
            cooldown_until: None,
            visited_restaurant_id: None,
            visited_restaurant_name: None,
            remaining: None,
        },
        CooldownState::Active {
            until,
            visited_restaurant_id,
        } => {
            let visited_restaurant_name = match store.get_restaurant(*visited_restaurant_id).await
            {
                Ok(restaurant) => restaurant.map(|r| r.name),
                Err(error) => {
                    tracing::warn!(%error, "Failed to resolve restaurant name for cooldown status");
                    None
                }
            };
            CooldownStatus {
                in_cooldown: true,
                cooldown_until: Some(*until),
                visited_restaurant_id: Some(visited_restaurant_id.to_string()),
                visited_restaurant_name,
                remaining: state.remaining(Utc::now()).map(format_remaining),
            }
        }
    }
}

/// Records a confirmed dining selection for an approved employee.
///
/// The write itself never checks cooldown state; the response carries
/// the post-write status so the caller can reflect the lockout at once.
pub async fn record_visit<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RecordVisitRequest>,
) -> ServerResult<Json<RecordVisitResponse>> {
    let employee_id = parse_uuid(&request.employee_id, "employee_id")?;
    let restaurant_id = parse_uuid(&request.visited_restaurant_id, "visited_restaurant_id")?;

    let employee = state
        .store
        .get_employee(employee_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Employee not found".to_string()))?;
    if !employee.is_approved() {
        return Err(ServerError::PermissionDenied(
            "Employee is not approved for the discount program".to_string(),
        ));
    }

    // Verify the restaurant exists
    state
        .store
        .get_restaurant(restaurant_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;

    let event = state
        .recorder
        .record(employee.id, employee.home_restaurant_id, restaurant_id)
        .await?;

    let latest = state.store.latest_visit(employee.id).await?;
    let cooldown_state = CooldownState::derive(latest.as_ref(), Utc::now());
    let cooldown = to_cooldown_status(state.store.as_ref(), &cooldown_state).await;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(RecordVisitResponse {
        event: to_rpc_event(&event, &names),
        cooldown,
    }))
}

/// Returns the current cooldown status for an employee.
pub async fn cooldown_status<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CooldownStatusRequest>,
) -> ServerResult<Json<CooldownStatusResponse>> {
    let employee_id = parse_uuid(&request.employee_id, "employee_id")?;

    let latest = state.store.latest_visit(employee_id).await?;
    let cooldown_state = CooldownState::derive(latest.as_ref(), Utc::now());
    let cooldown = to_cooldown_status(state.store.as_ref(), &cooldown_state).await;

    Ok(Json(CooldownStatusResponse { cooldown }))
}

/// Lists visit events, newest first, with an optional inclusive range.
pub async fn list_visits<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListVisitsRequest>,
) -> ServerResult<Json<ListVisitsResponse>> {
    let filter = VisitFilter {
        user_id: request
            .employee_id
            .as_deref()
            .map(|raw| parse_uuid(raw, "employee_id"))
            .transpose()?,
        start: request.start,
        end: request.end,
        limit: request.limit,
        offset: request.offset,
    };

    let events = state.store.list_visits(filter).await?;

    let names = restaurant_names(state.store.as_ref()).await?;
    Ok(Json(ListVisitsResponse {
        events: events.iter().map(|e| to_rpc_event(e, &names)).collect(),
    }))
}

/// Query parameters for the cooldown feed.
#[derive(Debug, Deserialize)]
pub struct SubscribeParams {
    pub employee_id: String,
}

/// WebSocket upgrade for the live cooldown feed.
///
/// Pushes the current status immediately, then once per state change:
/// on every visit append for the employee and on local expiry. The
/// per-second countdown text remains a client concern; the feed carries
/// state, not ticks.
pub async fn subscribe<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SubscribeParams>,
    ws: WebSocketUpgrade,
) -> ServerResult<Response> {
    let employee_id = parse_uuid(&params.employee_id, "employee_id")?;

    let subscription = state.cooldown.subscribe(employee_id).await?;
    let store = Arc::clone(&state.store);

    tracing::debug!(employee_id = %employee_id, "Cooldown feed subscribed");

    Ok(ws.on_upgrade(move |socket| run_cooldown_feed(socket, store, subscription)))
}

async fn run_cooldown_feed<S: DineStore>(
    mut socket: WebSocket,
    store: Arc<S>,
    mut subscription: CooldownSubscription,
) {
    let current = subscription.current();
    if !push_status(&mut socket, store.as_ref(), &current).await {
        return;
    }

    loop {
        tokio::select! {
            changed = subscription.changed() => match changed {
                Some(next) => {
                    if !push_status(&mut socket, store.as_ref(), &next).await {
                        break;
                    }
                }
                None => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    // Dropping the subscription also cancels it; being explicit keeps
    // the teardown visible.
    subscription.cancel();
}

async fn push_status<S: DineStore>(
    socket: &mut WebSocket,
    store: &S,
    state: &CooldownState,
) -> bool {
    let status = to_cooldown_status(store, state).await;
    let payload = match serde_json::to_string(&status) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::error!(%error, "Failed to serialize cooldown status");
            return false;
        }
    };
    socket.send(Message::Text(payload)).await.is_ok()
}

//! Traffic reporting API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use dine_store::DineStore;
use rpc_protocol::{
    TrafficFlow, TrafficFlowResponse, TrafficRangeRequest, VisitCount, VisitCountsResponse,
};
use visits::DateRange;

use crate::api::{require_manager, restaurant_names};
use crate::error::ServerResult;
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Visit counts per restaurant over an optional inclusive range.
/// Manager report.
pub async fn visit_counts<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<TrafficRangeRequest>,
) -> ServerResult<Json<VisitCountsResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let range = DateRange::new(request.start, request.end);
    let counts = state.traffic.visit_counts(range).await?;

    let names = restaurant_names(state.store.as_ref()).await?;
    let mut counts: Vec<VisitCount> = counts
        .into_iter()
        .map(|(restaurant_id, count)| VisitCount {
            restaurant_name: names.get(&restaurant_id).cloned(),
            restaurant_id: restaurant_id.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(Json(VisitCountsResponse { counts }))
}

/// Directed home-to-visited traffic flows over an optional inclusive
/// range, self-visits excluded. Manager report.
pub async fn traffic_flow<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<TrafficRangeRequest>,
) -> ServerResult<Json<TrafficFlowResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let range = DateRange::new(request.start, request.end);
    let flows = state.traffic.traffic_flow(range).await?;

    let names = restaurant_names(state.store.as_ref()).await?;
    let flows = flows
        .into_iter()
        .map(|flow| TrafficFlow {
            from_restaurant_name: names.get(&flow.from).cloned(),
            from_restaurant_id: flow.from.to_string(),
            to_restaurant_name: names.get(&flow.to).cloned(),
            to_restaurant_id: flow.to.to_string(),
            count: flow.count,
        })
        .collect();

    Ok(Json(TrafficFlowResponse { flows }))
}

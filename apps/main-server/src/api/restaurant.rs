//! Restaurant management API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use dine_store::DineStore;
use entities::Restaurant;
use rpc_protocol::{
    CreateRestaurantRequest, CreateRestaurantResponse, DeleteRestaurantRequest,
    DeleteRestaurantResponse, GetRestaurantRequest, GetRestaurantResponse, ListRestaurantsResponse,
    UpdateRestaurantRequest, UpdateRestaurantResponse,
};

use crate::api::{parse_uuid, require_manager};
use crate::error::{ServerError, ServerResult};
use crate::middleware::auth::AuthenticatedEmployee;
use crate::state::AppState;

/// Converts an entity restaurant to its RPC shape.
pub(crate) fn to_rpc_restaurant(restaurant: &Restaurant) -> rpc_protocol::Restaurant {
    rpc_protocol::Restaurant {
        id: restaurant.id.to_string(),
        name: restaurant.name.clone(),
        location: restaurant.location.clone(),
        created_at: restaurant.created_at,
        updated_at: restaurant.updated_at,
    }
}

/// Creates a new restaurant.
pub async fn create_restaurant<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<CreateRestaurantRequest>,
) -> ServerResult<Json<CreateRestaurantResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    if request.name.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "Restaurant name is required".to_string(),
        ));
    }

    let mut restaurant = Restaurant::new(request.name);
    if let Some(location) = request.location {
        restaurant = restaurant.with_location(location);
    }

    let restaurant = state.store.create_restaurant(restaurant).await?;

    tracing::info!(restaurant_id = %restaurant.id, "Restaurant created");

    Ok(Json(CreateRestaurantResponse {
        restaurant: to_rpc_restaurant(&restaurant),
    }))
}

/// Gets a restaurant by ID.
pub async fn get_restaurant<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetRestaurantRequest>,
) -> ServerResult<Json<GetRestaurantResponse>> {
    let id = parse_uuid(&request.restaurant_id, "restaurant_id")?;

    let restaurant = state
        .store
        .get_restaurant(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;

    Ok(Json(GetRestaurantResponse {
        restaurant: to_rpc_restaurant(&restaurant),
    }))
}

/// Lists all restaurants.
pub async fn list_restaurants<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<ListRestaurantsResponse>> {
    let restaurants = state.store.list_restaurants().await?;

    Ok(Json(ListRestaurantsResponse {
        restaurants: restaurants.iter().map(to_rpc_restaurant).collect(),
    }))
}

/// Updates a restaurant's name or location.
pub async fn update_restaurant<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> ServerResult<Json<UpdateRestaurantResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let id = parse_uuid(&request.restaurant_id, "restaurant_id")?;

    let mut restaurant = state
        .store
        .get_restaurant(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Restaurant not found".to_string()))?;

    if let Some(name) = request.name {
        restaurant.name = name;
    }
    if let Some(location) = request.location {
        restaurant.location = Some(location);
    }
    restaurant.updated_at = chrono::Utc::now();

    let restaurant = state.store.update_restaurant(restaurant).await?;

    Ok(Json(UpdateRestaurantResponse {
        restaurant: to_rpc_restaurant(&restaurant),
    }))
}

/// Deletes a restaurant.
pub async fn delete_restaurant<S: DineStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    actor: Option<Extension<AuthenticatedEmployee>>,
    Json(request): Json<DeleteRestaurantRequest>,
) -> ServerResult<Json<DeleteRestaurantResponse>> {
    require_manager(actor.as_ref().map(|ext| &ext.0))?;

    let id = parse_uuid(&request.restaurant_id, "restaurant_id")?;
    state.store.delete_restaurant(id).await?;

    tracing::info!(restaurant_id = %id, "Restaurant deleted");

    Ok(Json(DeleteRestaurantResponse {}))
}

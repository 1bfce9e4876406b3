//! RPC response types.

use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// Restaurant Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantResponse {
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRestaurantResponse {
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRestaurantResponse {
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRestaurantResponse {}

// ============================================================================
// Employee Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    pub employees: Vec<Employee>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveEmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectEmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCardResponse {
    pub card: DiscountCard,
}

// ============================================================================
// Visit Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVisitResponse {
    pub event: VisitEvent,
    /// Post-write cooldown state, so the caller can reflect the lockout
    /// without waiting for its subscription.
    pub cooldown: CooldownStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownStatusResponse {
    pub cooldown: CooldownStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVisitsResponse {
    pub events: Vec<VisitEvent>,
}

// ============================================================================
// Traffic Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitCountsResponse {
    pub counts: Vec<VisitCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficFlowResponse {
    pub flows: Vec<TrafficFlow>,
}

// ============================================================================
// Ticket Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket: MaintenanceTicket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTicketResponse {
    pub ticket: MaintenanceTicket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<MaintenanceTicket>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTicketResponse {
    pub ticket: MaintenanceTicket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTicketResponse {
    pub ticket: MaintenanceTicket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTicketPhotoResponse {
    pub ticket: MaintenanceTicket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTicketResponse {}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub employee: Employee,
}

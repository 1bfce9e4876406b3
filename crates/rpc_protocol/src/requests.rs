//! RPC request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// Restaurant Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRestaurantRequest {
    pub restaurant_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub restaurant_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRestaurantRequest {
    pub restaurant_id: String,
}

// ============================================================================
// Employee Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    pub email: String,
    pub name: Option<String>,
    pub home_restaurant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEmployeeRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEmployeesRequest {
    pub home_restaurant_id: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveEmployeeRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectEmployeeRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub employee_id: String,
    pub name: Option<String>,
    pub home_restaurant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCardRequest {
    pub employee_id: String,
}

// ============================================================================
// Visit Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVisitRequest {
    pub employee_id: String,
    pub visited_restaurant_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownStatusRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVisitsRequest {
    pub employee_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ============================================================================
// Traffic Requests
// ============================================================================

/// Inclusive date range shared by both traffic reports. Callers wanting
/// calendar-day granularity normalize `end` to end of day themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRangeRequest {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// ============================================================================
// Ticket Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub restaurant_id: String,
    pub reported_by: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTicketRequest {
    pub ticket_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTicketsRequest {
    pub restaurant_id: Option<String>,
    pub status: Option<TicketStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTicketRequest {
    pub ticket_id: String,
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTicketRequest {
    pub ticket_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTicketPhotoRequest {
    pub ticket_id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTicketRequest {
    pub ticket_id: String,
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

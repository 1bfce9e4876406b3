//! Wire types shared by requests and responses.
//!
//! All identifiers travel as strings; restaurant display names are
//! resolved server-side and attached next to the stable id, so clients
//! never key anything by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval status of an employee account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Pending,
    Approved,
    Rejected,
}

/// Role of an employee within the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Staff,
    Manager,
}

/// Status of a maintenance ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Scheduled,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub home_restaurant_id: Option<String>,
    pub home_restaurant_name: Option<String>,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitEvent {
    pub id: String,
    pub user_id: String,
    pub home_restaurant_id: Option<String>,
    pub visited_restaurant_id: String,
    pub visited_restaurant_name: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub cooldown_until: DateTime<Utc>,
}

/// Live cooldown state for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownStatus {
    pub in_cooldown: bool,
    pub cooldown_until: Option<DateTime<Utc>>,
    pub visited_restaurant_id: Option<String>,
    pub visited_restaurant_name: Option<String>,
    /// Remaining window rendered `M:SS`, present while in cooldown.
    pub remaining: Option<String>,
}

/// Display payload for the time-stamped staff discount card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCard {
    pub employee_id: String,
    pub employee_name: String,
    pub home_restaurant_name: Option<String>,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPhoto {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    pub id: String,
    pub restaurant_id: String,
    pub reported_by: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub photos: Vec<TicketPhoto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visit tally for one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitCount {
    pub restaurant_id: String,
    pub restaurant_name: Option<String>,
    pub count: u64,
}

/// One directed edge of the traffic flow report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficFlow {
    pub from_restaurant_id: String,
    pub from_restaurant_name: Option<String>,
    pub to_restaurant_id: String,
    pub to_restaurant_name: Option<String>,
    pub count: u64,
}

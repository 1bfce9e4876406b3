//! Store trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{
    Employee, EmployeeStatus, MaintenanceTicket, Restaurant, TicketPhoto, TicketStatus, VisitEvent,
};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::DineStoreResult;

/// Capacity of the visit write feed. A lagging receiver resynchronizes
/// from the store, so the buffer only needs to ride out short stalls.
pub(crate) const VISIT_FEED_CAPACITY: usize = 256;

/// Filter options for listing employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Filter by home restaurant ID.
    pub home_restaurant_id: Option<Uuid>,
    /// Filter by approval status.
    pub status: Option<EmployeeStatus>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Filter options for listing visit events.
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    /// Filter by the employee who recorded the visit.
    pub user_id: Option<Uuid>,
    /// Inclusive lower bound on `recorded_at`.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `recorded_at`.
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl VisitFilter {
    /// Returns true if `recorded_at` falls inside the range; both bounds
    /// are inclusive and either may be absent.
    pub fn contains(&self, recorded_at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| recorded_at >= start)
            && self.end.is_none_or(|end| recorded_at <= end)
    }
}

/// Filter options for listing maintenance tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Filter by restaurant ID.
    pub restaurant_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Trait for DinePass storage operations.
#[async_trait]
pub trait DineStore: Send + Sync {
    // =========================================================================
    // Restaurant operations
    // =========================================================================

    /// Creates a new restaurant.
    async fn create_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant>;

    /// Gets a restaurant by ID.
    async fn get_restaurant(&self, id: Uuid) -> DineStoreResult<Option<Restaurant>>;

    /// Lists all restaurants.
    async fn list_restaurants(&self) -> DineStoreResult<Vec<Restaurant>>;

    /// Updates a restaurant.
    async fn update_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant>;

    /// Deletes a restaurant.
    async fn delete_restaurant(&self, id: Uuid) -> DineStoreResult<()>;

    // =========================================================================
    // Employee operations
    // =========================================================================

    /// Creates a new employee.
    async fn create_employee(&self, employee: Employee) -> DineStoreResult<Employee>;

    /// Gets an employee by ID.
    async fn get_employee(&self, id: Uuid) -> DineStoreResult<Option<Employee>>;

    /// Gets an employee by email.
    async fn get_employee_by_email(&self, email: &str) -> DineStoreResult<Option<Employee>>;

    /// Lists employees with optional filters.
    async fn list_employees(&self, filter: EmployeeFilter) -> DineStoreResult<(Vec<Employee>, u32)>;

    /// Updates an employee.
    async fn update_employee(&self, employee: Employee) -> DineStoreResult<Employee>;

    /// Deletes an employee.
    async fn delete_employee(&self, id: Uuid) -> DineStoreResult<()>;

    // =========================================================================
    // Visit operations (append-only)
    // =========================================================================

    /// Appends a visit event. Exactly one record is inserted; existing
    /// events are never touched. Every successful append is emitted on
    /// the visit feed.
    async fn append_visit(&self, event: VisitEvent) -> DineStoreResult<VisitEvent>;

    /// Gets the event with the greatest `cooldown_until` for a user.
    async fn latest_visit(&self, user_id: Uuid) -> DineStoreResult<Option<VisitEvent>>;

    /// Lists visit events with optional filters, newest first.
    async fn list_visits(&self, filter: VisitFilter) -> DineStoreResult<Vec<VisitEvent>>;

    /// Subscribes to the visit write feed. The feed fires once per
    /// append and never on wall-clock expiry.
    fn subscribe_visits(&self) -> broadcast::Receiver<VisitEvent>;

    // =========================================================================
    // Maintenance ticket operations
    // =========================================================================

    /// Creates a new maintenance ticket.
    async fn create_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket>;

    /// Gets a ticket by ID.
    async fn get_ticket(&self, id: Uuid) -> DineStoreResult<Option<MaintenanceTicket>>;

    /// Lists tickets with optional filters.
    async fn list_tickets(
        &self,
        filter: TicketFilter,
    ) -> DineStoreResult<(Vec<MaintenanceTicket>, u32)>;

    /// Updates a ticket.
    async fn update_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket>;

    /// Deletes a ticket.
    async fn delete_ticket(&self, id: Uuid) -> DineStoreResult<()>;

    /// Attaches a photo record to a ticket and returns the updated
    /// ticket.
    async fn add_ticket_photo(
        &self,
        ticket_id: Uuid,
        photo: TicketPhoto,
    ) -> DineStoreResult<MaintenanceTicket>;
}

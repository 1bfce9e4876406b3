//! In-memory store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Employee, MaintenanceTicket, Restaurant, TicketPhoto, VisitEvent};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::{
    traits::VISIT_FEED_CAPACITY, DineStore, DineStoreError, DineStoreResult, EmployeeFilter,
    TicketFilter, VisitFilter,
};

/// In-memory store for tests and ephemeral deployments.
#[derive(Debug)]
pub struct MemoryStore {
    restaurants: Arc<RwLock<HashMap<Uuid, Restaurant>>>,
    employees: Arc<RwLock<HashMap<Uuid, Employee>>>,
    visits: Arc<RwLock<HashMap<Uuid, VisitEvent>>>,
    tickets: Arc<RwLock<HashMap<Uuid, MaintenanceTicket>>>,
    visit_feed: broadcast::Sender<VisitEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        let (visit_feed, _) = broadcast::channel(VISIT_FEED_CAPACITY);
        Self {
            restaurants: Arc::new(RwLock::new(HashMap::new())),
            employees: Arc::new(RwLock::new(HashMap::new())),
            visits: Arc::new(RwLock::new(HashMap::new())),
            tickets: Arc::new(RwLock::new(HashMap::new())),
            visit_feed,
        }
    }
}

#[async_trait]
impl DineStore for MemoryStore {
    // =========================================================================
    // Restaurant operations
    // =========================================================================

    async fn create_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant> {
        let mut restaurants = self.restaurants.write().await;
        if restaurants.contains_key(&restaurant.id) {
            return Err(DineStoreError::already_exists(
                "Restaurant",
                restaurant.id.to_string(),
            ));
        }
        restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    async fn get_restaurant(&self, id: Uuid) -> DineStoreResult<Option<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.get(&id).cloned())
    }

    async fn list_restaurants(&self) -> DineStoreResult<Vec<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        let mut result: Vec<Restaurant> = restaurants.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn update_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant> {
        let mut restaurants = self.restaurants.write().await;
        if !restaurants.contains_key(&restaurant.id) {
            return Err(DineStoreError::not_found(
                "Restaurant",
                restaurant.id.to_string(),
            ));
        }
        restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    async fn delete_restaurant(&self, id: Uuid) -> DineStoreResult<()> {
        let mut restaurants = self.restaurants.write().await;
        if restaurants.remove(&id).is_none() {
            return Err(DineStoreError::not_found("Restaurant", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Employee operations
    // =========================================================================

    async fn create_employee(&self, employee: Employee) -> DineStoreResult<Employee> {
        let mut employees = self.employees.write().await;
        if employees.contains_key(&employee.id) {
            return Err(DineStoreError::already_exists(
                "Employee",
                employee.id.to_string(),
            ));
        }
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, id: Uuid) -> DineStoreResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.get(&id).cloned())
    }

    async fn get_employee_by_email(&self, email: &str) -> DineStoreResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.values().find(|e| e.email == email).cloned())
    }

    async fn list_employees(
        &self,
        filter: EmployeeFilter,
    ) -> DineStoreResult<(Vec<Employee>, u32)> {
        let employees = self.employees.read().await;
        let mut result: Vec<Employee> = employees
            .values()
            .filter(|e| {
                filter
                    .home_restaurant_id
                    .is_none_or(|id| e.home_restaurant_id == Some(id))
                    && filter.status.is_none_or(|s| e.status == s)
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u32;

        if let Some(offset) = filter.offset {
            result = result.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            result = result.into_iter().take(limit as usize).collect();
        }

        Ok((result, total))
    }

    async fn update_employee(&self, employee: Employee) -> DineStoreResult<Employee> {
        let mut employees = self.employees.write().await;
        if !employees.contains_key(&employee.id) {
            return Err(DineStoreError::not_found(
                "Employee",
                employee.id.to_string(),
            ));
        }
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, id: Uuid) -> DineStoreResult<()> {
        let mut employees = self.employees.write().await;
        if employees.remove(&id).is_none() {
            return Err(DineStoreError::not_found("Employee", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Visit operations (append-only)
    // =========================================================================

    async fn append_visit(&self, event: VisitEvent) -> DineStoreResult<VisitEvent> {
        {
            let mut visits = self.visits.write().await;
            if visits.contains_key(&event.id) {
                return Err(DineStoreError::already_exists(
                    "VisitEvent",
                    event.id.to_string(),
                ));
            }
            visits.insert(event.id, event.clone());
        }
        // No receivers is fine; the feed only matters to live subscribers.
        let _ = self.visit_feed.send(event.clone());
        Ok(event)
    }

    async fn latest_visit(&self, user_id: Uuid) -> DineStoreResult<Option<VisitEvent>> {
        let visits = self.visits.read().await;
        Ok(visits
            .values()
            .filter(|v| v.user_id == user_id)
            .max_by_key(|v| v.cooldown_until)
            .cloned())
    }

    async fn list_visits(&self, filter: VisitFilter) -> DineStoreResult<Vec<VisitEvent>> {
        let visits = self.visits.read().await;
        let mut result: Vec<VisitEvent> = visits
            .values()
            .filter(|v| {
                filter.user_id.is_none_or(|id| v.user_id == id) && filter.contains(v.recorded_at)
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        if let Some(offset) = filter.offset {
            result = result.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            result = result.into_iter().take(limit as usize).collect();
        }

        Ok(result)
    }

    fn subscribe_visits(&self) -> broadcast::Receiver<VisitEvent> {
        self.visit_feed.subscribe()
    }

    // =========================================================================
    // Maintenance ticket operations
    // =========================================================================

    async fn create_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket> {
        let mut tickets = self.tickets.write().await;
        if tickets.contains_key(&ticket.id) {
            return Err(DineStoreError::already_exists(
                "MaintenanceTicket",
                ticket.id.to_string(),
            ));
        }
        tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn get_ticket(&self, id: Uuid) -> DineStoreResult<Option<MaintenanceTicket>> {
        let tickets = self.tickets.read().await;
        Ok(tickets.get(&id).cloned())
    }

    async fn list_tickets(
        &self,
        filter: TicketFilter,
    ) -> DineStoreResult<(Vec<MaintenanceTicket>, u32)> {
        let tickets = self.tickets.read().await;
        let mut result: Vec<MaintenanceTicket> = tickets
            .values()
            .filter(|t| {
                filter.restaurant_id.is_none_or(|id| t.restaurant_id == id)
                    && filter.status.is_none_or(|s| t.status == s)
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u32;

        if let Some(offset) = filter.offset {
            result = result.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            result = result.into_iter().take(limit as usize).collect();
        }

        Ok((result, total))
    }

    async fn update_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket> {
        let mut tickets = self.tickets.write().await;
        if !tickets.contains_key(&ticket.id) {
            return Err(DineStoreError::not_found(
                "MaintenanceTicket",
                ticket.id.to_string(),
            ));
        }
        tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: Uuid) -> DineStoreResult<()> {
        let mut tickets = self.tickets.write().await;
        if tickets.remove(&id).is_none() {
            return Err(DineStoreError::not_found("MaintenanceTicket", id.to_string()));
        }
        Ok(())
    }

    async fn add_ticket_photo(
        &self,
        ticket_id: Uuid,
        photo: TicketPhoto,
    ) -> DineStoreResult<MaintenanceTicket> {
        let mut tickets = self.tickets.write().await;
        let ticket = tickets
            .get_mut(&ticket_id)
            .ok_or_else(|| DineStoreError::not_found("MaintenanceTicket", ticket_id.to_string()))?;
        ticket.photos.push(photo);
        ticket.updated_at = chrono::Utc::now();
        Ok(ticket.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use entities::{EmployeeStatus, TicketStatus};

    use super::*;

    #[tokio::test]
    async fn test_restaurant_crud() {
        let store = MemoryStore::new();

        // Create
        let restaurant = Restaurant::new("Cora's");
        let created = store.create_restaurant(restaurant.clone()).await.unwrap();
        assert_eq!(created.name, "Cora's");

        // Get
        let fetched = store.get_restaurant(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Cora's");

        // List
        let restaurants = store.list_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 1);

        // Delete
        store.delete_restaurant(created.id).await.unwrap();
        assert!(store.get_restaurant(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_employee_filters() {
        let store = MemoryStore::new();
        let restaurant = store
            .create_restaurant(Restaurant::new("Cora's"))
            .await
            .unwrap();

        let mut approved = Employee::new("a@example.com").with_home_restaurant(restaurant.id);
        approved.status = EmployeeStatus::Approved;
        store.create_employee(approved).await.unwrap();
        store
            .create_employee(Employee::new("b@example.com"))
            .await
            .unwrap();

        let filter = EmployeeFilter {
            status: Some(EmployeeStatus::Approved),
            ..Default::default()
        };
        let (employees, total) = store.list_employees(filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(employees[0].email, "a@example.com");

        let by_email = store
            .get_employee_by_email("b@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.status, EmployeeStatus::Pending);
    }

    #[tokio::test]
    async fn test_latest_visit_picks_greatest_cooldown() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let restaurant_a = Uuid::new_v4();
        let restaurant_b = Uuid::new_v4();

        let older = VisitEvent::new(user_id, None, restaurant_a)
            .with_recorded_at(Utc::now() - Duration::hours(3));
        let newer = VisitEvent::new(user_id, None, restaurant_b);
        store.append_visit(older).await.unwrap();
        let newer = store.append_visit(newer).await.unwrap();

        let latest = store.latest_visit(user_id).await.unwrap().unwrap();
        assert_eq!(latest.id, newer.id);
        assert_eq!(latest.visited_restaurant_id, restaurant_b);

        // Other users have no events.
        assert!(store.latest_visit(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_visit_range_is_inclusive() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let restaurant_id = Uuid::new_v4();
        let start = Utc::now() - Duration::days(2);
        let end = Utc::now() - Duration::days(1);

        for recorded_at in [
            start,
            end,
            start - Duration::milliseconds(1),
            end + Duration::milliseconds(1),
        ] {
            let event =
                VisitEvent::new(user_id, None, restaurant_id).with_recorded_at(recorded_at);
            store.append_visit(event).await.unwrap();
        }

        let filter = VisitFilter {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };
        let in_range = store.list_visits(filter).await.unwrap();
        assert_eq!(in_range.len(), 2);
    }

    #[tokio::test]
    async fn test_append_emits_on_feed() {
        let store = MemoryStore::new();
        let mut feed = store.subscribe_visits();

        let event = VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4());
        let event = store.append_visit(event).await.unwrap();

        let observed = feed.recv().await.unwrap();
        assert_eq!(observed.id, event.id);
    }

    #[tokio::test]
    async fn test_duplicate_append_rejected() {
        let store = MemoryStore::new();
        let event = VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4());
        store.append_visit(event.clone()).await.unwrap();

        let result = store.append_visit(event).await;
        assert!(matches!(
            result,
            Err(DineStoreError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_ticket_photos() {
        let store = MemoryStore::new();
        let ticket = MaintenanceTicket::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Broken oven light",
            "Rear oven light flickers and dies.",
        );
        let ticket = store.create_ticket(ticket).await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);

        let updated = store
            .add_ticket_photo(ticket.id, TicketPhoto::new("oven.jpg", "image/jpeg", 120_000))
            .await
            .unwrap();
        assert_eq!(updated.photos.len(), 1);

        let fetched = store.get_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(fetched.photos.len(), 1);
    }
}

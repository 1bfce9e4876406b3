//! SQLite-backed store implementation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use entities::{
    Employee, EmployeeRole, EmployeeStatus, MaintenanceTicket, Restaurant, TicketPhoto,
    TicketStatus, VisitEvent,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    traits::VISIT_FEED_CAPACITY, DineStore, DineStoreError, DineStoreResult, EmployeeFilter,
    TicketFilter, VisitFilter,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS restaurants (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT,
    home_restaurant_id TEXT,
    role TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS visit_events (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    home_restaurant_id TEXT,
    visited_restaurant_id TEXT NOT NULL,
    recorded_at TEXT NOT NULL,
    cooldown_until TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_visit_events_user_cooldown
    ON visit_events (user_id, cooldown_until);

CREATE TABLE IF NOT EXISTS maintenance_tickets (
    id TEXT PRIMARY KEY,
    restaurant_id TEXT NOT NULL,
    reported_by TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    status TEXT NOT NULL,
    scheduled_for TEXT,
    resolved_at TEXT,
    photos TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Encodes a timestamp in fixed-width RFC 3339 so lexicographic ordering
/// in SQL matches chronological ordering.
fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_ts(raw: &str) -> DineStoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DineStoreError::Other(format!("invalid timestamp {raw}: {e}")))
}

fn decode_uuid(raw: &str) -> DineStoreResult<Uuid> {
    Uuid::from_str(raw).map_err(|e| DineStoreError::Other(format!("invalid uuid {raw}: {e}")))
}

fn restaurant_from_row(row: &SqliteRow) -> DineStoreResult<Restaurant> {
    Ok(Restaurant {
        id: decode_uuid(&row.try_get::<String, _>("id")?)?,
        name: row.try_get("name")?,
        location: row.try_get("location")?,
        created_at: decode_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: decode_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn employee_from_row(row: &SqliteRow) -> DineStoreResult<Employee> {
    let home: Option<String> = row.try_get("home_restaurant_id")?;
    let role: String = row.try_get("role")?;
    let status: String = row.try_get("status")?;
    Ok(Employee {
        id: decode_uuid(&row.try_get::<String, _>("id")?)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        home_restaurant_id: home.as_deref().map(decode_uuid).transpose()?,
        role: role.parse::<EmployeeRole>().map_err(DineStoreError::Other)?,
        status: status
            .parse::<EmployeeStatus>()
            .map_err(DineStoreError::Other)?,
        created_at: decode_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: decode_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn visit_from_row(row: &SqliteRow) -> DineStoreResult<VisitEvent> {
    let home: Option<String> = row.try_get("home_restaurant_id")?;
    Ok(VisitEvent {
        id: decode_uuid(&row.try_get::<String, _>("id")?)?,
        user_id: decode_uuid(&row.try_get::<String, _>("user_id")?)?,
        home_restaurant_id: home.as_deref().map(decode_uuid).transpose()?,
        visited_restaurant_id: decode_uuid(&row.try_get::<String, _>("visited_restaurant_id")?)?,
        recorded_at: decode_ts(&row.try_get::<String, _>("recorded_at")?)?,
        cooldown_until: decode_ts(&row.try_get::<String, _>("cooldown_until")?)?,
    })
}

fn ticket_from_row(row: &SqliteRow) -> DineStoreResult<MaintenanceTicket> {
    let status: String = row.try_get("status")?;
    let scheduled_for: Option<String> = row.try_get("scheduled_for")?;
    let resolved_at: Option<String> = row.try_get("resolved_at")?;
    let photos: String = row.try_get("photos")?;
    Ok(MaintenanceTicket {
        id: decode_uuid(&row.try_get::<String, _>("id")?)?,
        restaurant_id: decode_uuid(&row.try_get::<String, _>("restaurant_id")?)?,
        reported_by: decode_uuid(&row.try_get::<String, _>("reported_by")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: status
            .parse::<TicketStatus>()
            .map_err(DineStoreError::Other)?,
        scheduled_for: scheduled_for.as_deref().map(decode_ts).transpose()?,
        resolved_at: resolved_at.as_deref().map(decode_ts).transpose()?,
        photos: serde_json::from_str(&photos)?,
        created_at: decode_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: decode_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    visit_feed: broadcast::Sender<VisitEvent>,
}

impl SqliteStore {
    /// Opens the database at `url`, creating it and the schema if
    /// missing.
    pub async fn connect(url: &str) -> DineStoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(DineStoreError::Database)?
            .create_if_missing(true);
        // A single connection keeps in-memory databases coherent; this
        // store sees no concurrent write load worth pooling for.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        let (visit_feed, _) = broadcast::channel(VISIT_FEED_CAPACITY);
        Ok(Self { pool, visit_feed })
    }

    async fn exists(&self, table: &str, id: Uuid) -> DineStoreResult<bool> {
        // Table names are compile-time constants, never user input.
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl DineStore for SqliteStore {
    // =========================================================================
    // Restaurant operations
    // =========================================================================

    async fn create_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant> {
        if self.exists("restaurants", restaurant.id).await? {
            return Err(DineStoreError::already_exists(
                "Restaurant",
                restaurant.id.to_string(),
            ));
        }
        sqlx::query(
            "INSERT INTO restaurants (id, name, location, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(restaurant.id.to_string())
        .bind(&restaurant.name)
        .bind(&restaurant.location)
        .bind(encode_ts(restaurant.created_at))
        .bind(encode_ts(restaurant.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(restaurant)
    }

    async fn get_restaurant(&self, id: Uuid) -> DineStoreResult<Option<Restaurant>> {
        let row = sqlx::query("SELECT * FROM restaurants WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(restaurant_from_row).transpose()
    }

    async fn list_restaurants(&self) -> DineStoreResult<Vec<Restaurant>> {
        let rows = sqlx::query("SELECT * FROM restaurants ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(restaurant_from_row).collect()
    }

    async fn update_restaurant(&self, restaurant: Restaurant) -> DineStoreResult<Restaurant> {
        let result = sqlx::query(
            "UPDATE restaurants SET name = ?, location = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&restaurant.name)
        .bind(&restaurant.location)
        .bind(encode_ts(restaurant.updated_at))
        .bind(restaurant.id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found(
                "Restaurant",
                restaurant.id.to_string(),
            ));
        }
        Ok(restaurant)
    }

    async fn delete_restaurant(&self, id: Uuid) -> DineStoreResult<()> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found("Restaurant", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Employee operations
    // =========================================================================

    async fn create_employee(&self, employee: Employee) -> DineStoreResult<Employee> {
        if self.exists("employees", employee.id).await? {
            return Err(DineStoreError::already_exists(
                "Employee",
                employee.id.to_string(),
            ));
        }
        sqlx::query(
            "INSERT INTO employees \
             (id, email, name, home_restaurant_id, role, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(employee.id.to_string())
        .bind(&employee.email)
        .bind(&employee.name)
        .bind(employee.home_restaurant_id.map(|id| id.to_string()))
        .bind(employee.role.as_str())
        .bind(employee.status.as_str())
        .bind(encode_ts(employee.created_at))
        .bind(encode_ts(employee.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn get_employee(&self, id: Uuid) -> DineStoreResult<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn get_employee_by_email(&self, email: &str) -> DineStoreResult<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn list_employees(
        &self,
        filter: EmployeeFilter,
    ) -> DineStoreResult<(Vec<Employee>, u32)> {
        let home = filter.home_restaurant_id.map(|id| id.to_string());
        let status = filter.status.map(|s| s.as_str());

        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS total FROM employees \
             WHERE (? IS NULL OR home_restaurant_id = ?) AND (? IS NULL OR status = ?)",
        )
        .bind(&home)
        .bind(&home)
        .bind(status)
        .bind(status)
        .fetch_one(&self.pool)
        .await?
        .try_get("total")?;

        let rows = sqlx::query(
            "SELECT * FROM employees \
             WHERE (? IS NULL OR home_restaurant_id = ?) AND (? IS NULL OR status = ?) \
             ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(&home)
        .bind(&home)
        .bind(status)
        .bind(status)
        .bind(filter.limit.map(i64::from).unwrap_or(-1))
        .bind(i64::from(filter.offset.unwrap_or(0)))
        .fetch_all(&self.pool)
        .await?;

        let employees = rows
            .iter()
            .map(employee_from_row)
            .collect::<DineStoreResult<Vec<_>>>()?;
        Ok((employees, total as u32))
    }

    async fn update_employee(&self, employee: Employee) -> DineStoreResult<Employee> {
        let result = sqlx::query(
            "UPDATE employees SET email = ?, name = ?, home_restaurant_id = ?, role = ?, \
             status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&employee.email)
        .bind(&employee.name)
        .bind(employee.home_restaurant_id.map(|id| id.to_string()))
        .bind(employee.role.as_str())
        .bind(employee.status.as_str())
        .bind(encode_ts(employee.updated_at))
        .bind(employee.id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found(
                "Employee",
                employee.id.to_string(),
            ));
        }
        Ok(employee)
    }

    async fn delete_employee(&self, id: Uuid) -> DineStoreResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found("Employee", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Visit operations (append-only)
    // =========================================================================

    async fn append_visit(&self, event: VisitEvent) -> DineStoreResult<VisitEvent> {
        if self.exists("visit_events", event.id).await? {
            return Err(DineStoreError::already_exists(
                "VisitEvent",
                event.id.to_string(),
            ));
        }
        sqlx::query(
            "INSERT INTO visit_events \
             (id, user_id, home_restaurant_id, visited_restaurant_id, recorded_at, cooldown_until) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id.to_string())
        .bind(event.user_id.to_string())
        .bind(event.home_restaurant_id.map(|id| id.to_string()))
        .bind(event.visited_restaurant_id.to_string())
        .bind(encode_ts(event.recorded_at))
        .bind(encode_ts(event.cooldown_until))
        .execute(&self.pool)
        .await?;
        // No receivers is fine; the feed only matters to live subscribers.
        let _ = self.visit_feed.send(event.clone());
        Ok(event)
    }

    async fn latest_visit(&self, user_id: Uuid) -> DineStoreResult<Option<VisitEvent>> {
        let row = sqlx::query(
            "SELECT * FROM visit_events WHERE user_id = ? \
             ORDER BY cooldown_until DESC LIMIT 1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(visit_from_row).transpose()
    }

    async fn list_visits(&self, filter: VisitFilter) -> DineStoreResult<Vec<VisitEvent>> {
        let user = filter.user_id.map(|id| id.to_string());
        let start = filter.start.map(encode_ts);
        let end = filter.end.map(encode_ts);

        let rows = sqlx::query(
            "SELECT * FROM visit_events \
             WHERE (? IS NULL OR user_id = ?) \
               AND (? IS NULL OR recorded_at >= ?) \
               AND (? IS NULL OR recorded_at <= ?) \
             ORDER BY recorded_at DESC LIMIT ? OFFSET ?",
        )
        .bind(&user)
        .bind(&user)
        .bind(&start)
        .bind(&start)
        .bind(&end)
        .bind(&end)
        .bind(filter.limit.map(i64::from).unwrap_or(-1))
        .bind(i64::from(filter.offset.unwrap_or(0)))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(visit_from_row).collect()
    }

    fn subscribe_visits(&self) -> broadcast::Receiver<VisitEvent> {
        self.visit_feed.subscribe()
    }

    // =========================================================================
    // Maintenance ticket operations
    // =========================================================================

    async fn create_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket> {
        if self.exists("maintenance_tickets", ticket.id).await? {
            return Err(DineStoreError::already_exists(
                "MaintenanceTicket",
                ticket.id.to_string(),
            ));
        }
        sqlx::query(
            "INSERT INTO maintenance_tickets \
             (id, restaurant_id, reported_by, title, description, status, scheduled_for, \
              resolved_at, photos, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(ticket.id.to_string())
        .bind(ticket.restaurant_id.to_string())
        .bind(ticket.reported_by.to_string())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.scheduled_for.map(encode_ts))
        .bind(ticket.resolved_at.map(encode_ts))
        .bind(serde_json::to_string(&ticket.photos)?)
        .bind(encode_ts(ticket.created_at))
        .bind(encode_ts(ticket.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(ticket)
    }

    async fn get_ticket(&self, id: Uuid) -> DineStoreResult<Option<MaintenanceTicket>> {
        let row = sqlx::query("SELECT * FROM maintenance_tickets WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(ticket_from_row).transpose()
    }

    async fn list_tickets(
        &self,
        filter: TicketFilter,
    ) -> DineStoreResult<(Vec<MaintenanceTicket>, u32)> {
        let restaurant = filter.restaurant_id.map(|id| id.to_string());
        let status = filter.status.map(|s| s.as_str());

        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS total FROM maintenance_tickets \
             WHERE (? IS NULL OR restaurant_id = ?) AND (? IS NULL OR status = ?)",
        )
        .bind(&restaurant)
        .bind(&restaurant)
        .bind(status)
        .bind(status)
        .fetch_one(&self.pool)
        .await?
        .try_get("total")?;

        let rows = sqlx::query(
            "SELECT * FROM maintenance_tickets \
             WHERE (? IS NULL OR restaurant_id = ?) AND (? IS NULL OR status = ?) \
             ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(&restaurant)
        .bind(&restaurant)
        .bind(status)
        .bind(status)
        .bind(filter.limit.map(i64::from).unwrap_or(-1))
        .bind(i64::from(filter.offset.unwrap_or(0)))
        .fetch_all(&self.pool)
        .await?;

        let tickets = rows
            .iter()
            .map(ticket_from_row)
            .collect::<DineStoreResult<Vec<_>>>()?;
        Ok((tickets, total as u32))
    }

    async fn update_ticket(&self, ticket: MaintenanceTicket) -> DineStoreResult<MaintenanceTicket> {
        let result = sqlx::query(
            "UPDATE maintenance_tickets SET title = ?, description = ?, status = ?, \
             scheduled_for = ?, resolved_at = ?, photos = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.scheduled_for.map(encode_ts))
        .bind(ticket.resolved_at.map(encode_ts))
        .bind(serde_json::to_string(&ticket.photos)?)
        .bind(encode_ts(ticket.updated_at))
        .bind(ticket.id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found(
                "MaintenanceTicket",
                ticket.id.to_string(),
            ));
        }
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: Uuid) -> DineStoreResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_tickets WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DineStoreError::not_found("MaintenanceTicket", id.to_string()));
        }
        Ok(())
    }

    async fn add_ticket_photo(
        &self,
        ticket_id: Uuid,
        photo: TicketPhoto,
    ) -> DineStoreResult<MaintenanceTicket> {
        let mut ticket = self
            .get_ticket(ticket_id)
            .await?
            .ok_or_else(|| DineStoreError::not_found("MaintenanceTicket", ticket_id.to_string()))?;
        ticket.photos.push(photo);
        ticket.updated_at = Utc::now();
        self.update_ticket(ticket).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use entities::EmployeeStatus;

    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_restaurant_round_trip() {
        let store = store().await;

        let restaurant = Restaurant::new("Cora's").with_location("12 Harbour St");
        let created = store.create_restaurant(restaurant).await.unwrap();

        let fetched = store.get_restaurant(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Cora's");
        assert_eq!(fetched.location, Some("12 Harbour St".to_string()));

        store.delete_restaurant(created.id).await.unwrap();
        assert!(store.get_restaurant(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_employee_lookup_and_filters() {
        let store = store().await;

        let mut employee = Employee::new("mina@example.com").with_name("Mina");
        employee.status = EmployeeStatus::Approved;
        let employee = store.create_employee(employee).await.unwrap();
        store
            .create_employee(Employee::new("theo@example.com"))
            .await
            .unwrap();

        let by_email = store
            .get_employee_by_email("mina@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, employee.id);

        let filter = EmployeeFilter {
            status: Some(EmployeeStatus::Pending),
            ..Default::default()
        };
        let (pending, total) = store.list_employees(filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(pending[0].email, "theo@example.com");
    }

    #[tokio::test]
    async fn test_latest_visit_and_range() {
        let store = store().await;
        let user_id = Uuid::new_v4();
        let restaurant_id = Uuid::new_v4();

        let old = VisitEvent::new(user_id, None, restaurant_id)
            .with_recorded_at(Utc::now() - Duration::hours(5));
        let new = VisitEvent::new(user_id, Some(Uuid::new_v4()), restaurant_id);
        store.append_visit(old.clone()).await.unwrap();
        store.append_visit(new.clone()).await.unwrap();

        let latest = store.latest_visit(user_id).await.unwrap().unwrap();
        assert_eq!(latest.id, new.id);

        // Inclusive bounds catch the old event exactly.
        let filter = VisitFilter {
            user_id: Some(user_id),
            start: Some(old.recorded_at),
            end: Some(old.recorded_at),
            ..Default::default()
        };
        let in_range = store.list_visits(filter).await.unwrap();
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].id, old.id);
    }

    #[tokio::test]
    async fn test_duplicate_append_rejected() {
        let store = store().await;
        let event = VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4());
        store.append_visit(event.clone()).await.unwrap();

        let result = store.append_visit(event).await;
        assert!(matches!(result, Err(DineStoreError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_ticket_photos_survive_storage() {
        let store = store().await;

        let mut ticket = MaintenanceTicket::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Patio door sticks",
            "Sliding door to the patio jams halfway.",
        );
        ticket.schedule(Utc::now() + Duration::days(1));
        let ticket = store.create_ticket(ticket).await.unwrap();

        store
            .add_ticket_photo(ticket.id, TicketPhoto::new("door.jpg", "image/jpeg", 230_400))
            .await
            .unwrap();

        let fetched = store.get_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, entities::TicketStatus::Scheduled);
        assert_eq!(fetched.photos.len(), 1);
        assert_eq!(fetched.photos[0].file_name, "door.jpg");
    }
}

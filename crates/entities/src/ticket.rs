//! Maintenance ticket entity definitions.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a maintenance ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Filed, not yet scheduled.
    Open,
    /// A repair visit has been scheduled.
    Scheduled,
    /// Repair completed.
    Resolved,
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl TicketStatus {
    /// Returns the canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Scheduled => "scheduled",
            Self::Resolved => "resolved",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "scheduled" => Ok(Self::Scheduled),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown ticket status: {other}")),
        }
    }
}

/// Metadata for a photo attached to a ticket.
///
/// Byte storage is handled elsewhere; the ticket only carries the
/// attachment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPhoto {
    /// Unique identifier.
    pub id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// MIME content type.
    pub content_type: String,
    /// Size of the stored file in bytes.
    pub size_bytes: i64,
    /// When the photo was attached.
    pub uploaded_at: DateTime<Utc>,
}

impl TicketPhoto {
    /// Creates a new photo attachment record.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
            uploaded_at: Utc::now(),
        }
    }
}

/// A facility repair ticket filed against one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    /// Unique identifier.
    pub id: Uuid,
    /// Restaurant the ticket is filed against.
    pub restaurant_id: Uuid,
    /// Employee who filed the ticket.
    pub reported_by: Uuid,
    /// Short summary.
    pub title: String,
    /// Full description of the problem.
    pub description: String,
    /// Current status.
    pub status: TicketStatus,
    /// When the repair visit is scheduled, once set.
    pub scheduled_for: Option<DateTime<Utc>>,
    /// When the ticket was resolved, once resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Attached photos.
    pub photos: Vec<TicketPhoto>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceTicket {
    /// Creates a new open ticket.
    pub fn new(
        restaurant_id: Uuid,
        reported_by: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            restaurant_id,
            reported_by,
            title: title.into(),
            description: description.into(),
            status: TicketStatus::Open,
            scheduled_for: None,
            resolved_at: None,
            photos: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the ticket may move to `next`.
    ///
    /// Resolved tickets are terminal; open and scheduled tickets may be
    /// (re)scheduled or resolved.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        match (self.status, next) {
            (TicketStatus::Resolved, _) => false,
            (_, TicketStatus::Open) => false,
            (TicketStatus::Open | TicketStatus::Scheduled, TicketStatus::Scheduled) => true,
            (TicketStatus::Open | TicketStatus::Scheduled, TicketStatus::Resolved) => true,
        }
    }

    /// Schedules (or reschedules) the repair visit.
    pub fn schedule(&mut self, when: DateTime<Utc>) {
        self.status = TicketStatus::Scheduled;
        self.scheduled_for = Some(when);
        self.updated_at = Utc::now();
    }

    /// Marks the ticket resolved.
    pub fn resolve(&mut self) {
        let now = Utc::now();
        self.status = TicketStatus::Resolved;
        self.resolved_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ticket() -> MaintenanceTicket {
        MaintenanceTicket::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Walk-in fridge leaking",
            "Water pooling under the compressor every morning.",
        )
    }

    #[test]
    fn test_schedule_then_resolve() {
        let mut ticket = ticket();
        assert_eq!(ticket.status, TicketStatus::Open);

        let when = Utc::now() + Duration::days(2);
        assert!(ticket.can_transition_to(TicketStatus::Scheduled));
        ticket.schedule(when);
        assert_eq!(ticket.status, TicketStatus::Scheduled);
        assert_eq!(ticket.scheduled_for, Some(when));

        // Rescheduling stays allowed.
        assert!(ticket.can_transition_to(TicketStatus::Scheduled));

        assert!(ticket.can_transition_to(TicketStatus::Resolved));
        ticket.resolve();
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert!(ticket.resolved_at.is_some());
    }

    #[test]
    fn test_resolved_is_terminal() {
        let mut ticket = ticket();
        ticket.resolve();

        assert!(!ticket.can_transition_to(TicketStatus::Scheduled));
        assert!(!ticket.can_transition_to(TicketStatus::Resolved));
        assert!(!ticket.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn test_photo_attachment() {
        let mut ticket = ticket();
        ticket.photos.push(TicketPhoto::new(
            "fridge.jpg",
            "image/jpeg",
            482_113,
        ));

        assert_eq!(ticket.photos.len(), 1);
        assert_eq!(ticket.photos[0].content_type, "image/jpeg");
    }
}

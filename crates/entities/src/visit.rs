//! Visit event definitions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the lockout window that follows every recorded visit, in
/// minutes.
pub const COOLDOWN_MINUTES: i64 = 15;

/// Returns the lockout window as a duration.
pub fn cooldown_window() -> Duration {
    Duration::minutes(COOLDOWN_MINUTES)
}

/// An append-only record of one employee's confirmed dining selection.
///
/// Events are never updated or deleted. Lockout state is not stored
/// anywhere; it is derived at read time by comparing the newest event's
/// `cooldown_until` against the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    /// Unique identifier.
    pub id: Uuid,
    /// Employee who made the selection.
    pub user_id: Uuid,
    /// Restaurant employing the user at recording time, if known.
    pub home_restaurant_id: Option<Uuid>,
    /// Restaurant the user is dining at.
    pub visited_restaurant_id: Uuid,
    /// Moment the event was recorded.
    pub recorded_at: DateTime<Utc>,
    /// End of the lockout window: always `recorded_at` plus the cooldown
    /// window.
    pub cooldown_until: DateTime<Utc>,
}

impl VisitEvent {
    /// Creates a new visit event recorded at the current instant.
    pub fn new(
        user_id: Uuid,
        home_restaurant_id: Option<Uuid>,
        visited_restaurant_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            home_restaurant_id,
            visited_restaurant_id,
            recorded_at: now,
            cooldown_until: now + cooldown_window(),
        }
    }

    /// Overrides the recorded instant, keeping the lockout window
    /// anchored to it.
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self.cooldown_until = recorded_at + cooldown_window();
        self
    }

    /// Returns true if the lockout window is still open at `now`.
    pub fn in_cooldown(&self, now: DateTime<Utc>) -> bool {
        self.cooldown_until > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_window_is_exactly_fifteen_minutes() {
        let event = VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4());

        let window = event.cooldown_until - event.recorded_at;
        assert_eq!(window.num_milliseconds(), 900_000);
    }

    #[test]
    fn test_with_recorded_at_keeps_window_anchored() {
        let recorded_at = Utc::now() - Duration::hours(2);
        let event =
            VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4()).with_recorded_at(recorded_at);

        assert_eq!(event.recorded_at, recorded_at);
        assert_eq!(event.cooldown_until - event.recorded_at, cooldown_window());
    }

    #[test]
    fn test_in_cooldown_boundary() {
        let event = VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4());

        assert!(event.in_cooldown(event.recorded_at + Duration::minutes(10)));
        // The boundary instant itself is no longer in cooldown.
        assert!(!event.in_cooldown(event.cooldown_until));
        assert!(!event.in_cooldown(event.recorded_at + Duration::minutes(16)));
    }
}

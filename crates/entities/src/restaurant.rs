//! Restaurant entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant in the affiliated group.
///
/// Restaurants are referenced everywhere by their stable `id`; the
/// display name is resolved only at the presentation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address or free-form location hint.
    pub location: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Creates a new restaurant.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_creation() {
        let restaurant = Restaurant::new("Cora's").with_location("12 Harbour St");

        assert_eq!(restaurant.name, "Cora's");
        assert_eq!(restaurant.location, Some("12 Harbour St".to_string()));
    }
}

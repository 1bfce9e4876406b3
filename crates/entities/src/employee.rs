//! Employee entity definitions.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval status of an employee account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Registered, awaiting manager approval.
    Pending,
    /// Approved for the discount program.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl EmployeeStatus {
    /// Returns the canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown employee status: {other}")),
        }
    }
}

/// Role of an employee within the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Regular staff member.
    Staff,
    /// Manager; may approve employees and read traffic reports.
    Manager,
}

impl Default for EmployeeRole {
    fn default() -> Self {
        Self::Staff
    }
}

impl EmployeeRole {
    /// Returns the canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
        }
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown employee role: {other}")),
        }
    }
}

/// An employee of one of the affiliated restaurants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Restaurant employing this person, once assigned.
    pub home_restaurant_id: Option<Uuid>,
    /// Role within the group.
    pub role: EmployeeRole,
    /// Approval status.
    pub status: EmployeeStatus,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a new employee, pending approval.
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: None,
            home_restaurant_id: None,
            role: EmployeeRole::Staff,
            status: EmployeeStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the home restaurant.
    pub fn with_home_restaurant(mut self, restaurant_id: Uuid) -> Self {
        self.home_restaurant_id = Some(restaurant_id);
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: EmployeeRole) -> Self {
        self.role = role;
        self
    }

    /// Returns true once a manager has approved this employee.
    pub fn is_approved(&self) -> bool {
        self.status == EmployeeStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_creation() {
        let restaurant_id = Uuid::new_v4();
        let employee = Employee::new("mina@example.com")
            .with_name("Mina")
            .with_home_restaurant(restaurant_id);

        assert_eq!(employee.email, "mina@example.com");
        assert_eq!(employee.name, Some("Mina".to_string()));
        assert_eq!(employee.home_restaurant_id, Some(restaurant_id));
        assert_eq!(employee.status, EmployeeStatus::Pending);
        assert!(!employee.is_approved());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EmployeeStatus::Pending,
            EmployeeStatus::Approved,
            EmployeeStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<EmployeeStatus>(), Ok(status));
        }
        assert!("owner".parse::<EmployeeStatus>().is_err());
    }
}

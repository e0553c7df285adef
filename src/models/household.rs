//! Household model and its service state machine
//!
//! ```text
//! waiting --begin--> in-service --commit--> served
//!    |
//!    +--cancel--> cancelled
//! ```
//!
//! `served` and `cancelled` are terminal. Households stay in the collection
//! after leaving the active queue so the day's history is kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::HouseholdId;
use crate::error::{PantryError, PantryResult};

/// Where a household is in the service flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseholdStatus {
    Waiting,
    InService,
    Served,
    Cancelled,
}

impl HouseholdStatus {
    pub fn can_transition_to(self, next: HouseholdStatus) -> bool {
        use HouseholdStatus::*;
        matches!(
            (self, next),
            (Waiting, InService) | (InService, Served) | (Waiting, Cancelled)
        )
    }

    /// Waiting or in service
    pub fn is_active(self) -> bool {
        matches!(self, HouseholdStatus::Waiting | HouseholdStatus::InService)
    }
}

impl fmt::Display for HouseholdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HouseholdStatus::Waiting => "waiting",
            HouseholdStatus::InService => "in-service",
            HouseholdStatus::Served => "served",
            HouseholdStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// A household signed in for service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: HouseholdId,
    pub name: String,
    /// Number of people in the household
    pub size: u32,
    pub arrived_at: DateTime<Utc>,
    pub status: HouseholdStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_at: Option<DateTime<Utc>>,
}

impl Household {
    /// Sign a household in; it starts out waiting
    pub fn new(name: &str, size: u32) -> PantryResult<Self> {
        let household = Self {
            id: HouseholdId::new(),
            name: name.trim().to_string(),
            size,
            arrived_at: Utc::now(),
            status: HouseholdStatus::Waiting,
            served_at: None,
        };
        household.validate()?;
        Ok(household)
    }

    pub fn validate(&self) -> PantryResult<()> {
        if self.name.trim().is_empty() {
            return Err(PantryError::Validation(
                "Household name cannot be empty".into(),
            ));
        }
        if self.size < 1 {
            return Err(PantryError::Validation(
                "Household size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Return the household moved to `next`, or a state error if the move
    /// is not allowed from the current status
    pub fn transition(&self, next: HouseholdStatus) -> PantryResult<Self> {
        if !self.status.can_transition_to(next) {
            return Err(PantryError::State(format!(
                "Household '{}' is {}; cannot move to {}",
                self.name, self.status, next
            )));
        }

        let served_at = if next == HouseholdStatus::Served {
            Some(Utc::now())
        } else {
            self.served_at
        };

        Ok(Self {
            status: next,
            served_at,
            ..self.clone()
        })
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Check if this household matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Household {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {}, {})", self.name, self.size, self.status)
    }
}

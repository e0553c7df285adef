//! Donation model
//!
//! A donation is either a batch of food items or a sum of money. Records are
//! appended to the donation log and never edited.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DonationId;
use super::inventory::ItemLine;
use super::money::Money;
use crate::error::{PantryError, PantryResult};

/// One donated food line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonatedItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

impl DonatedItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            expires_on: None,
        }
    }

    pub fn expiring(mut self, date: NaiveDate) -> Self {
        self.expires_on = Some(date);
        self
    }

    fn validate(&self) -> PantryResult<()> {
        ItemLine::new(self.name.clone(), self.quantity).validate()
    }
}

/// What was donated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DonationDetails {
    Food { items: Vec<DonatedItem> },
    Money { amount: Money },
}

/// A single donation event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,

    #[serde(flatten)]
    pub details: DonationDetails,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,
}

impl Donation {
    /// Create a food donation
    ///
    /// Item names are trimmed; at least one line is required and every line
    /// needs a positive quantity.
    pub fn food(items: Vec<DonatedItem>, donor: Option<String>) -> PantryResult<Self> {
        let items = items
            .into_iter()
            .map(|item| DonatedItem {
                name: item.name.trim().to_string(),
                ..item
            })
            .collect();

        let donation = Self {
            id: DonationId::new(),
            details: DonationDetails::Food { items },
            timestamp: Utc::now(),
            donor: clean_donor(donor),
        };
        donation.validate()?;
        Ok(donation)
    }

    /// Create a money donation
    pub fn money(amount: Money, donor: Option<String>) -> PantryResult<Self> {
        let donation = Self {
            id: DonationId::new(),
            details: DonationDetails::Money { amount },
            timestamp: Utc::now(),
            donor: clean_donor(donor),
        };
        donation.validate()?;
        Ok(donation)
    }

    /// Check the record's details, as constructors do
    ///
    /// Also applied to records read back from disk.
    pub fn validate(&self) -> PantryResult<()> {
        match &self.details {
            DonationDetails::Food { items } => {
                if items.is_empty() {
                    return Err(PantryError::Validation(
                        "A food donation must list at least one item".into(),
                    ));
                }
                items.iter().try_for_each(DonatedItem::validate)
            }
            DonationDetails::Money { amount } if !amount.is_positive() => {
                Err(PantryError::Validation(format!(
                    "Donation amount must be positive, got {}",
                    amount
                )))
            }
            DonationDetails::Money { .. } => Ok(()),
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self.details, DonationDetails::Food { .. })
    }

    /// Donated items (empty for money donations)
    pub fn items(&self) -> &[DonatedItem] {
        match &self.details {
            DonationDetails::Food { items } => items,
            DonationDetails::Money { .. } => &[],
        }
    }

    /// Donated amount (`None` for food donations)
    pub fn amount(&self) -> Option<Money> {
        match self.details {
            DonationDetails::Money { amount } => Some(amount),
            DonationDetails::Food { .. } => None,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self.details {
            DonationDetails::Food { .. } => "Food",
            DonationDetails::Money { .. } => "Money",
        }
    }

    /// Short human-readable description of what was given
    pub fn summary(&self) -> String {
        match &self.details {
            DonationDetails::Food { items } => items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.name))
                .collect::<Vec<_>>()
                .join(", "),
            DonationDetails::Money { amount } => amount.to_string(),
        }
    }
}

impl fmt::Display for Donation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} donation from {}: {}",
            self.kind_label(),
            self.donor.as_deref().unwrap_or("anonymous"),
            self.summary()
        )
    }
}

fn clean_donor(donor: Option<String>) -> Option<String> {
    donor
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

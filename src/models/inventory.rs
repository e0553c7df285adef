//! Inventory item model
//!
//! An item is identified by its name, compared case-insensitively. Quantities
//! are unsigned so stock can never go below zero; changing stock produces a
//! new value that replaces the old one in the inventory collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PantryError, PantryResult};

/// Longest accepted item name
pub const MAX_NAME_LEN: usize = 100;

/// One (item name, quantity) pair in a cart or distribution record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLine {
    pub name: String,
    pub quantity: u32,
}

impl ItemLine {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Check the line has a usable name and a positive quantity
    pub fn validate(&self) -> PantryResult<()> {
        validate_item_name(&self.name)?;
        if self.quantity == 0 {
            return Err(PantryError::Validation(format!(
                "Quantity for '{}' must be positive",
                self.name.trim()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ItemLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.name)
    }
}

/// An item held by the pantry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Item name, with the casing it was first recorded under
    pub name: String,

    /// Units currently on the shelf
    pub quantity: u32,

    /// Unit or category label ("cans", "lb", "produce")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Earliest expiration date among stock received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,

    /// Cumulative quantity handed out; reconciled against distribution history
    #[serde(default)]
    pub distributed_total: u64,
}

impl InventoryItem {
    pub fn validate(&self) -> PantryResult<()> {
        validate_item_name(&self.name)
    }

    /// Create a new item
    pub fn new(name: &str, quantity: u32) -> PantryResult<Self> {
        validate_item_name(name)?;
        Ok(Self {
            name: name.trim().to_string(),
            quantity,
            unit: None,
            expires_on: None,
            distributed_total: 0,
        })
    }

    /// Normalize an item name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this item matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// A copy with `quantity` more units; keeps the earlier expiration date
    pub fn restocked(&self, quantity: u32, expires_on: Option<NaiveDate>) -> PantryResult<Self> {
        let new_quantity = self.quantity.checked_add(quantity).ok_or_else(|| {
            PantryError::Validation(format!("Quantity overflow for '{}'", self.name))
        })?;

        let expires_on = match (self.expires_on, expires_on) {
            (Some(current), Some(incoming)) => Some(current.min(incoming)),
            (current, incoming) => current.or(incoming),
        };

        Ok(Self {
            quantity: new_quantity,
            expires_on,
            ..self.clone()
        })
    }

    /// A copy with `quantity` fewer units
    pub fn withdrawn(&self, quantity: u32) -> PantryResult<Self> {
        let new_quantity =
            self.quantity
                .checked_sub(quantity)
                .ok_or_else(|| PantryError::InsufficientStock {
                    item: self.name.clone(),
                    requested: quantity,
                    available: self.quantity,
                })?;

        Ok(Self {
            quantity: new_quantity,
            distributed_total: self.distributed_total + u64::from(quantity),
            ..self.clone()
        })
    }

    /// A copy labelled with `unit`
    pub fn with_unit(&self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        Self {
            unit: if unit.trim().is_empty() {
                None
            } else {
                Some(unit.trim().to_string())
            },
            ..self.clone()
        }
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} ({} {})", self.name, self.quantity, unit),
            None => write!(f, "{} ({})", self.name, self.quantity),
        }
    }
}

/// Reject blank or overlong item names
pub fn validate_item_name(name: &str) -> PantryResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PantryError::Validation("Item name cannot be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(PantryError::Validation(format!(
            "Item name too long ({} chars, max {})",
            trimmed.len(),
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

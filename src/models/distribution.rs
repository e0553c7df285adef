//! Distribution record model
//!
//! One completed checkout of a cart to a household.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::household::Household;
use super::ids::{DistributionId, HouseholdId};
use super::inventory::ItemLine;
use crate::error::{PantryError, PantryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRecord {
    pub id: DistributionId,
    pub household_id: HouseholdId,
    /// Copy of the household name at the time of distribution
    #[serde(default)]
    pub household_name: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<ItemLine>,
}

impl DistributionRecord {
    pub fn new(household: &Household, items: Vec<ItemLine>) -> PantryResult<Self> {
        let record = Self {
            id: DistributionId::new(),
            household_id: household.id,
            household_name: household.name.clone(),
            timestamp: Utc::now(),
            items,
        };
        record.validate()?;
        Ok(record)
    }

    /// At least one line, each with a name and a positive quantity
    pub fn validate(&self) -> PantryResult<()> {
        if self.items.is_empty() {
            return Err(PantryError::Validation(
                "A distribution must include at least one item".into(),
            ));
        }
        self.items.iter().try_for_each(ItemLine::validate)
    }

    /// Total units handed out in this record
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn summary(&self) -> String {
        self.items
            .iter()
            .map(ItemLine::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let household = Household::new("Smith", 3).unwrap();
        let record = DistributionRecord::new(
            &household,
            vec![ItemLine::new("Rice", 9), ItemLine::new("Beans", 2)],
        )
        .unwrap();

        assert_eq!(record.household_id, household.id);
        assert_eq!(record.household_name, "Smith");
        assert_eq!(record.total_quantity(), 11);
        assert_eq!(record.summary(), "9x Rice, 2x Beans");
    }

    #[test]
    fn test_empty_record_rejected() {
        let household = Household::new("Smith", 3).unwrap();
        assert!(DistributionRecord::new(&household, vec![])
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_serialized_shape() {
        let household = Household::new("Smith", 3).unwrap();
        let record = DistributionRecord::new(&household, vec![ItemLine::new("Rice", 9)]).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["householdId"], household.id.as_uuid().to_string());
        assert_eq!(json["items"][0]["name"], "Rice");
        assert_eq!(json["items"][0]["quantity"], 9);
        assert!(json.get("timestamp").is_some());
    }
}

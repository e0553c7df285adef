//! Cart staging and distribution checkout

use super::pantry::{Changes, PantryManager};
use crate::error::{PantryError, PantryResult};
use crate::models::{Cart, DistributionRecord, HouseholdId, HouseholdStatus, ItemLine};

impl PantryManager {
    /// Stage `quantity` of an item in `cart`
    ///
    /// Checks against what is on hand less what this cart already holds.
    /// Nothing is persisted.
    pub fn add_to_cart(&self, cart: &mut Cart, item_name: &str, quantity: u32) -> PantryResult<()> {
        if quantity == 0 {
            return Err(PantryError::Validation(
                "Cart quantity must be positive".into(),
            ));
        }

        let item = self
            .find_item(item_name)
            .ok_or_else(|| PantryError::item_not_found(item_name.trim()))?;

        let available = item.quantity.saturating_sub(cart.staged_quantity(&item.name));
        if quantity > available {
            return Err(PantryError::InsufficientStock {
                item: item.name.clone(),
                requested: quantity,
                available,
            });
        }

        cart.stage(&item.name, quantity);
        Ok(())
    }

    /// Check out `cart` to an in-service household
    ///
    /// Every line is validated again against current stock; if any line
    /// fails nothing changes. On success inventory is decremented, one
    /// distribution record is appended and the household is marked served.
    /// Inventory is written first, then the record, then the household list.
    pub fn commit_distribution(
        &mut self,
        household_id: HouseholdId,
        cart: &Cart,
    ) -> PantryResult<DistributionRecord> {
        let index = self.household_index(household_id)?;
        let household = &self.households[index];
        if household.status != HouseholdStatus::InService {
            return Err(PantryError::State(format!(
                "Household '{}' is {}; distribution has not begun",
                household.name, household.status
            )));
        }
        let served = household.transition(HouseholdStatus::Served)?;

        if cart.is_empty() {
            return Err(PantryError::Validation("Cart is empty".into()));
        }

        let mut inventory = self.inventory.clone();
        let mut lines = Vec::with_capacity(cart.len());
        for line in cart.lines() {
            let item_index = Self::item_index(&inventory, &line.name)
                .ok_or_else(|| PantryError::item_not_found(line.name.clone()))?;
            inventory[item_index] = inventory[item_index].withdrawn(line.quantity)?;
            lines.push(ItemLine::new(inventory[item_index].name.clone(), line.quantity));
        }

        let record = DistributionRecord::new(&served, lines)?;

        let mut distributions = self.distributions.clone();
        distributions.push(record.clone());

        let mut households = self.households.clone();
        households[index] = served;

        self.commit(Changes {
            inventory: Some(inventory),
            distributions: Some(distributions),
            households: Some(households),
            ..Default::default()
        })?;

        tracing::info!(
            distribution = %record.id,
            household = %household_id,
            units = record.total_quantity(),
            "distribution committed"
        );
        Ok(record)
    }
}

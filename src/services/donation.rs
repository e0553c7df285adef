//! Donation and restock operations

use chrono::NaiveDate;

use super::pantry::{Changes, PantryManager};
use crate::error::{PantryError, PantryResult};
use crate::models::{DonatedItem, Donation, InventoryItem, Money};

impl PantryManager {
    /// Record a batch of donated food
    ///
    /// Every listed item is added to inventory (created if new) and one
    /// donation record covers the whole batch. Inventory is written before
    /// the donation log.
    pub fn record_food_donation(
        &mut self,
        items: Vec<DonatedItem>,
        donor: Option<String>,
    ) -> PantryResult<Donation> {
        let donation = Donation::food(items, donor)?;

        let mut inventory = self.inventory.clone();
        for item in donation.items() {
            add_stock(&mut inventory, &item.name, item.quantity, item.expires_on)?;
        }

        let mut donations = self.donations.clone();
        donations.push(donation.clone());

        self.commit(Changes {
            inventory: Some(inventory),
            donations: Some(donations),
            ..Default::default()
        })?;

        tracing::info!(
            donation = %donation.id,
            lines = donation.items().len(),
            "food donation recorded"
        );
        Ok(donation)
    }

    /// Record a monetary donation
    pub fn record_money_donation(
        &mut self,
        amount: Money,
        donor: Option<String>,
    ) -> PantryResult<Donation> {
        let donation = Donation::money(amount, donor)?;

        let mut donations = self.donations.clone();
        donations.push(donation.clone());

        self.commit(Changes {
            donations: Some(donations),
            ..Default::default()
        })?;

        tracing::info!(donation = %donation.id, %amount, "money donation recorded");
        Ok(donation)
    }

    /// Add stock that did not come in as a donation (purchases, corrections)
    ///
    /// Creates the item if it does not exist yet. A non-empty `unit` replaces
    /// the item's unit label.
    pub fn restock(
        &mut self,
        name: &str,
        quantity: u32,
        unit: Option<&str>,
    ) -> PantryResult<InventoryItem> {
        if quantity == 0 {
            return Err(PantryError::Validation(
                "Restock quantity must be positive".into(),
            ));
        }

        let mut inventory = self.inventory.clone();
        let index = add_stock(&mut inventory, name, quantity, None)?;
        if let Some(unit) = unit {
            inventory[index] = inventory[index].with_unit(unit);
        }
        let item = inventory[index].clone();

        self.commit(Changes {
            inventory: Some(inventory),
            ..Default::default()
        })?;

        tracing::info!(item = %item.name, quantity, on_hand = item.quantity, "restocked");
        Ok(item)
    }
}

/// Find-or-create `name` in `inventory` and add `quantity`, returning its index
fn add_stock(
    inventory: &mut Vec<InventoryItem>,
    name: &str,
    quantity: u32,
    expires_on: Option<NaiveDate>,
) -> PantryResult<usize> {
    match PantryManager::item_index(inventory, name) {
        Some(index) => {
            inventory[index] = inventory[index].restocked(quantity, expires_on)?;
            Ok(index)
        }
        None => {
            let item = InventoryItem::new(name, 0)?.restocked(quantity, expires_on)?;
            inventory.push(item);
            Ok(inventory.len() - 1)
        }
    }
}

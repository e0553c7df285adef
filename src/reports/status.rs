//! Pantry Status Report
//!
//! Quick summary for the front desk: queue length, stock levels and donation
//! totals.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{HouseholdStatus, InventoryItem, Money};
use crate::services::PantryManager;

#[derive(Debug, Clone)]
pub struct PantryStatus {
    pub date: NaiveDate,
    pub households_waiting: usize,
    pub households_in_service: usize,
    pub served_on_date: usize,
    /// Distinct items with stock on hand
    pub items_in_stock: usize,
    /// Items at or below the low-stock threshold, including empty ones
    pub low_stock: Vec<InventoryItem>,
    pub low_stock_threshold: u32,
    pub food_donations: usize,
    pub money_donations: usize,
    pub total_money_donated: Money,
}

impl PantryStatus {
    /// Summarise the pantry as of `date` (UTC)
    pub fn generate(manager: &PantryManager, settings: &Settings, date: NaiveDate) -> Self {
        let households = manager.households();
        let inventory = manager.inventory_snapshot();
        let donations = manager.donation_history();

        let served_on_date = households
            .iter()
            .filter(|h| h.status == HouseholdStatus::Served)
            .filter(|h| h.served_at.map(|t| t.date_naive()) == Some(date))
            .count();

        let low_stock = inventory
            .iter()
            .filter(|i| i.quantity <= settings.low_stock_threshold)
            .cloned()
            .collect();

        Self {
            date,
            households_waiting: manager.households_with_status(HouseholdStatus::Waiting).len(),
            households_in_service: manager
                .households_with_status(HouseholdStatus::InService)
                .len(),
            served_on_date,
            items_in_stock: inventory.iter().filter(|i| i.is_in_stock()).count(),
            low_stock,
            low_stock_threshold: settings.low_stock_threshold,
            food_donations: donations.iter().filter(|d| d.is_food()).count(),
            money_donations: donations.iter().filter(|d| !d.is_food()).count(),
            total_money_donated: donations.iter().filter_map(|d| d.amount()).sum(),
        }
    }

    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Pantry Status: {}\n", self.date));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("Households waiting:     {}\n", self.households_waiting));
        output.push_str(&format!("Households in service:  {}\n", self.households_in_service));
        output.push_str(&format!("Served today:           {}\n", self.served_on_date));
        output.push_str(&format!("Items in stock:         {}\n", self.items_in_stock));
        output.push_str(&format!(
            "Donations:              {} food, {} money ({})\n",
            self.food_donations,
            self.money_donations,
            self.total_money_donated.format_with_symbol(currency_symbol)
        ));

        if !self.low_stock.is_empty() {
            output.push_str(&format!(
                "\nLow stock (<= {}):\n",
                self.low_stock_threshold
            ));
            for item in &self.low_stock {
                let note = if item.is_in_stock() { "" } else { "  OUT" };
                output.push_str(&format!("  {:<30} {:>6}{}\n", item.name, item.quantity, note));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::{Cart, DonatedItem};
    use crate::storage::Storage;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_generate_status() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut manager = PantryManager::open(Storage::new(paths).unwrap()).unwrap();

        manager
            .record_food_donation(
                vec![DonatedItem::new("Rice", 20), DonatedItem::new("Salt", 2)],
                None,
            )
            .unwrap();
        manager
            .record_money_donation(Money::from_cents(1500), None)
            .unwrap();
        manager
            .record_money_donation(Money::from_cents(250), None)
            .unwrap();
        manager.restock("Oil", 1, None).unwrap();

        let served = manager.enqueue_household("Smith", 3).unwrap();
        manager.enqueue_household("Jones", 2).unwrap();
        manager.begin_distribution(served.id).unwrap();
        let mut cart = Cart::new();
        manager.add_to_cart(&mut cart, "Oil", 1).unwrap();
        manager.commit_distribution(served.id, &cart).unwrap();

        let serving = manager.enqueue_household("Garcia", 4).unwrap();
        manager.begin_distribution(serving.id).unwrap();

        let settings = Settings::default();
        let status = PantryStatus::generate(&manager, &settings, Utc::now().date_naive());

        assert_eq!(status.households_waiting, 1);
        assert_eq!(status.households_in_service, 1);
        assert_eq!(status.served_on_date, 1);
        assert_eq!(status.items_in_stock, 2);
        let low: Vec<_> = status.low_stock.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(low, vec!["Salt", "Oil"]);
        assert_eq!(status.food_donations, 1);
        assert_eq!(status.money_donations, 2);
        assert_eq!(status.total_money_donated, Money::from_cents(1750));

        let text = status.format_terminal("$");
        assert!(text.contains("$17.50"));
        assert!(text.contains("OUT"));
    }
}

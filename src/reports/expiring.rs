//! Expiring Stock Report
//!
//! In-stock items whose earliest expiration date falls on or before a cutoff.

use chrono::{Days, NaiveDate};

use crate::services::PantryManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringItem {
    pub name: String,
    pub quantity: u32,
    pub expires_on: NaiveDate,
    /// Negative once the date has passed
    pub days_left: i64,
}

impl ExpiringItem {
    pub fn is_expired(&self) -> bool {
        self.days_left < 0
    }
}

#[derive(Debug, Clone)]
pub struct ExpiringStockReport {
    pub as_of: NaiveDate,
    pub within_days: u32,
    /// Soonest first
    pub items: Vec<ExpiringItem>,
}

impl ExpiringStockReport {
    pub fn generate(manager: &PantryManager, as_of: NaiveDate, within_days: u32) -> Self {
        let cutoff = as_of
            .checked_add_days(Days::new(u64::from(within_days)))
            .unwrap_or(NaiveDate::MAX);

        let mut items: Vec<ExpiringItem> = manager
            .inventory_snapshot()
            .iter()
            .filter(|i| i.is_in_stock())
            .filter_map(|i| {
                let expires_on = i.expires_on?;
                (expires_on <= cutoff).then(|| ExpiringItem {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    expires_on,
                    days_left: (expires_on - as_of).num_days(),
                })
            })
            .collect();

        items.sort_by(|a, b| a.expires_on.cmp(&b.expires_on).then_with(|| a.name.cmp(&b.name)));

        Self {
            as_of,
            within_days,
            items,
        }
    }

    pub fn format_terminal(&self) -> String {
        if self.items.is_empty() {
            return format!(
                "Nothing in stock expires within {} days of {}.\n",
                self.within_days, self.as_of
            );
        }

        let mut output = format!(
            "Stock expiring within {} days of {}\n",
            self.within_days, self.as_of
        );
        output.push_str(&format!(
            "{:<30} {:>8} {:>12} {:>10}\n",
            "Item", "Qty", "Expires", "Days"
        ));
        output.push_str(&"-".repeat(63));
        output.push('\n');
        for item in &self.items {
            let days = if item.is_expired() {
                "EXPIRED".to_string()
            } else {
                item.days_left.to_string()
            };
            output.push_str(&format!(
                "{:<30} {:>8} {:>12} {:>10}\n",
                item.name, item.quantity, item.expires_on, days
            ));
        }
        output
    }
}

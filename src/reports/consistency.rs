//! Inventory vs. distribution history check
//!
//! A checkout writes inventory before the distribution record. If the
//! process dies in between, an item's `distributed_total` runs ahead of the
//! history. This report lists such mismatches; it never corrects them.

use std::collections::BTreeMap;

use crate::models::{DistributionRecord, InventoryItem};

/// One item whose counters disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub item: String,
    /// Cumulative quantity distributed according to the inventory file
    pub inventory_total: u64,
    /// Quantity distributed according to the distribution records
    pub history_total: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ConsistencyReport {
    pub items_checked: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl ConsistencyReport {
    pub fn check(inventory: &[InventoryItem], history: &[DistributionRecord]) -> Self {
        let mut history_totals: BTreeMap<String, (String, u64)> = BTreeMap::new();
        for line in history.iter().flat_map(|r| &r.items) {
            let entry = history_totals
                .entry(InventoryItem::normalize_name(&line.name))
                .or_insert_with(|| (line.name.clone(), 0));
            entry.1 += u64::from(line.quantity);
        }

        let mut discrepancies = Vec::new();
        for item in inventory {
            let history_total = history_totals
                .remove(&InventoryItem::normalize_name(&item.name))
                .map(|(_, total)| total)
                .unwrap_or(0);
            if history_total != item.distributed_total {
                discrepancies.push(Discrepancy {
                    item: item.name.clone(),
                    inventory_total: item.distributed_total,
                    history_total,
                });
            }
        }

        // Items distributed but missing from inventory altogether
        for (_, (name, history_total)) in history_totals {
            discrepancies.push(Discrepancy {
                item: name,
                inventory_total: 0,
                history_total,
            });
        }

        Self {
            items_checked: inventory.len(),
            discrepancies,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }

    pub fn format_terminal(&self) -> String {
        if self.is_consistent() {
            return format!(
                "Inventory is consistent with distribution history ({} items checked).\n",
                self.items_checked
            );
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Found {} discrepancies between inventory and distribution history:\n",
            self.discrepancies.len()
        ));
        output.push_str(&format!(
            "{:<30} {:>12} {:>12}\n",
            "Item", "Inventory", "History"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');
        for d in &self.discrepancies {
            output.push_str(&format!(
                "{:<30} {:>12} {:>12}\n",
                d.item, d.inventory_total, d.history_total
            ));
        }
        output.push_str("\nNo changes were made. Review the records and restock if needed.\n");
        output
    }
}

//! Most Distributed Items Report
//!
//! Totals quantity handed out per item across all distribution records.

use std::collections::HashMap;
use std::io::Write;

use crate::error::PantryResult;
use crate::models::{DistributionRecord, InventoryItem};
use crate::services::PantryManager;

/// Total quantity distributed for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTotal {
    pub name: String,
    pub quantity: u64,
}

/// Top `top_n` items by quantity distributed
///
/// Names are grouped case-insensitively and shown with the casing first seen.
/// Sorted by quantity descending, then name ascending.
pub fn most_distributed_items(history: &[DistributionRecord], top_n: usize) -> Vec<ItemTotal> {
    let mut totals: HashMap<String, ItemTotal> = HashMap::new();
    for line in history.iter().flat_map(|r| &r.items) {
        totals
            .entry(InventoryItem::normalize_name(&line.name))
            .or_insert_with(|| ItemTotal {
                name: line.name.trim().to_string(),
                quantity: 0,
            })
            .quantity += u64::from(line.quantity);
    }

    let mut ranked: Vec<ItemTotal> = totals.into_values().collect();
    ranked.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(top_n);
    ranked
}

/// Most Distributed Items Report
#[derive(Debug, Clone)]
pub struct MostDistributedReport {
    pub items: Vec<ItemTotal>,
    /// Units distributed across all items, not only the listed ones
    pub total_distributed: u64,
    pub record_count: usize,
}

impl MostDistributedReport {
    pub fn generate(manager: &PantryManager, top_n: usize) -> Self {
        let history = manager.distribution_history();
        Self {
            items: most_distributed_items(history, top_n),
            total_distributed: history.iter().map(|r| r.total_quantity()).sum(),
            record_count: history.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Most Distributed Items\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Distributions: {}   Units distributed: {}\n\n",
            self.record_count, self.total_distributed
        ));

        if self.items.is_empty() {
            output.push_str("No distributions recorded.\n");
            return output;
        }

        output.push_str(&format!("{:>4}  {:<30} {:>10}\n", "#", "Item", "Quantity"));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for (rank, item) in self.items.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}  {:<30} {:>10}\n",
                rank + 1,
                item.name,
                item.quantity
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PantryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Rank", "Item", "Quantity"])?;
        for (rank, item) in self.items.iter().enumerate() {
            csv.write_record([
                (rank + 1).to_string(),
                item.name.clone(),
                item.quantity.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

//! Inventory display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::InventoryItem;

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

impl From<&InventoryItem> for InventoryRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone().unwrap_or_default(),
            expires: item
                .expires_on
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Format inventory items as a table
pub fn format_inventory_table<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let rows: Vec<InventoryRow> = items.into_iter().map(InventoryRow::from).collect();
    if rows.is_empty() {
        return "Inventory is empty.".to_string();
    }

    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n\n{} items", table, count)
}

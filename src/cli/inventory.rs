//! Inventory CLI commands

use clap::Subcommand;

use crate::display::format_inventory_table;
use crate::error::PantryResult;
use crate::services::PantryManager;

/// Inventory subcommands
#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List inventory
    #[command(alias = "ls")]
    List {
        /// Include items with no stock
        #[arg(short, long)]
        all: bool,
    },
    /// Search items by name (case-insensitive)
    Search {
        query: String,
    },
    /// Add stock that did not come from a donation
    Restock {
        /// Item name
        name: String,
        /// Quantity to add
        quantity: u32,
        /// Unit or category label
        #[arg(short, long)]
        unit: Option<String>,
    },
}

/// Handle an inventory command
pub fn handle_inventory_command(
    manager: &mut PantryManager,
    cmd: InventoryCommands,
) -> PantryResult<()> {
    match cmd {
        InventoryCommands::List { all } => {
            let items = manager
                .inventory_snapshot()
                .iter()
                .filter(|i| all || i.is_in_stock());
            println!("{}", format_inventory_table(items));
        }

        InventoryCommands::Search { query } => {
            let mut matches = manager.search_inventory(&query).peekable();
            if matches.peek().is_none() {
                println!("No items match '{}'.", query);
            } else {
                println!("{}", format_inventory_table(matches));
            }
        }

        InventoryCommands::Restock {
            name,
            quantity,
            unit,
        } => {
            let item = manager.restock(&name, quantity, unit.as_deref())?;
            println!(
                "Restocked {}x {} (now {} on hand)",
                quantity, item.name, item.quantity
            );
        }
    }

    Ok(())
}

//! Display formatting for terminal output

pub mod history;
pub mod household;
pub mod inventory;

pub use history::{format_distribution_list, format_donation_list};
pub use household::{format_household_details, format_household_list};
pub use inventory::format_inventory_table;

//! Donation CLI commands

use clap::Subcommand;

use super::parse_donated_item;
use crate::config::Settings;
use crate::display::format_donation_list;
use crate::error::{PantryError, PantryResult};
use crate::models::{DonatedItem, Money};
use crate::services::PantryManager;

/// `pantry donate` subcommands
#[derive(Subcommand, Debug)]
pub enum DonateCommands {
    /// Log a food donation
    Food {
        /// Donated item as NAME=QTY or NAME=QTY@YYYY-MM-DD (repeatable)
        #[arg(short, long = "item", value_parser = parse_donated_item, required = true)]
        items: Vec<DonatedItem>,
        /// Donor name
        #[arg(short, long)]
        donor: Option<String>,
    },
    /// Log a money donation
    Money {
        /// Amount, e.g. 25 or 25.50
        amount: String,
        /// Donor name
        #[arg(short, long)]
        donor: Option<String>,
    },
}

/// `pantry donation` subcommands
#[derive(Subcommand, Debug)]
pub enum DonationCommands {
    /// Show the donation log
    #[command(alias = "ls")]
    List {
        /// Show only the most recent N donations
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a donate command
pub fn handle_donate_command(
    manager: &mut PantryManager,
    settings: &Settings,
    cmd: DonateCommands,
) -> PantryResult<()> {
    match cmd {
        DonateCommands::Food { items, donor } => {
            let donation = manager.record_food_donation(items, donor)?;
            println!("Logged food donation {}: {}", donation.id, donation.summary());
        }

        DonateCommands::Money { amount, donor } => {
            let amount =
                Money::parse(&amount).map_err(|e| PantryError::Validation(e.to_string()))?;
            let donation = manager.record_money_donation(amount, donor)?;
            println!(
                "Logged money donation {}: {}",
                donation.id,
                amount.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Handle a donation log command
pub fn handle_donation_command(
    manager: &PantryManager,
    settings: &Settings,
    cmd: DonationCommands,
) -> PantryResult<()> {
    match cmd {
        DonationCommands::List { limit } => {
            let history = manager.donation_history();
            let shown = match limit {
                Some(n) => &history[history.len().saturating_sub(n)..],
                None => history,
            };
            println!("{}", format_donation_list(shown, &settings.date_format));
        }
    }

    Ok(())
}

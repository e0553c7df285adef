//! Distribution CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_distribution_list;
use crate::error::PantryResult;
use crate::models::{Cart, HouseholdStatus, ItemLine};
use crate::services::PantryManager;

/// `pantry distribution` subcommands
#[derive(Subcommand, Debug)]
pub enum DistributionCommands {
    /// Show the distribution log
    #[command(alias = "ls")]
    List {
        /// Only records for this household (name or ID)
        #[arg(long)]
        household: Option<String>,
        /// Show only the most recent N records
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Build a cart from `items` and check it out to `household`
///
/// With `begin`, a waiting household is moved to in-service first.
pub fn handle_distribute_command(
    manager: &mut PantryManager,
    household: &str,
    items: Vec<ItemLine>,
    begin: bool,
) -> PantryResult<()> {
    let household = manager.find_household(household)?.clone();

    let mut cart = Cart::new();
    for line in &items {
        manager.add_to_cart(&mut cart, &line.name, line.quantity)?;
    }

    if begin && household.status == HouseholdStatus::Waiting {
        manager.begin_distribution(household.id)?;
    }

    let record = manager.commit_distribution(household.id, &cart)?;
    println!(
        "Distributed to '{}': {} ({} units)",
        household.name,
        record.summary(),
        record.total_quantity()
    );

    Ok(())
}

/// Handle a distribution log command
pub fn handle_distribution_command(
    manager: &PantryManager,
    settings: &Settings,
    cmd: DistributionCommands,
) -> PantryResult<()> {
    match cmd {
        DistributionCommands::List { household, limit } => {
            // Served households have left the queue, so match the log directly
            let records: Vec<_> = manager
                .distribution_history()
                .iter()
                .filter(|r| match household.as_deref().map(str::trim) {
                    Some(wanted) => {
                        r.household_id.matches(wanted)
                            || r.household_name.eq_ignore_ascii_case(wanted)
                    }
                    None => true,
                })
                .cloned()
                .collect();

            let shown = match limit {
                Some(n) => &records[records.len().saturating_sub(n)..],
                None => &records[..],
            };
            println!("{}", format_distribution_list(shown, &settings.date_format));
        }
    }

    Ok(())
}

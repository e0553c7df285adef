//! Household queue CLI commands

use clap::Subcommand;

use crate::display::{format_household_details, format_household_list};
use crate::error::PantryResult;
use crate::services::PantryManager;

/// Household subcommands
#[derive(Subcommand, Debug)]
pub enum HouseholdCommands {
    /// Sign a household in to the queue
    #[command(alias = "signin")]
    Add {
        /// Household name or identifier
        name: String,
        /// Number of people in the household
        size: u32,
    },
    /// Show the queue
    #[command(alias = "ls")]
    List {
        /// Include served and cancelled households
        #[arg(short, long)]
        all: bool,
    },
    /// Show one household
    Show {
        /// Household name or ID
        household: String,
    },
    /// Start serving a waiting household
    Begin {
        /// Household name or ID
        household: String,
    },
    /// Remove a waiting household from the queue
    #[command(alias = "remove")]
    Cancel {
        /// Household name or ID
        household: String,
    },
}

/// Handle a household command
pub fn handle_household_command(
    manager: &mut PantryManager,
    cmd: HouseholdCommands,
) -> PantryResult<()> {
    match cmd {
        HouseholdCommands::Add { name, size } => {
            let household = manager.enqueue_household(&name, size)?;
            let position = manager.household_queue().len();
            println!(
                "Signed in '{}' ({}), position {} in queue",
                household.name, household.id, position
            );
        }

        HouseholdCommands::List { all } => {
            let households: Vec<_> = if all {
                manager.households().iter().collect()
            } else {
                manager.household_queue()
            };
            println!("{}", format_household_list(&households));
        }

        HouseholdCommands::Show { household } => {
            let household = manager.find_household(&household)?;
            print!("{}", format_household_details(household));
        }

        HouseholdCommands::Begin { household } => {
            let id = manager.find_household(&household)?.id;
            let household = manager.begin_distribution(id)?;
            println!("Now serving '{}' ({})", household.name, household.id);
        }

        HouseholdCommands::Cancel { household } => {
            let id = manager.find_household(&household)?.id;
            let household = manager.cancel_household(id)?;
            println!("Removed '{}' from the queue", household.name);
        }
    }

    Ok(())
}

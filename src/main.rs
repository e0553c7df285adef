use anyhow::Result;
use clap::{Parser, Subcommand};

use pantry::cli::{
    handle_distribute_command, handle_distribution_command, handle_donate_command,
    handle_donation_command, handle_household_command, handle_inventory_command,
    handle_report_command, parse_item_line,
};
use pantry::config::{paths::DATA_DIR_ENV, PantryPaths, Settings};
use pantry::models::ItemLine;
use pantry::services::PantryManager;
use pantry::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pantry",
    author = "Kaylee Beyene",
    version,
    about = "Food pantry record keeping from the command line",
    long_about = "Pantry tracks stock on hand, logs food and money donations, \
                  keeps the queue of households waiting to be served, and \
                  records what each household received."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the pantry data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Check inventory counters against distribution history
    Check,

    /// Inventory commands
    #[command(subcommand, alias = "inv")]
    Inventory(pantry::cli::InventoryCommands),

    /// Log a donation
    #[command(subcommand)]
    Donate(pantry::cli::DonateCommands),

    /// Donation log commands
    #[command(subcommand)]
    Donation(pantry::cli::DonationCommands),

    /// Household queue commands
    #[command(subcommand, alias = "hh")]
    Household(pantry::cli::HouseholdCommands),

    /// Check out a cart of items to a household being served
    Distribute {
        /// Household name or ID
        household: String,
        /// Item as NAME=QTY (repeatable)
        #[arg(short, long = "item", value_parser = parse_item_line, required = true)]
        items: Vec<ItemLine>,
        /// Begin service first if the household is still waiting
        #[arg(short, long)]
        begin: bool,
    },

    /// Distribution log commands
    #[command(subcommand)]
    Distribution(pantry::cli::DistributionCommands),

    /// Reports
    #[command(subcommand)]
    Report(pantry::cli::ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pantry::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = PantryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    let mut manager = PantryManager::open(storage)?;

    pantry::cli::run_with_flush(&mut manager, |manager| {
        match cli.command {
            Some(Commands::Init) => {
                println!("Initializing pantry at: {}", paths.data_dir().display());
                settings.save(&paths)?;
                manager.save_all()?;
                println!("Initialization complete!");
                println!();
                println!("Run 'pantry donate food --item Rice=10' to log your first donation.");
            }
            Some(Commands::Config) => {
                println!("Pantry Configuration");
                println!("====================");
                println!("Base directory: {}", paths.base_dir().display());
                println!("Data directory: {}", paths.data_dir().display());
                println!("Override with:  {}", DATA_DIR_ENV);
                println!("Initialized:    {}", paths.is_initialized());
                println!();
                println!("Settings:");
                println!("  Currency symbol:     {}", settings.currency_symbol);
                println!("  Date format:         {}", settings.date_format);
                println!("  Report top N:        {}", settings.report_top_n);
                println!("  Low stock threshold: {}", settings.low_stock_threshold);
                println!("  Expiry warning days: {}", settings.expiry_warning_days);
            }
            Some(Commands::Check) => {
                let report = manager.consistency_report();
                print!("{}", report.format_terminal());
                if !report.is_consistent() {
                    anyhow::bail!(
                        "{} item(s) disagree with distribution history",
                        report.discrepancies.len()
                    );
                }
            }
            Some(Commands::Inventory(cmd)) => {
                handle_inventory_command(manager, cmd)?;
            }
            Some(Commands::Donate(cmd)) => {
                handle_donate_command(manager, &settings, cmd)?;
            }
            Some(Commands::Donation(cmd)) => {
                handle_donation_command(manager, &settings, cmd)?;
            }
            Some(Commands::Household(cmd)) => {
                handle_household_command(manager, cmd)?;
            }
            Some(Commands::Distribute {
                household,
                items,
                begin,
            }) => {
                handle_distribute_command(manager, &household, items, begin)?;
            }
            Some(Commands::Distribution(cmd)) => {
                handle_distribution_command(manager, &settings, cmd)?;
            }
            Some(Commands::Report(cmd)) => {
                handle_report_command(manager, &settings, cmd)?;
            }
            None => {
                println!("Pantry - food pantry record keeping");
                println!();
                println!("Run 'pantry --help' for usage information.");
            }
        }
        Ok(())
    })
}

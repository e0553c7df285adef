//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use super::parse_date;
use crate::config::Settings;
use crate::error::{PantryError, PantryResult};
use crate::reports::{ExpiringStockReport, MostDistributedReport, PantryStatus};
use crate::services::PantryManager;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Items handed out most, by total quantity
    #[command(alias = "most-distributed")]
    Top {
        /// Number of items to show (defaults to the configured value)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Queue, stock and donation summary
    Status {
        /// Date to summarise (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// In-stock items close to their expiration date
    Expiring {
        /// Window in days (defaults to the configured value)
        #[arg(short, long)]
        days: Option<u32>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    manager: &PantryManager,
    settings: &Settings,
    cmd: ReportCommands,
) -> PantryResult<()> {
    let today = Utc::now().date_naive();

    match cmd {
        ReportCommands::Top { top, output } => {
            let top_n = top.unwrap_or(settings.report_top_n);
            let report = MostDistributedReport::generate(manager, top_n);

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    PantryError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Status { date } => {
            let status = PantryStatus::generate(manager, settings, date.unwrap_or(today));
            print!("{}", status.format_terminal(&settings.currency_symbol));
        }

        ReportCommands::Expiring { days } => {
            let report = ExpiringStockReport::generate(
                manager,
                today,
                days.unwrap_or(settings.expiry_warning_days),
            );
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}

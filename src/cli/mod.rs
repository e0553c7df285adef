//! CLI command handlers
//!
//! Bridges clap argument parsing with the pantry manager. Handlers print
//! results; errors bubble up to `main`.

pub mod distribution;
pub mod donation;
pub mod household;
pub mod inventory;
pub mod report;

pub use distribution::{
    handle_distribute_command, handle_distribution_command, DistributionCommands,
};
pub use donation::{
    handle_donate_command, handle_donation_command, DonateCommands, DonationCommands,
};
pub use household::{handle_household_command, HouseholdCommands};
pub use inventory::{handle_inventory_command, InventoryCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::models::{DonatedItem, ItemLine};
use crate::services::PantryManager;

/// Run one command, then write any collection a failed save left pending
///
/// The flush runs whether or not the command succeeded. The command's own
/// error is reported first; a flush failure is only returned when the
/// command itself succeeded.
pub fn run_with_flush<F>(manager: &mut PantryManager, command: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut PantryManager) -> anyhow::Result<()>,
{
    let outcome = command(manager);
    let flushed = manager.flush();

    match (outcome, flushed) {
        (Err(e), Err(flush_err)) => {
            tracing::error!(error = %flush_err, "pending collections could not be written");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), flushed) => Ok(flushed?),
    }
}

/// Parse `NAME=QTY`
pub fn parse_item_line(s: &str) -> Result<ItemLine, String> {
    let (name, quantity) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing item name in '{}'", s));
    }

    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;

    Ok(ItemLine::new(name, quantity))
}

/// Parse `NAME=QTY` or `NAME=QTY@YYYY-MM-DD`
pub fn parse_donated_item(s: &str) -> Result<DonatedItem, String> {
    let (line, expires_on) = match s.rsplit_once('@') {
        Some((line, date)) => {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| format!("invalid expiration date in '{}' (use YYYY-MM-DD)", s))?;
            (line, Some(date))
        }
        None => (s, None),
    };

    let line = parse_item_line(line)?;
    let item = DonatedItem::new(line.name, line.quantity);
    Ok(match expires_on {
        Some(date) => item.expiring(date),
        None => item,
    })
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (use YYYY-MM-DD)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PantryPaths;
    use crate::storage::{Collection, Storage};
    use std::fs;
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> PantryManager {
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        PantryManager::open(Storage::new(paths).unwrap()).unwrap()
    }

    #[test]
    fn test_run_with_flush_writes_pending_after_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);
        let donations_path = manager.storage().path_for(Collection::Donations);
        fs::create_dir(&donations_path).unwrap();

        let err = run_with_flush(&mut manager, |manager| {
            let result = manager.record_food_donation(vec![DonatedItem::new("Rice", 5)], None);
            assert_eq!(manager.pending_collections(), vec![Collection::Donations]);

            // The blocker goes away before the command returns its error
            fs::remove_dir(&donations_path).unwrap();
            result?;
            Ok(())
        })
        .unwrap_err();

        let err = err.downcast::<crate::PantryError>().unwrap();
        assert!(err.is_storage());
        assert!(manager.pending_collections().is_empty());

        let reopened = open(&temp_dir);
        assert_eq!(reopened.find_item("Rice").unwrap().quantity, 5);
        assert_eq!(reopened.donation_history().len(), 1);
    }

    #[test]
    fn test_run_with_flush_keeps_command_error_when_flush_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);
        let donations_path = manager.storage().path_for(Collection::Donations);
        fs::create_dir(&donations_path).unwrap();

        let err = run_with_flush(&mut manager, |manager| {
            manager.record_food_donation(vec![DonatedItem::new("Rice", 5)], None)?;
            Ok(())
        })
        .unwrap_err();

        // The donation error is reported, not the later flush failure
        let err = err.downcast::<crate::PantryError>().unwrap();
        assert!(matches!(err, crate::PantryError::Storage(_)));
        assert_eq!(manager.pending_collections(), vec![Collection::Donations]);
    }

    #[test]
    fn test_run_with_flush_passes_success_through() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);

        run_with_flush(&mut manager, |manager| {
            manager.restock("Beans", 2, None)?;
            Ok(())
        })
        .unwrap();

        assert_eq!(open(&temp_dir).find_item("Beans").unwrap().quantity, 2);
    }

    #[test]
    fn test_parse_item_line() {
        let line = parse_item_line("Canned Beans=3").unwrap();
        assert_eq!(line, ItemLine::new("Canned Beans", 3));

        assert!(parse_item_line("Rice").is_err());
        assert!(parse_item_line("=3").is_err());
        assert!(parse_item_line("Rice=-1").is_err());
        assert!(parse_item_line("Rice=lots").is_err());
    }

    #[test]
    fn test_parse_donated_item() {
        let item = parse_donated_item("Milk=2@2026-10-25").unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.expires_on, NaiveDate::from_ymd_opt(2026, 10, 25));

        let item = parse_donated_item("Rice=5").unwrap();
        assert_eq!(item.expires_on, None);

        assert!(parse_donated_item("Milk=2@tomorrow").is_err());
    }
}

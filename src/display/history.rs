//! Donation and distribution log formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{DistributionRecord, Donation};

#[derive(Tabled)]
struct DonationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Donor")]
    donor: String,
    #[tabled(rename = "Details")]
    details: String,
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Household")]
    household: String,
    #[tabled(rename = "Items")]
    items: String,
}

/// Format donations as a table; `date_format` is a strftime pattern
pub fn format_donation_list(donations: &[Donation], date_format: &str) -> String {
    if donations.is_empty() {
        return "No donations logged.".to_string();
    }

    let rows = donations.iter().map(|d| DonationRow {
        id: d.id.to_string(),
        date: d.timestamp.format(date_format).to_string(),
        kind: d.kind_label(),
        donor: d.donor.clone().unwrap_or_else(|| "-".to_string()),
        details: d.summary(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format distribution records as a table
pub fn format_distribution_list(records: &[DistributionRecord], date_format: &str) -> String {
    if records.is_empty() {
        return "No distributions logged.".to_string();
    }

    let rows = records.iter().map(|r| DistributionRow {
        id: r.id.to_string(),
        date: r.timestamp.format(date_format).to_string(),
        household: if r.household_name.is_empty() {
            r.household_id.to_string()
        } else {
            r.household_name.clone()
        },
        items: r.summary(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

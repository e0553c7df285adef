//! Household queue formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Household;

#[derive(Tabled)]
struct HouseholdRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: u32,
    #[tabled(rename = "Arrived")]
    arrived: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format households in the order given
pub fn format_household_list(households: &[&Household]) -> String {
    if households.is_empty() {
        return "No households in the queue.".to_string();
    }

    let rows = households.iter().enumerate().map(|(i, h)| HouseholdRow {
        position: i + 1,
        id: h.id.to_string(),
        name: h.name.clone(),
        size: h.size,
        arrived: h.arrived_at.format("%H:%M").to_string(),
        status: h.status.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a single household's details
pub fn format_household_details(household: &Household) -> String {
    let mut output = String::new();
    output.push_str(&format!("Household: {}\n", household.name));
    output.push_str(&format!("ID:        {}\n", household.id));
    output.push_str(&format!("Size:      {}\n", household.size));
    output.push_str(&format!("Status:    {}\n", household.status));
    output.push_str(&format!(
        "Arrived:   {}\n",
        household.arrived_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(served_at) = household.served_at {
        output.push_str(&format!(
            "Served:    {}\n",
            served_at.format("%Y-%m-%d %H:%M")
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_household_list() {
        let smith = Household::new("Smith", 3).unwrap();
        let jones = Household::new("Jones", 1).unwrap();
        let output = format_household_list(&[&smith, &jones]);
        assert!(output.contains("Smith"));
        assert!(output.contains("waiting"));
        assert!(output.contains(&jones.id.to_string()));
    }

    #[test]
    fn test_format_details() {
        let household = Household::new("Smith", 3).unwrap();
        let output = format_household_details(&household);
        assert!(output.contains("Household: Smith"));
        assert!(!output.contains("Served:"));
    }
}

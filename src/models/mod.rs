//! Core data models for the pantry
//!
//! Plain records for inventory, donations, households and distributions.
//! Constructors validate field shapes; nothing here touches the disk.

pub mod cart;
pub mod distribution;
pub mod donation;
pub mod household;
pub mod ids;
pub mod inventory;
pub mod money;

pub use cart::Cart;
pub use distribution::DistributionRecord;
pub use donation::{DonatedItem, Donation, DonationDetails};
pub use household::{Household, HouseholdStatus};
pub use ids::{DistributionId, DonationId, HouseholdId};
pub use inventory::{InventoryItem, ItemLine};
pub use money::{Money, MoneyParseError};

//! The pantry manager
//!
//! Owns every collection for the lifetime of the process. Operations are
//! implemented across this module and its siblings (`donation`, `household`,
//! `distribution`); all of them stage changes on copies and go through
//! [`PantryManager::commit`] so a failed validation never leaves partial
//! state behind.

use std::collections::BTreeSet;

use crate::error::{PantryError, PantryResult};
use crate::models::{
    DistributionRecord, Donation, Household, HouseholdId, HouseholdStatus, InventoryItem,
};
use crate::reports::ConsistencyReport;
use crate::storage::{Collection, Storage};

/// In-memory pantry state backed by the storage layer
pub struct PantryManager {
    storage: Storage,
    pub(super) inventory: Vec<InventoryItem>,
    pub(super) donations: Vec<Donation>,
    pub(super) distributions: Vec<DistributionRecord>,
    pub(super) households: Vec<Household>,
    /// Collections whose last save failed and still need writing
    pending: BTreeSet<Collection>,
}

/// Replacement collections produced by one operation
#[derive(Debug, Default)]
pub(super) struct Changes {
    pub inventory: Option<Vec<InventoryItem>>,
    pub donations: Option<Vec<Donation>>,
    pub distributions: Option<Vec<DistributionRecord>>,
    pub households: Option<Vec<Household>>,
}

impl Changes {
    /// Touched collections, in write order
    fn collections(&self) -> Vec<Collection> {
        let mut touched = Vec::new();
        if self.inventory.is_some() {
            touched.push(Collection::Inventory);
        }
        if self.donations.is_some() {
            touched.push(Collection::Donations);
        }
        if self.distributions.is_some() {
            touched.push(Collection::Distributions);
        }
        if self.households.is_some() {
            touched.push(Collection::Households);
        }
        touched
    }
}

impl PantryManager {
    /// Load every collection and check inventory against distribution history
    ///
    /// Corrupt collection files are logged and replaced by empty collections.
    pub fn open(storage: Storage) -> PantryResult<Self> {
        let manager = Self {
            inventory: storage.load_or_empty()?,
            donations: storage.load_or_empty()?,
            distributions: storage.load_or_empty()?,
            households: storage.load_or_empty()?,
            storage,
            pending: BTreeSet::new(),
        };

        tracing::debug!(
            items = manager.inventory.len(),
            donations = manager.donations.len(),
            distributions = manager.distributions.len(),
            households = manager.households.len(),
            "pantry loaded"
        );

        let report = manager.consistency_report();
        for discrepancy in &report.discrepancies {
            tracing::warn!(
                item = %discrepancy.item,
                inventory_total = discrepancy.inventory_total,
                history_total = discrepancy.history_total,
                "inventory does not match distribution history"
            );
        }

        Ok(manager)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current inventory, in the order items were first recorded
    pub fn inventory_snapshot(&self) -> &[InventoryItem] {
        &self.inventory
    }

    /// All donations, oldest first
    pub fn donation_history(&self) -> &[Donation] {
        &self.donations
    }

    /// All distribution records, oldest first
    pub fn distribution_history(&self) -> &[DistributionRecord] {
        &self.distributions
    }

    /// Every household ever signed in, including served and cancelled ones
    pub fn households(&self) -> &[Household] {
        &self.households
    }

    /// Waiting and in-service households in arrival order
    pub fn household_queue(&self) -> Vec<&Household> {
        self.households.iter().filter(|h| h.is_active()).collect()
    }

    /// Households with a given status, in arrival order
    pub fn households_with_status(&self, status: HouseholdStatus) -> Vec<&Household> {
        self.households
            .iter()
            .filter(|h| h.status == status)
            .collect()
    }

    /// Find an inventory item by name (case-insensitive)
    pub fn find_item(&self, name: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.matches_name(name))
    }

    /// Case-insensitive substring search over item names
    ///
    /// The iterator is lazy; call again to restart the search.
    pub fn search_inventory<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        let needle = InventoryItem::normalize_name(query);
        self.inventory
            .iter()
            .filter(move |item| item.name.to_lowercase().contains(&needle))
    }

    pub fn get_household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.iter().find(|h| h.id == id)
    }

    /// Find a household by id (full or short form) or by name
    ///
    /// Names are only matched against the active queue; a name shared by two
    /// active households is rejected as ambiguous.
    pub fn find_household(&self, identifier: &str) -> PantryResult<&Household> {
        if let Some(household) = self.households.iter().find(|h| h.id.matches(identifier)) {
            return Ok(household);
        }

        let mut by_name = self
            .households
            .iter()
            .filter(|h| h.is_active() && h.matches_name(identifier));

        match (by_name.next(), by_name.next()) {
            (Some(household), None) => Ok(household),
            (Some(_), Some(_)) => Err(PantryError::Validation(format!(
                "More than one household in the queue is named '{}'; use the household id",
                identifier.trim()
            ))),
            (None, _) => Err(PantryError::household_not_found(identifier.trim())),
        }
    }

    /// Consistency of inventory counters against distribution history
    pub fn consistency_report(&self) -> ConsistencyReport {
        ConsistencyReport::check(&self.inventory, &self.distributions)
    }

    /// Collections waiting to be written after an earlier save failure
    pub fn pending_collections(&self) -> Vec<Collection> {
        self.pending.iter().copied().collect()
    }

    /// Write every collection whose last save failed
    pub fn flush(&mut self) -> PantryResult<()> {
        let pending: Vec<Collection> = self.pending.iter().copied().collect();
        for collection in pending {
            self.save_collection(collection)?;
            self.pending.remove(&collection);
            tracing::info!(%collection, "flushed pending collection");
        }
        Ok(())
    }

    /// Write every collection, creating any missing files
    pub fn save_all(&mut self) -> PantryResult<()> {
        for collection in Collection::ALL {
            self.save_collection(collection)?;
            self.pending.remove(&collection);
        }
        Ok(())
    }

    pub(super) fn item_index(items: &[InventoryItem], name: &str) -> Option<usize> {
        items.iter().position(|i| i.matches_name(name))
    }

    pub(super) fn household_index(&self, id: HouseholdId) -> PantryResult<usize> {
        self.households
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| PantryError::household_not_found(id.to_string()))
    }

    /// Adopt staged collections and write them in order
    ///
    /// If the first write fails the previous state is restored and nothing
    /// changes. Once the first file is on disk the new state is kept; any
    /// later write failure marks that collection pending for [`flush`] and
    /// the error is returned.
    ///
    /// [`flush`]: PantryManager::flush
    pub(super) fn commit(&mut self, changes: Changes) -> PantryResult<()> {
        let touched = changes.collections();
        let previous = self.adopt(changes);

        let Some((&first, rest)) = touched.split_first() else {
            return Ok(());
        };

        if let Err(e) = self.save_collection(first) {
            self.adopt(previous);
            tracing::error!(collection = %first, error = %e, "save failed, change discarded");
            return Err(e);
        }
        self.pending.remove(&first);

        let mut outcome = Ok(());
        for &collection in rest {
            match self.save_collection(collection) {
                Ok(()) => {
                    self.pending.remove(&collection);
                }
                Err(e) => {
                    tracing::error!(%collection, error = %e, "save failed, marked pending");
                    self.pending.insert(collection);
                    if outcome.is_ok() {
                        outcome = Err(e);
                    }
                }
            }
        }
        outcome
    }

    /// Swap staged collections in, returning the ones they replaced
    fn adopt(&mut self, changes: Changes) -> Changes {
        Changes {
            inventory: changes
                .inventory
                .map(|v| std::mem::replace(&mut self.inventory, v)),
            donations: changes
                .donations
                .map(|v| std::mem::replace(&mut self.donations, v)),
            distributions: changes
                .distributions
                .map(|v| std::mem::replace(&mut self.distributions, v)),
            households: changes
                .households
                .map(|v| std::mem::replace(&mut self.households, v)),
        }
    }

    fn save_collection(&self, collection: Collection) -> PantryResult<()> {
        match collection {
            Collection::Inventory => self.storage.save(&self.inventory),
            Collection::Donations => self.storage.save(&self.donations),
            Collection::Distributions => self.storage.save(&self.distributions),
            Collection::Households => self.storage.save(&self.households),
        }
    }
}

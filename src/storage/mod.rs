//! Storage layer for the pantry
//!
//! Each collection lives in its own JSON array file under the data
//! directory. [`Storage`] keeps no records itself: it translates between an
//! in-memory `Vec` and the file, rewriting the whole file on every save.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::paths::PantryPaths;
use crate::error::{PantryError, PantryResult};
use crate::models::{DistributionRecord, Donation, Household, InventoryItem};

/// The persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Inventory,
    Donations,
    Distributions,
    Households,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Inventory,
        Collection::Donations,
        Collection::Distributions,
        Collection::Households,
    ];
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Inventory => "inventory",
            Collection::Donations => "donations",
            Collection::Distributions => "distributions",
            Collection::Households => "households",
        };
        f.write_str(name)
    }
}

/// A record type stored in one collection file
pub trait StoredRecord: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    /// Field checks a well-formed record passes
    fn validate(&self) -> PantryResult<()>;
}

impl StoredRecord for InventoryItem {
    const COLLECTION: Collection = Collection::Inventory;

    fn validate(&self) -> PantryResult<()> {
        InventoryItem::validate(self)
    }
}

impl StoredRecord for Donation {
    const COLLECTION: Collection = Collection::Donations;

    fn validate(&self) -> PantryResult<()> {
        Donation::validate(self)
    }
}

impl StoredRecord for DistributionRecord {
    const COLLECTION: Collection = Collection::Distributions;

    fn validate(&self) -> PantryResult<()> {
        DistributionRecord::validate(self)
    }
}

impl StoredRecord for Household {
    const COLLECTION: Collection = Collection::Households;

    fn validate(&self) -> PantryResult<()> {
        Household::validate(self)
    }
}

/// Stateless translator between collections and their files
#[derive(Debug, Clone)]
pub struct Storage {
    paths: PantryPaths,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: PantryPaths) -> PantryResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &PantryPaths {
        &self.paths
    }

    /// File backing a collection
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Inventory => self.paths.inventory_file(),
            Collection::Donations => self.paths.donations_file(),
            Collection::Distributions => self.paths.distributions_file(),
            Collection::Households => self.paths.households_file(),
        }
    }

    /// Load a collection; a missing file is an empty collection
    ///
    /// A record that parses but fails its field checks makes the whole file
    /// [`PantryError::CorruptData`].
    pub fn load<T: StoredRecord>(&self) -> PantryResult<Vec<T>> {
        let path = self.path_for(T::COLLECTION);
        let records: Vec<T> = read_json(&path)?;
        for (index, record) in records.iter().enumerate() {
            record.validate().map_err(|e| PantryError::CorruptData {
                path: path.clone(),
                reason: format!("record {}: {}", index + 1, e),
            })?;
        }
        tracing::debug!(collection = %T::COLLECTION, count = records.len(), "loaded");
        Ok(records)
    }

    /// Load a collection, starting empty if its file is corrupt
    ///
    /// The unreadable file is moved aside to
    /// `<name>.json.corrupt-<UTC timestamp>` so neither the next save nor a
    /// later quarantine overwrites it. Other errors still propagate.
    pub fn load_or_empty<T: StoredRecord>(&self) -> PantryResult<Vec<T>> {
        match self.load::<T>() {
            Err(PantryError::CorruptData { path, reason }) => {
                tracing::warn!(
                    collection = %T::COLLECTION,
                    path = %path.display(),
                    %reason,
                    "corrupt collection file, starting empty"
                );
                let quarantine = quarantine_path(&path);
                match fs::rename(&path, &quarantine) {
                    Ok(()) => tracing::warn!(
                        moved_to = %quarantine.display(),
                        "corrupt file moved aside"
                    ),
                    Err(e) => tracing::warn!(error = %e, "could not move corrupt file aside"),
                }
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Rewrite a collection file with `records`
    pub fn save<T: StoredRecord>(&self, records: &[T]) -> PantryResult<()> {
        let path = self.path_for(T::COLLECTION);
        write_json_atomic(&path, records)?;
        tracing::debug!(collection = %T::COLLECTION, count = records.len(), "saved");
        Ok(())
    }

    /// Check if the pantry has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

/// Unused `<file>.corrupt-<timestamp>[-n]` path next to `path`
fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let base = path.with_file_name(format!("{}.corrupt-{}", file_name, stamp));
    let mut candidate = base.clone();
    let mut n = 1;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{}.corrupt-{}-{}", file_name, stamp, n));
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DonatedItem, ItemLine, Money};
    use tempfile::TempDir;

    fn quarantined(storage: &Storage, file_name: &str) -> Vec<PathBuf> {
        let prefix = format!("{}.corrupt-", file_name);
        fs::read_dir(storage.paths().data_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .map_or(false, |n| n.to_string_lossy().starts_with(&prefix))
            })
            .collect()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (_temp_dir, storage) = create_test_storage();
        assert!(storage.load::<InventoryItem>().unwrap().is_empty());
        assert!(storage.load::<Donation>().unwrap().is_empty());
        assert!(storage.load::<DistributionRecord>().unwrap().is_empty());
        assert!(storage.load::<Household>().unwrap().is_empty());
    }

    #[test]
    fn test_inventory_round_trip_preserves_order() {
        let (_temp_dir, storage) = create_test_storage();
        let items = vec![
            InventoryItem::new("Rice", 10).unwrap(),
            InventoryItem::new("Beans", 0).unwrap().with_unit("cans"),
            InventoryItem::new("Apples", 4).unwrap(),
        ];

        storage.save(&items).unwrap();
        assert_eq!(storage.load::<InventoryItem>().unwrap(), items);
    }

    #[test]
    fn test_history_round_trip() {
        let (_temp_dir, storage) = create_test_storage();

        let donations = vec![
            Donation::food(vec![DonatedItem::new("Rice", 5)], Some("Ann".into())).unwrap(),
            Donation::money(Money::from_cents(4200), None).unwrap(),
        ];
        storage.save(&donations).unwrap();
        assert_eq!(storage.load::<Donation>().unwrap(), donations);

        let household = Household::new("Smith", 3).unwrap();
        let records =
            vec![DistributionRecord::new(&household, vec![ItemLine::new("Rice", 9)]).unwrap()];
        storage.save(&records).unwrap();
        assert_eq!(storage.load::<DistributionRecord>().unwrap(), records);

        storage.save(std::slice::from_ref(&household)).unwrap();
        assert_eq!(storage.load::<Household>().unwrap(), vec![household]);
    }

    #[test]
    fn test_corrupt_file_fails_load() {
        let (_temp_dir, storage) = create_test_storage();
        fs::write(storage.path_for(Collection::Inventory), "[{\"name\": ").unwrap();

        let err = storage.load::<InventoryItem>().unwrap_err();
        assert!(matches!(err, PantryError::CorruptData { .. }));
    }

    #[test]
    fn test_load_or_empty_quarantines_corrupt_file() {
        let (_temp_dir, storage) = create_test_storage();
        let path = storage.path_for(Collection::Donations);
        fs::write(&path, "garbage").unwrap();

        let donations = storage.load_or_empty::<Donation>().unwrap();
        assert!(donations.is_empty());
        assert!(!path.exists());
        assert_eq!(quarantined(&storage, "donations.json").len(), 1);
    }

    #[test]
    fn test_second_quarantine_keeps_first() {
        let (_temp_dir, storage) = create_test_storage();
        let path = storage.path_for(Collection::Donations);

        fs::write(&path, "first").unwrap();
        storage.load_or_empty::<Donation>().unwrap();
        fs::write(&path, "second").unwrap();
        storage.load_or_empty::<Donation>().unwrap();

        let files = quarantined(&storage, "donations.json");
        assert_eq!(files.len(), 2);
        let mut contents: Vec<String> = files
            .iter()
            .map(|f| fs::read_to_string(f).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_invalid_records_are_corrupt_data() {
        let (_temp_dir, storage) = create_test_storage();
        let path = storage.path_for(Collection::Donations);

        let food = Donation::food(vec![DonatedItem::new("Rice", 5)], None).unwrap();
        let mut empty_food = serde_json::to_value(&food).unwrap();
        empty_food["items"] = serde_json::json!([]);
        fs::write(&path, serde_json::to_string(&[empty_food]).unwrap()).unwrap();

        let err = storage.load::<Donation>().unwrap_err();
        match err {
            PantryError::CorruptData { reason, .. } => {
                assert!(reason.contains("record 1"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let money = Donation::money(Money::from_cents(100), None).unwrap();
        let mut negative = serde_json::to_value(&money).unwrap();
        negative["amount"] = serde_json::json!(-500);
        let records = vec![serde_json::to_value(&food).unwrap(), negative];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        assert!(matches!(
            storage.load::<Donation>().unwrap_err(),
            PantryError::CorruptData { .. }
        ));
        assert!(storage.load_or_empty::<Donation>().unwrap().is_empty());
        assert_eq!(quarantined(&storage, "donations.json").len(), 1);
    }

    #[test]
    fn test_invalid_households_and_distributions_are_corrupt_data() {
        let (_temp_dir, storage) = create_test_storage();

        let household = Household::new("Smith", 3).unwrap();
        let mut zero_size = serde_json::to_value(&household).unwrap();
        zero_size["size"] = serde_json::json!(0);
        fs::write(
            storage.path_for(Collection::Households),
            serde_json::to_string(&[zero_size]).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            storage.load::<Household>().unwrap_err(),
            PantryError::CorruptData { .. }
        ));

        let record = DistributionRecord::new(&household, vec![ItemLine::new("Rice", 2)]).unwrap();
        let mut no_items = serde_json::to_value(&record).unwrap();
        no_items["items"] = serde_json::json!([]);
        fs::write(
            storage.path_for(Collection::Distributions),
            serde_json::to_string(&[no_items]).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            storage.load::<DistributionRecord>().unwrap_err(),
            PantryError::CorruptData { .. }
        ));
    }

    #[test]
    fn test_files_are_json_arrays() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .save(&[InventoryItem::new("Rice", 10).unwrap()])
            .unwrap();

        let raw = fs::read_to_string(storage.path_for(Collection::Inventory)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["name"], "Rice");
        assert_eq!(value[0]["quantity"], 10);
    }
}

//! Household queue operations

use super::pantry::{Changes, PantryManager};
use crate::error::PantryResult;
use crate::models::{Household, HouseholdId, HouseholdStatus};

impl PantryManager {
    /// Sign a household in at the back of the queue
    pub fn enqueue_household(&mut self, name: &str, size: u32) -> PantryResult<Household> {
        let household = Household::new(name, size)?;

        let mut households = self.households.clone();
        households.push(household.clone());

        self.commit(Changes {
            households: Some(households),
            ..Default::default()
        })?;

        tracing::info!(household = %household.id, size, "household signed in");
        Ok(household)
    }

    /// Start serving a waiting household
    pub fn begin_distribution(&mut self, id: HouseholdId) -> PantryResult<Household> {
        self.move_household(id, HouseholdStatus::InService)
    }

    /// Take a waiting household out of the queue without serving it
    pub fn cancel_household(&mut self, id: HouseholdId) -> PantryResult<Household> {
        self.move_household(id, HouseholdStatus::Cancelled)
    }

    fn move_household(
        &mut self,
        id: HouseholdId,
        next: HouseholdStatus,
    ) -> PantryResult<Household> {
        let index = self.household_index(id)?;
        let updated = self.households[index].transition(next)?;

        let mut households = self.households.clone();
        households[index] = updated.clone();

        self.commit(Changes {
            households: Some(households),
            ..Default::default()
        })?;

        tracing::info!(household = %id, status = %next, "household status changed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_manager() -> (TempDir, PantryManager) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let manager = PantryManager::open(Storage::new(paths).unwrap()).unwrap();
        (temp_dir, manager)
    }

    #[test]
    fn test_enqueue_is_fifo() {
        let (_temp_dir, mut manager) = create_test_manager();
        manager.enqueue_household("Smith", 3).unwrap();
        manager.enqueue_household("Jones", 1).unwrap();
        manager.enqueue_household("Garcia", 5).unwrap();

        let names: Vec<_> = manager
            .household_queue()
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["Smith", "Jones", "Garcia"]);
        assert!(manager
            .household_queue()
            .iter()
            .all(|h| h.status == HouseholdStatus::Waiting));
    }

    #[test]
    fn test_enqueue_rejects_empty_household() {
        let (_temp_dir, mut manager) = create_test_manager();
        assert!(manager
            .enqueue_household("Smith", 0)
            .unwrap_err()
            .is_validation());
        assert!(manager.households().is_empty());
    }

    #[test]
    fn test_begin_distribution() {
        let (_temp_dir, mut manager) = create_test_manager();
        let household = manager.enqueue_household("Smith", 3).unwrap();

        let in_service = manager.begin_distribution(household.id).unwrap();
        assert_eq!(in_service.status, HouseholdStatus::InService);
        assert_eq!(
            manager.get_household(household.id).unwrap().status,
            HouseholdStatus::InService
        );

        // Still in the active queue while being served
        assert_eq!(manager.household_queue().len(), 1);

        // Only waiting households can begin
        let err = manager.begin_distribution(household.id).unwrap_err();
        assert!(err.is_state());
    }

    #[test]
    fn test_begin_unknown_household() {
        let (_temp_dir, mut manager) = create_test_manager();
        let err = manager.begin_distribution(HouseholdId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_cancel_household() {
        let (_temp_dir, mut manager) = create_test_manager();
        let smith = manager.enqueue_household("Smith", 3).unwrap();
        let jones = manager.enqueue_household("Jones", 2).unwrap();

        let cancelled = manager.cancel_household(smith.id).unwrap();
        assert_eq!(cancelled.status, HouseholdStatus::Cancelled);

        // Gone from the queue, kept in history
        assert_eq!(manager.household_queue().len(), 1);
        assert_eq!(manager.households().len(), 2);
        assert!(manager.begin_distribution(smith.id).unwrap_err().is_state());

        manager.begin_distribution(jones.id).unwrap();
        assert!(manager.cancel_household(jones.id).unwrap_err().is_state());
    }
}

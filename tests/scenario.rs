//! End-to-end flows through the pantry manager

use pantry::config::PantryPaths;
use pantry::models::{Cart, DonatedItem, HouseholdStatus, Money};
use pantry::reports::MostDistributedReport;
use pantry::services::PantryManager;
use pantry::storage::Storage;
use pantry::PantryError;
use tempfile::TempDir;

fn open(temp_dir: &TempDir) -> PantryManager {
    let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
    PantryManager::open(Storage::new(paths).unwrap()).unwrap()
}

#[test]
fn test_donation_queue_and_distribution() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = open(&temp_dir);

    manager.restock("Rice", 10, None).unwrap();
    manager
        .record_food_donation(vec![DonatedItem::new("rice", 5)], Some("Grocer".into()))
        .unwrap();
    assert_eq!(manager.find_item("Rice").unwrap().quantity, 15);
    assert_eq!(manager.inventory_snapshot().len(), 1);

    let smith = manager.enqueue_household("Smith", 3).unwrap();
    assert_eq!(manager.household_queue().len(), 1);

    // No distribution before service begins
    let mut cart = Cart::new();
    manager.add_to_cart(&mut cart, "Rice", 9).unwrap();
    let err = manager.commit_distribution(smith.id, &cart).unwrap_err();
    assert!(err.is_state());

    manager.begin_distribution(smith.id).unwrap();

    let mut too_much = Cart::new();
    let err = manager.add_to_cart(&mut too_much, "Rice", 16).unwrap_err();
    assert!(err.is_insufficient_stock());
    assert!(too_much.is_empty());

    let record = manager.commit_distribution(smith.id, &cart).unwrap();
    assert_eq!(record.total_quantity(), 9);
    assert_eq!(manager.find_item("Rice").unwrap().quantity, 6);
    assert_eq!(manager.distribution_history().len(), 1);
    assert_eq!(
        manager.get_household(smith.id).unwrap().status,
        HouseholdStatus::Served
    );
    assert!(manager.household_queue().is_empty());

    // A second checkout for the same household is rejected
    let err = manager.commit_distribution(smith.id, &cart).unwrap_err();
    assert!(err.is_state());
    assert_eq!(manager.find_item("Rice").unwrap().quantity, 6);
}

#[test]
fn test_commit_revalidates_stale_cart() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = open(&temp_dir);
    manager.restock("Rice", 15, None).unwrap();
    manager.restock("Beans", 3, None).unwrap();

    let household = manager.enqueue_household("Smith", 3).unwrap();
    manager.begin_distribution(household.id).unwrap();

    let mut cart = Cart::new();
    cart.stage("Beans", 2);
    cart.stage("Rice", 16);

    let err = manager.commit_distribution(household.id, &cart).unwrap_err();
    match err {
        PantryError::InsufficientStock {
            item,
            requested,
            available,
        } => {
            assert_eq!(item, "Rice");
            assert_eq!(requested, 16);
            assert_eq!(available, 15);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nothing was applied, not even the valid line
    assert_eq!(manager.find_item("Beans").unwrap().quantity, 3);
    assert_eq!(manager.find_item("Rice").unwrap().quantity, 15);
    assert!(manager.distribution_history().is_empty());
    assert_eq!(
        manager.get_household(household.id).unwrap().status,
        HouseholdStatus::InService
    );
}

#[test]
fn test_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut manager = open(&temp_dir);
        manager
            .record_food_donation(
                vec![DonatedItem::new("Rice", 10), DonatedItem::new("Beans", 4)],
                None,
            )
            .unwrap();
        manager
            .record_money_donation(Money::from_cents(2550), Some("Ann".into()))
            .unwrap();

        let household = manager.enqueue_household("Lee", 2).unwrap();
        manager.begin_distribution(household.id).unwrap();
        let mut cart = Cart::new();
        manager.add_to_cart(&mut cart, "beans", 4).unwrap();
        manager.commit_distribution(household.id, &cart).unwrap();
        manager.enqueue_household("Garcia", 5).unwrap();
    }

    let manager = open(&temp_dir);
    assert_eq!(manager.find_item("Rice").unwrap().quantity, 10);
    assert_eq!(manager.find_item("Beans").unwrap().quantity, 0);
    assert_eq!(manager.donation_history().len(), 2);
    assert_eq!(
        manager.donation_history()[1].amount(),
        Some(Money::from_cents(2550))
    );
    assert_eq!(manager.distribution_history().len(), 1);
    assert!(manager.consistency_report().is_consistent());

    let queue = manager.household_queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].name, "Garcia");

    let report = MostDistributedReport::generate(&manager, 10);
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].name, "Beans");
    assert_eq!(report.items[0].quantity, 4);
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = open(&temp_dir);
    manager.restock("Rice", 5, None).unwrap();

    assert!(manager
        .record_food_donation(vec![], None)
        .unwrap_err()
        .is_validation());
    assert!(manager
        .record_food_donation(vec![DonatedItem::new("Rice", 0)], None)
        .unwrap_err()
        .is_validation());
    assert!(manager
        .record_money_donation(Money::zero(), None)
        .unwrap_err()
        .is_validation());
    assert!(manager.enqueue_household("Smith", 0).unwrap_err().is_validation());

    let mut cart = Cart::new();
    assert!(manager
        .add_to_cart(&mut cart, "Quinoa", 1)
        .unwrap_err()
        .is_not_found());

    assert_eq!(manager.find_item("Rice").unwrap().quantity, 5);
    assert!(manager.donation_history().is_empty());
    assert!(manager.households().is_empty());
}

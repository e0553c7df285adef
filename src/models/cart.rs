//! Shopping cart staged during a distribution
//!
//! A cart lives only in memory. Stock checks happen in
//! `PantryManager::add_to_cart` and again at commit.

use super::inventory::{InventoryItem, ItemLine};

/// Ordered staged lines; each item name appears at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<ItemLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ItemLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity of `name` already staged (case-insensitive)
    pub fn staged_quantity(&self, name: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| same_item(&l.name, name))
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Stage `quantity` more of `name`, merging with an existing line
    ///
    /// No stock check; `PantryManager::add_to_cart` is the checked entry point
    /// and commit validates every line again.
    pub fn stage(&mut self, name: &str, quantity: u32) {
        match self.lines.iter_mut().find(|l| same_item(&l.name, name)) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(ItemLine::new(name, quantity)),
        }
    }

    /// Drop the line for `name`, returning it if it was staged
    pub fn remove(&mut self, name: &str) -> Option<ItemLine> {
        let index = self.lines.iter().position(|l| same_item(&l.name, name))?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn same_item(a: &str, b: &str) -> bool {
    InventoryItem::normalize_name(a) == InventoryItem::normalize_name(b)
}

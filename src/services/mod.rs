//! Service layer for the pantry
//!
//! [`PantryManager`] owns the in-memory collections and exposes every
//! operation that reads or changes them. Operations are grouped by concern
//! in the submodules; persistence rules live in `pantry`.

mod distribution;
mod donation;
mod household;
pub mod pantry;

pub use pantry::PantryManager;

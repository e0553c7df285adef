//! Pantry - record keeping for a community food pantry
//!
//! This library tracks the pantry's stock, logs food and money donations,
//! keeps the queue of households waiting to be served, and records what each
//! household received. Every collection is stored as a JSON file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (items, donations, households, distributions)
//! - `storage`: JSON file storage layer
//! - `services`: The pantry manager and its operations
//! - `reports`: Most-distributed, status, expiring stock and consistency reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `logging`: tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use pantry::config::PantryPaths;
//! use pantry::services::PantryManager;
//! use pantry::storage::Storage;
//!
//! let paths = PantryPaths::new()?;
//! let mut manager = PantryManager::open(Storage::new(paths)?)?;
//! manager.restock("Rice", 10, None)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PantryError, PantryResult};

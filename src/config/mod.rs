//! Configuration module for the pantry
//!
//! - Data directory resolution
//! - Settings persistence (`config.json`)

pub mod paths;
pub mod settings;

pub use paths::PantryPaths;
pub use settings::Settings;

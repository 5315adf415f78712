//! Core support: error taxonomy and persisted preferences.

pub mod errors;
pub mod prefs;

pub use errors::{TransferError, TransferResult};
pub use prefs::PolicyPrefs;

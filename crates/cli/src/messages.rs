//! User-facing wording for operation outcomes.
//!
//! Successful adds and removes are silent; everything else maps to one line.

use stockroom_infra::{LoadOutcome, PersistenceError};
use stockroom_inventory::{InventoryError, InventoryResult, ItemName, Removal};

pub fn add_message(result: &InventoryResult<i64>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(InventoryError::InvalidInput(_)) => {
            Some("Invalid input types for add_item().".to_string())
        }
        Err(e) => Some(format!("Error adding item: {e}")),
    }
}

pub fn remove_message(result: &InventoryResult<Removal>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(InventoryError::NotFound(name)) => Some(format!("Item '{name}' not found in stock.")),
        Err(e) => Some(format!("Error removing item: {e}")),
    }
}

pub fn save_message(result: &Result<(), PersistenceError>) -> String {
    match result {
        Ok(()) => "Data saved successfully.".to_string(),
        Err(e) => format!("Error saving data: {e}"),
    }
}

pub fn load_message(result: &Result<LoadOutcome, PersistenceError>, location: &str) -> String {
    match result {
        Ok(LoadOutcome::Loaded { .. }) => "Data loaded successfully.".to_string(),
        Ok(LoadOutcome::Missing) => {
            format!("File '{location}' not found. Starting with empty inventory.")
        }
        Err(e) if e.is_decode() => "Error decoding JSON file. File may be corrupted.".to_string(),
        Err(e) => format!("Error loading data: {e}"),
    }
}

/// Bracketed, quoted list: `['banana', 'kiwi']`.
pub fn name_list(names: &[ItemName]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

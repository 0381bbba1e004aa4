//! Global initialization utilities for the application

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the application environment
///
/// Loads variables from a `.env` file in the current directory (or any parent)
/// so that `from_env()` configuration picks them up. Existing process variables
/// are never overwritten.
///
/// Safe to call multiple times - will only run once
pub fn initialize_environment() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
    });
}


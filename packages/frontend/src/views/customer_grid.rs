//! Registered customers.

use delivery_router::LoadError;

use super::{grid, View};

const COLUMNS: &[&str] = &["userId", "role", "createdAt", "updatedAt"];

/// Load the customer grid.
pub async fn load() -> Result<View, LoadError> {
    Ok(grid("CustomerGrid", "Customers", "/customers", COLUMNS))
}

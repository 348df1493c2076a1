use delivery_router::LoadError;

use super::{grid, View};

const COLUMNS: &[&str] = &["orderId", "customerId", "storeId", "createdAt"];

/// Load the order grid.
pub async fn load() -> Result<View, LoadError> {
    Ok(grid("OrderGrid", "Orders", "/orders", COLUMNS))
}

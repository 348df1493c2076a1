use delivery_router::LoadError;

use super::{grid, View};

const COLUMNS: &[&str] = &[
    "reviewId",
    "orderId",
    "storeId",
    "customerId",
    "rating",
    "content",
    "createdAt",
];

/// Load the review grid.
pub async fn load() -> Result<View, LoadError> {
    Ok(grid("ReviewGrid", "Reviews", "/reviews", COLUMNS))
}

//! Stores with their delivery fee and rating summary.

use delivery_router::LoadError;

use super::{grid, View};

const COLUMNS: &[&str] = &[
    "storeName",
    "description",
    "deliveryFee",
    "storeAddress",
    "storeRatingAvg",
    "storeReviewCount",
];

/// Load the store grid.
pub async fn load() -> Result<View, LoadError> {
    Ok(grid("StoreGrid", "Stores", "/stores", COLUMNS))
}

//! The route table of the console.

use delivery_router::{Loader, RouteTable, RouteTableError};

use crate::views::{self, View};

/// The landing page.
pub const INDEX: &str = "/";
/// The customer grid.
pub const CUSTOMERS: &str = "/customers";
/// The order grid.
pub const ORDERS: &str = "/orders";
/// The store grid.
pub const STORES: &str = "/stores";
/// The review grid.
pub const REVIEWS: &str = "/reviews";

/// Build the route table of the console.
///
/// Every call builds an identical, independent table. Views are loaded lazily: nothing is
/// instantiated until the router renders a route.
pub fn route_table() -> Result<RouteTable<View>, RouteTableError> {
    RouteTable::builder()
        .route(INDEX, Loader::new(views::index::load))
        .route(CUSTOMERS, Loader::new(views::customer_grid::load))
        .route(ORDERS, Loader::new(views::order_grid::load))
        .route(STORES, Loader::new(views::store_grid::load))
        .route(REVIEWS, Loader::new(views::review_grid::load))
        .build()
}

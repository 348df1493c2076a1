//! The landing page.

use delivery_router::LoadError;

use super::{Body, Link, View};
use crate::routes;

/// The pages linked from the landing page, in menu order.
const MENU: &[(&str, &str)] = &[
    ("Customers", routes::CUSTOMERS),
    ("Orders", routes::ORDERS),
    ("Stores", routes::STORES),
    ("Reviews", routes::REVIEWS),
];

/// Load the landing page.
pub async fn load() -> Result<View, LoadError> {
    let links = MENU
        .iter()
        .map(|&(label, path)| Link {
            label,
            href: format!("#{path}"),
        })
        .collect();

    Ok(View::new("Index", "Delivery Console", Body::Links(links)))
}

//! The admin console of the delivery system.
//!
//! The console is a single-page application with five pages: a landing page and one grid each for
//! customers, orders, stores and reviews. [`routes::route_table`] declares them, [`launch`] builds
//! the router from an [`AppConfig`] and [`render_paths`] drives it.

pub mod config;
pub mod logging;
pub mod routes;
pub mod views;

mod error;

pub use config::AppConfig;
pub use error::*;

use std::io::Write;

use delivery_router::{Outcome, Router};
use tracing::info;

use crate::views::View;

/// Build the router of the console.
pub fn launch(config: &AppConfig) -> Result<Router<View>> {
    let table = routes::route_table()?;
    let router = Router::new(table, config.router_config())?;
    info!(history = %config.history, routes = router.table().len(), "console router ready");
    Ok(router)
}

/// Navigate to each of `paths` in turn, writing the visible URL and the rendered page to `out`.
pub async fn render_paths(
    router: &Router<View>,
    paths: &[String],
    out: &mut impl Write,
) -> Result<()> {
    for path in paths {
        router.navigate(path.as_str());
        writeln!(out, "{}", router.current_href())?;

        match router.render().await? {
            Outcome::Rendered(view) => writeln!(out, "{view}")?,
            Outcome::NotFound(location) => writeln!(out, "no page at {location}")?,
            Outcome::Superseded => {}
        }
    }

    Ok(())
}

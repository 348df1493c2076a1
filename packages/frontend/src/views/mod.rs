//! The pages of the console.
//!
//! Every page has an async `load` function producing its [`View`]. The router only calls it once
//! a navigation lands on the page.

use std::fmt;

pub mod customer_grid;
pub mod index;
pub mod order_grid;
pub mod review_grid;
pub mod store_grid;

/// A page ready to be mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    component: &'static str,
    title: &'static str,
    body: Body,
}

/// What a page shows below its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A list of navigation links.
    Links(Vec<Link>),
    /// A table listing a REST collection.
    Grid(Grid),
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The text of the link.
    pub label: &'static str,
    /// Where the link points, e.g. `#/orders`.
    pub href: String,
}

/// A table listing the items of one REST collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// The collection the rows are fetched from, e.g. `/orders`.
    pub resource: &'static str,
    /// The column headings, in order.
    pub columns: &'static [&'static str],
}

impl View {
    pub(crate) fn new(component: &'static str, title: &'static str, body: Body) -> Self {
        Self {
            component,
            title,
            body,
        }
    }

    /// The name of the page component, e.g. `OrderGrid`.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// The heading shown on the page.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// The content of the page.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Render the page as an HTML fragment.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"<main data-view="{}">"#, self.component)?;
        write!(f, "<h1>{}</h1>", self.title)?;

        match &self.body {
            Body::Links(links) => {
                f.write_str("<nav>")?;
                for link in links {
                    write!(f, r#"<a href="{}">{}</a>"#, link.href, link.label)?;
                }
                f.write_str("</nav>")?;
            }
            Body::Grid(grid) => {
                write!(f, r#"<table data-resource="{}"><thead><tr>"#, grid.resource)?;
                for column in grid.columns {
                    write!(f, "<th>{column}</th>")?;
                }
                f.write_str("</tr></thead><tbody></tbody></table>")?;
            }
        }

        f.write_str("</main>")
    }
}

pub(crate) fn grid(
    component: &'static str,
    title: &'static str,
    resource: &'static str,
    columns: &'static [&'static str],
) -> View {
    View::new(component, title, Body::Grid(Grid { resource, columns }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_render_their_columns() {
        let view = grid("OrderGrid", "Orders", "/orders", &["orderId", "status"]);
        assert_eq!(
            view.render(),
            r#"<main data-view="OrderGrid"><h1>Orders</h1><table data-resource="/orders"><thead><tr><th>orderId</th><th>status</th></tr></thead><tbody></tbody></table></main>"#
        );
        assert_eq!(view.to_string(), view.render());
    }
}

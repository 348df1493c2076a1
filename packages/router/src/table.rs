use std::collections::BTreeSet;

use thiserror::Error;
use tracing::trace;

use crate::{Loader, RoutePath};

/// A route table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// Two entries were registered for the same path, ignoring case.
    #[error("duplicate route: {path}")]
    DuplicatePath {
        /// The path registered twice, after normalization.
        path: RoutePath,
    },

    /// A declared path does not start with `/` or carries a query or fragment.
    #[error("invalid route path `{path}`: routes must start with `/` and carry no query or fragment")]
    InvalidPath {
        /// The path as it was declared.
        path: String,
    },
}

/// An association of a path with the loader for the view rendered at that path.
#[derive(Debug)]
pub struct RouteEntry<V> {
    path: RoutePath,
    loader: Loader<V>,
}

impl<V> RouteEntry<V> {
    /// The path this entry is registered for.
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    /// The deferred loader of the view.
    pub fn loader(&self) -> &Loader<V> {
        &self.loader
    }
}

/// An ordered, immutable list of [`RouteEntry`]s.
///
/// Tables are built once with [`RouteTable::builder`] and never change afterwards.
///
/// ```rust
/// # use delivery_router::{Loader, RouteTable};
/// let table = RouteTable::builder()
///     .route("/", Loader::new(|| async { Ok("index") }))
///     .route("/orders", Loader::new(|| async { Ok("orders") }))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.resolve("/orders").unwrap().path().as_str(), "/orders");
/// assert!(table.resolve("/unknown").is_none());
/// ```
#[derive(Debug)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> RouteTable<V> {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// Find the entry for a requested location.
    ///
    /// The location is normalized (see [`RoutePath`]) and compared literally, ignoring case,
    /// against every entry, top to bottom. The first match wins. No loader is invoked.
    pub fn resolve(&self, location: &str) -> Option<&RouteEntry<V>> {
        let requested = RoutePath::normalize(location);
        let entry = self.entries.iter().find(|entry| entry.path.matches(&requested));
        trace!(%requested, matched = entry.is_some(), "resolved route");
        entry
    }

    /// The declared paths, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &RoutePath> {
        self.entries.iter().map(RouteEntry::path)
    }

    /// Iterate over the entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for a [`RouteTable`].
///
/// The first invalid or duplicate registration is remembered and reported by
/// [`RouteTableBuilder::build`].
pub struct RouteTableBuilder<V> {
    entries: Vec<RouteEntry<V>>,
    seen: BTreeSet<String>,
    error: Option<RouteTableError>,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            seen: BTreeSet::new(),
            error: None,
        }
    }
}

impl<V> RouteTableBuilder<V> {
    /// Register `loader` for `path`.
    pub fn route(mut self, path: &str, loader: Loader<V>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let path = match RoutePath::declare(path) {
            Ok(path) => path,
            Err(err) => {
                self.error = Some(err);
                return self;
            }
        };

        if !self.seen.insert(path.match_key()) {
            self.error = Some(RouteTableError::DuplicatePath { path });
            return self;
        }

        self.entries.push(RouteEntry { path, loader });
        self
    }

    /// Finish the table.
    pub fn build(self) -> Result<RouteTable<V>, RouteTableError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(RouteTable {
                entries: self.entries,
            }),
        }
    }
}

use std::{cell::Cell, rc::Rc};

use delivery_history::History;
use tracing::{debug, error, warn};

use crate::{RoutePath, RouteTable, RouterConfig, RouterError, RoutingCallback};

/// What the current location resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteState {
    /// An entry of the route table matched.
    Matched {
        /// The path of the matched entry.
        path: RoutePath,
    },
    /// No entry matched the location.
    NotFound {
        /// The location as the history reported it.
        path: String,
    },
}

impl RouteState {
    fn resolve<V>(table: &RouteTable<V>, location: &str) -> Self {
        match table.resolve(location) {
            Some(entry) => RouteState::Matched {
                path: entry.path().clone(),
            },
            None => RouteState::NotFound {
                path: location.to_string(),
            },
        }
    }

    /// Whether an entry matched.
    pub fn is_match(&self) -> bool {
        matches!(self, RouteState::Matched { .. })
    }

    /// The matched path, or the unmatched location.
    pub fn path(&self) -> &str {
        match self {
            RouteState::Matched { path } => path.as_str(),
            RouteState::NotFound { path } => path,
        }
    }
}

/// The result of [`Router::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    /// The view of the matched route.
    Rendered(V),
    /// No route matched this location.
    NotFound(String),
    /// The location changed while the view was loading. The load result was dropped.
    Superseded,
}

/// The core of the router.
///
/// This combines a [`RouteTable`] and a [`History`] to find what view should be shown for the
/// current location. A [`Router`] is constructed once at startup and passed explicitly to
/// whatever needs to navigate; cloning it is cheap and every clone shares the same state.
///
/// Navigating only moves the history. Views are loaded by [`Router::render`], so a route's
/// loader runs only once a navigation actually lands on it.
pub struct Router<V> {
    table: Rc<RouteTable<V>>,
    history: Rc<dyn History>,
    generation: Rc<Cell<u64>>,
    on_update: Option<RoutingCallback>,
}

impl<V> Clone for Router<V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            history: self.history.clone(),
            generation: self.generation.clone(),
            on_update: self.on_update.clone(),
        }
    }
}

impl<V: Clone + 'static> Router<V> {
    /// Create a router using the history selected by `config`.
    pub fn new(table: RouteTable<V>, config: RouterConfig) -> Result<Self, RouterError> {
        let history = config.build_history()?;
        Ok(Self::with_history(table, history, config))
    }

    /// Create a router on top of an existing `history`.
    ///
    /// The history and prefix settings of `config` are ignored.
    pub fn with_history(
        table: RouteTable<V>,
        history: Rc<dyn History>,
        config: RouterConfig,
    ) -> Self {
        let table = Rc::new(table);
        let generation = Rc::new(Cell::new(0));
        let on_update = config.on_update;

        // the history only holds a weak handle to itself through the callback
        let updater = {
            let table = table.clone();
            let generation = generation.clone();
            let on_update = on_update.clone();
            let weak = Rc::downgrade(&history);
            move || {
                generation.set(generation.get() + 1);
                let Some(history) = weak.upgrade() else {
                    return;
                };
                let state = RouteState::resolve(&table, &history.current_route());
                debug!(path = state.path(), "location changed outside the router");
                if let Some(callback) = &on_update {
                    callback(&state);
                }
            }
        };
        history.updater(Rc::new(updater));

        Self {
            table,
            history,
            generation,
            on_update,
        }
    }

    /// The route table this router resolves against.
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// The history this router navigates.
    pub fn history(&self) -> &Rc<dyn History> {
        &self.history
    }

    /// Resolve the current location without loading anything.
    pub fn current_route(&self) -> RouteState {
        RouteState::resolve(&self.table, &self.history.current_route())
    }

    /// The `href` for `path` under the active history, e.g. `http://localhost/#/orders`.
    pub fn href(&self, path: &str) -> String {
        self.history.href(path)
    }

    /// The `href` of the current location.
    pub fn current_href(&self) -> String {
        self.history.href(&self.history.current_route())
    }

    /// Push `path` onto the history and return what it resolves to.
    ///
    /// A query string is kept in the history but ignored for matching.
    ///
    /// Navigating to the route that is already current changes nothing, so a pending
    /// [`Router::render`] of it still completes.
    pub fn navigate(&self, path: impl Into<String>) -> RouteState {
        let path = path.into();
        debug!(%path, "navigating");
        let before = self.history.current_route();
        self.history.push(path);
        self.routing_changed(before)
    }

    /// Replace the current history entry with `path`.
    pub fn replace(&self, path: impl Into<String>) -> RouteState {
        let path = path.into();
        debug!(%path, "replacing current route");
        let before = self.history.current_route();
        self.history.replace(path);
        self.routing_changed(before)
    }

    /// Whether there is a previous page to go back to.
    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Go back a step in the navigation history.
    ///
    /// If the history moves asynchronously (see [`History::navigates_synchronously`]), this still
    /// returns the route before the move. The new route is reported to
    /// [`on_update`](RouterConfig::on_update) once the history settles.
    pub fn go_back(&self) -> RouteState {
        let before = self.history.current_route();
        self.history.go_back();
        self.traversed(before)
    }

    /// Whether there is a future page to go forward to.
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Go a step forward in the navigation history.
    ///
    /// Like [`Router::go_back`], an asynchronous history reports the move later.
    pub fn go_forward(&self) -> RouteState {
        let before = self.history.current_route();
        self.history.go_forward();
        self.traversed(before)
    }

    /// Load the view for the current location.
    ///
    /// If the location changes while the loader is pending, the result is dropped and
    /// [`Outcome::Superseded`] is returned; the latest navigation wins.
    pub async fn render(&self) -> Result<Outcome<V>, RouterError> {
        let generation = self.generation.get();
        let location = self.history.current_route();

        let Some(entry) = self.table.resolve(&location) else {
            debug!(%location, "no route matched");
            return Ok(Outcome::NotFound(location));
        };

        let loaded = entry.loader().load().await;

        if self.generation.get() != generation {
            match &loaded {
                Ok(_) => {
                    warn!(path = %entry.path(), "location changed while loading, dropping the view")
                }
                Err(source) => warn!(
                    path = %entry.path(),
                    %source,
                    "location changed while loading, ignoring the failed load"
                ),
            }
            return Ok(Outcome::Superseded);
        }

        match loaded {
            Ok(view) => Ok(Outcome::Rendered(view)),
            Err(source) => {
                error!(path = %entry.path(), %source, "failed to load view");
                Err(RouterError::Load {
                    path: entry.path().clone(),
                    source,
                })
            }
        }
    }

    fn traversed(&self, before: String) -> RouteState {
        if !self.history.navigates_synchronously() {
            // the updater fires once the history has moved
            return self.current_route();
        }
        self.routing_changed(before)
    }

    fn routing_changed(&self, before: String) -> RouteState {
        let location = self.history.current_route();
        let state = RouteState::resolve(&self.table, &location);
        if location == before {
            return state;
        }

        self.generation.set(self.generation.get() + 1);
        if let Some(callback) = &self.on_update {
            callback(&state);
        }
        state
    }
}

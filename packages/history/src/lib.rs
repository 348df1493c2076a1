//! History Integration
//!
//! The delivery console router relies on [`History`] providers to store the current route, and
//! possibly a history (i.e. a browsers back button) and future (i.e. a browsers forward button).
//!
//! Two providers work everywhere: [`MemoryHistory`] keeps everything in memory, [`HashHistory`]
//! keeps the route in the fragment identifier of a document URL (`/#/orders`). With the `web`
//! feature, [`WebHashHistory`] does the same against the real browser location.
#![deny(missing_docs)]

use std::{fmt, rc::Rc, str::FromStr};

mod hash;
pub use hash::*;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// An integration with some kind of navigation history.
///
/// Routes are plain strings that **must start** with `/` and **must _not_ contain** the prefix.
/// They keep any percent-encoding of the URL they came from.
///
/// Depending on your use case, your implementation may deviate from the described procedure. This
/// is fine, as long as `current_route` matches the described format. The described behaviors are
/// designed to mimic a web browser, which most users should already know.
pub trait History {
    /// Get the route of the current location.
    ///
    /// ```rust
    /// # use delivery_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.current_route(), "/");
    ///
    /// history.push(String::from("/orders"));
    /// assert_eq!(history.current_route(), "/orders");
    /// ```
    #[must_use]
    fn current_route(&self) -> String;

    /// Get the current path prefix of the URL.
    ///
    /// Not all [`History`]s need a prefix feature. It is meant for environments where the console
    /// is not served from `/`.
    fn current_prefix(&self) -> Option<String> {
        None
    }

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to a previous page.
    ///
    /// If a [`History`] cannot go to a previous page, it should do nothing.
    fn go_back(&self);

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to a future page.
    ///
    /// If a [`History`] cannot go to a future page, it should do nothing.
    fn go_forward(&self);

    /// Whether [`History::go_back`] and [`History::go_forward`] have moved to the new route by the
    /// time they return.
    ///
    /// Browsers move through their history asynchronously. A [`History`] returning [`false`] here
    /// must report the move through its [updater](History::updater) once it happened.
    fn navigates_synchronously(&self) -> bool {
        true
    }

    /// Go to another page.
    ///
    /// This should do three things:
    /// 1. Make `route` the current route.
    /// 2. Add the previous route to the navigation history.
    /// 3. Clear the navigation future.
    ///
    /// ```rust
    /// # use delivery_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.push(String::from("/stores"));
    /// assert_eq!(history.current_route(), "/stores");
    /// assert!(history.can_go_back());
    /// ```
    fn push(&self, route: String);

    /// Replace the current page with another one.
    ///
    /// In contrast to [`History::push`], the navigation history and future stay untouched.
    fn replace(&self, route: String);

    /// The `href` a link pointing at `route` should carry.
    fn href(&self, route: &str) -> String {
        match self.current_prefix() {
            Some(prefix) => format!("{}{route}", prefix.trim_end_matches('/')),
            None => route.to_string(),
        }
    }

    /// Provide the [`History`] with an update callback.
    ///
    /// Some [`History`]s may receive location updates from outside the router, like a user
    /// editing the fragment in the address bar. When such updates are received, they should call
    /// `callback`, which will cause the router to update.
    #[allow(unused_variables)]
    fn updater(&self, callback: Rc<dyn Fn()>) {}
}

/// Selects how the router stores the current route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HistoryMode {
    /// Keep the route in the fragment identifier (`/#/orders`).
    #[default]
    Hash,
    /// Keep the route in memory only.
    Memory,
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryMode::Hash => f.write_str("hash"),
            HistoryMode::Memory => f.write_str("memory"),
        }
    }
}

/// The error returned when parsing an unknown [`HistoryMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHistoryMode(
    /// The rejected input.
    pub String,
);

impl fmt::Display for UnknownHistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown history mode `{}`, expected `hash` or `memory`",
            self.0
        )
    }
}

impl std::error::Error for UnknownHistoryMode {}

impl FromStr for HistoryMode {
    type Err = UnknownHistoryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(HistoryMode::Hash),
            "memory" => Ok(HistoryMode::Memory),
            _ => Err(UnknownHistoryMode(s.to_string())),
        }
    }
}

/// Turn whatever is stored in a fragment or pushed by a caller into a route.
///
/// An empty input is the index route, a missing leading `/` is added. Percent-encoding is left
/// as it appears in the URL.
pub(crate) fn route_from_fragment(fragment: &str) -> String {
    if fragment.is_empty() {
        "/".to_string()
    } else if fragment.starts_with('/') {
        fragment.to_string()
    } else {
        format!("/{fragment}")
    }
}

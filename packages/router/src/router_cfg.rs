use std::rc::Rc;

use delivery_history::{HashHistory, History, HistoryMode, MemoryHistory};

use crate::{RouteState, RouterError};

/// A function called with the new [`RouteState`] whenever the routing changes.
pub type RoutingCallback = Rc<dyn Fn(&RouteState)>;

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust,no_run
/// # use delivery_router::*;
/// let cfg = RouterConfig::default()
///     .history(HistoryMode::Hash)
///     .prefix("/console")
///     .on_update(|state| println!("now at {}", state.path()));
/// ```
#[derive(Clone, Default)]
pub struct RouterConfig {
    pub(crate) history: HistoryMode,
    pub(crate) prefix: Option<String>,
    pub(crate) document_url: Option<String>,
    pub(crate) on_update: Option<RoutingCallback>,
}

impl RouterConfig {
    /// Select where the current route is stored.
    ///
    /// Defaults to [`HistoryMode::Hash`].
    pub fn history(self, mode: HistoryMode) -> Self {
        Self {
            history: mode,
            ..self
        }
    }

    /// Serve the console from below `prefix`.
    ///
    /// Defaults to [`None`].
    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..self
        }
    }

    /// The document URL the hash history starts from, fragment included.
    ///
    /// In a browser with the `web` feature the real location is used unless this is set.
    /// Elsewhere it defaults to `http://localhost/`.
    pub fn document_url(self, url: impl Into<String>) -> Self {
        Self {
            document_url: Some(url.into()),
            ..self
        }
    }

    /// A function to be called whenever the routing is updated.
    ///
    /// The callback is invoked after the history changed, but before any view is loaded. It is
    /// called for navigations made through the router and for location changes the history
    /// reports from outside.
    ///
    /// Defaults to [`None`].
    pub fn on_update(self, callback: impl Fn(&RouteState) + 'static) -> Self {
        Self {
            on_update: Some(Rc::new(callback)),
            ..self
        }
    }

    /// The selected history mode.
    pub fn history_mode(&self) -> HistoryMode {
        self.history
    }

    pub(crate) fn build_history(&self) -> Result<Rc<dyn History>, RouterError> {
        let mode = self.history;

        if mode == HistoryMode::Memory {
            let history = match &self.prefix {
                Some(prefix) => MemoryHistory::default().with_prefix(prefix),
                None => MemoryHistory::default(),
            };
            return Ok(Rc::new(history));
        }

        #[cfg(feature = "web")]
        {
            if self.document_url.is_none() {
                return delivery_history::WebHashHistory::new(self.prefix.clone())
                    .map(|history| Rc::new(history) as Rc<dyn History>)
                    .ok_or_else(|| RouterError::History {
                        mode,
                        reason: "no browser window is available".to_string(),
                    });
            }
        }

        let history = match &self.document_url {
            Some(url) => HashHistory::from_url(url).map_err(|err| RouterError::History {
                mode,
                reason: format!("invalid document url `{url}`: {err}"),
            })?,
            None => HashHistory::default(),
        };

        Ok(match &self.prefix {
            Some(prefix) => Rc::new(history.with_prefix(prefix)),
            None => Rc::new(history),
        })
    }
}

use thiserror::Error;

use crate::{LoadError, RoutePath};

/// Errors surfaced by the [`Router`](crate::Router).
///
/// Unmatched locations are not errors, they resolve to [`RouteState::NotFound`](crate::RouteState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The loader of the matched route failed.
    #[error("failed to load the view for {path}: {source}")]
    Load {
        /// The matched route.
        path: RoutePath,
        /// The loader failure.
        #[source]
        source: LoadError,
    },

    /// The configured history could not be created.
    #[error("failed to set up {mode} history: {reason}")]
    History {
        /// The requested history mode.
        mode: delivery_history::HistoryMode,
        /// What went wrong.
        reason: String,
    },
}

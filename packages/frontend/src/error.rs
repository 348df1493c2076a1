use delivery_history::UnknownHistoryMode;
use delivery_router::{RouteTableError, RouterError};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop the console from starting or rendering.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("I/O Error: {0}")]
    IO(#[from] std::io::Error),
}

/// A configuration value could not be used.
#[derive(ThisError, Debug, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    HistoryMode(#[from] UnknownHistoryMode),

    #[error("invalid origin `{origin}`: {source}")]
    InvalidOrigin {
        origin: String,
        source: url::ParseError,
    },
}

#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod error;
mod loader;
mod path;
mod router_cfg;
mod service;
mod table;

pub use error::*;
pub use loader::*;
pub use path::*;
pub use router_cfg::*;
pub use service::*;
pub use table::*;

pub use delivery_history::{HashHistory, History, HistoryMode, MemoryHistory};

#[cfg(feature = "web")]
pub use delivery_history::WebHashHistory;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::{
        History, HistoryMode, LoadError, Loader, Outcome, RouteState, RouteTable, Router,
        RouterConfig, RouterError,
    };
}

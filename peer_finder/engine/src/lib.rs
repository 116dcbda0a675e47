//! Peer Finder Engine
//!
//! Discovers the members of a clustered service from its DNS SRV records and
//! runs a hook script whenever the membership that includes this member changes.

pub mod action;
pub mod bootstrap;
pub mod config;
pub mod discover;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;
pub mod watcher;

pub use action::{ActionRunner, ShellActionRunner};
pub use bootstrap::{Bootstrap, init_bootstrap};
pub use config::PeerFinderConfig;
pub use discover::{DnsSrvResolver, SrvResolver, discover_peers};
pub use error::{PeerFinderError, Result};
pub use watcher::{MembershipWatcher, TickOutcome};

#[cfg(test)]
mod tests;

//! Centralized peer finder error types.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

#[derive(Error, Debug)]
pub enum PeerFinderError {
    /// Missing or inconsistent startup input.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The resolver configuration could not be read.
    #[error("Unable to read {}: {source}", path.display())]
    ResolvConf {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A domain inference pattern failed to compile.
    #[error("Failed to create regular expression: {0}")]
    Pattern(#[from] regex::Error),
    /// The local hostname could not be determined.
    #[error("Failed to get hostname: {0}")]
    Hostname(#[source] std::io::Error),
    /// DNS SRV query failure.
    #[error("Lookup error: {0}")]
    Lookup(#[from] ResolveError),
    /// The action executable could not be started or fed.
    #[error("Failed to execute {script}: {source}")]
    ActionSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },
    /// The action ran but exited unsuccessfully.
    #[error("Failed to execute {script}: {output}, err: {status}")]
    ActionFailed {
        script: String,
        status: ExitStatus,
        output: String,
    },
}

impl PeerFinderError {
    /// Whether the error must terminate the process.
    /// Only DNS lookups are retried by the polling loop.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PeerFinderError::Lookup(_))
    }
}

pub type Result<T> = std::result::Result<T, PeerFinderError>;

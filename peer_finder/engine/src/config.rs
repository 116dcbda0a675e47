//! Immutable startup configuration shared by bootstrap and the watcher.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::HookScripts;

/// Platform resolver configuration consulted when no domain is given.
pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";

/// Environment variable supplying the namespace when `--ns` is empty.
pub const NAMESPACE_ENV: &str = "POD_NAMESPACE";

/// Fixed sleep between polling ticks.
pub const POLL_PERIOD: Duration = Duration::from_secs(1);

/// Everything the peer finder needs to know at startup.
/// Built once by the CLI and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PeerFinderConfig {
    pub scripts: HookScripts,
    /// Governing service whose SRV records enumerate peers.
    pub service: String,
    /// Explicit namespace; empty means fall back to `POD_NAMESPACE`.
    pub namespace: String,
    /// Explicit cluster domain; empty means infer from `resolv_conf`.
    pub domain: String,
    /// Comma-separated additional domains for multi-cluster lookups.
    pub extra_domains: String,
    pub resolv_conf: PathBuf,
    pub poll_period: Duration,
}

impl Default for PeerFinderConfig {
    fn default() -> Self {
        Self {
            scripts: HookScripts::default(),
            service: String::new(),
            namespace: String::new(),
            domain: String::new(),
            extra_domains: String::new(),
            resolv_conf: PathBuf::from(DEFAULT_RESOLV_CONF),
            poll_period: POLL_PERIOD,
        }
    }
}

//! Shared data types for the peer finder: peer sets, watcher phases and hook scripts.

use std::collections::BTreeSet;

/// Fully-qualified peer hostnames from one lookup round.
/// Ordered, so listing it yields the sorted sequence handed to actions.
pub type PeerSet = BTreeSet<String>;

/// Where the watcher is relative to seeing itself in DNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Self identity has not been part of an accepted peer set yet.
    AwaitingSelf,
    /// At least one peer set containing self has been accepted.
    Tracking,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingSelf => write!(f, "AwaitingSelf"),
            Self::Tracking => write!(f, "Tracking"),
        }
    }
}

/// The pair of configured hook scripts. An empty string means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookScripts {
    pub on_start: String,
    pub on_change: String,
}

impl HookScripts {
    pub fn new(on_start: impl Into<String>, on_change: impl Into<String>) -> Self {
        Self {
            on_start: on_start.into(),
            on_change: on_change.into(),
        }
    }

    /// At least one hook must be present for the watcher to run.
    pub fn any_configured(&self) -> bool {
        !self.on_start.is_empty() || !self.on_change.is_empty()
    }

    /// Script due on the first actionable tick.
    pub fn first(&self) -> &str {
        if self.on_start.is_empty() {
            &self.on_change
        } else {
            &self.on_start
        }
    }
}

/// Sorted listing of a peer set.
pub fn sorted_peers(peers: &PeerSet) -> Vec<String> {
    peers.iter().cloned().collect()
}

//! Polling loop that tracks peer membership and fires hooks on actionable changes.
//!
//! A change is actionable only when the freshly discovered peer set differs
//! from the last accepted one AND contains this member's own identity.

use std::time::Duration;

use tracing::{info, warn};

use crate::action::ActionRunner;
use crate::bootstrap::Bootstrap;
use crate::discover::{SrvResolver, discover_peers};
use crate::error::Result;
use crate::types::{HookScripts, PeerSet, Phase, sorted_peers};

/// What a single polling tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// DNS failed; state untouched, retried next tick.
    LookupFailed,
    /// Peers unchanged or self not visible yet.
    Skipped,
    /// The hook ran with the new peer list.
    Fired { script: String },
    /// No active script remains.
    Idle,
}

/// A discovered set is held back when nothing changed or self is still missing.
/// Both conditions form one gate: a change without self never fires.
pub fn should_skip(discovered: &PeerSet, accepted: &PeerSet, self_identity: &str) -> bool {
    discovered == accepted || !discovered.contains(self_identity)
}

pub struct MembershipWatcher<R, A> {
    resolver: R,
    runner: A,
    service_names: Vec<String>,
    self_identity: String,
    on_change: String,
    active_script: String,
    accepted: PeerSet,
    phase: Phase,
    poll_period: Duration,
}

impl<R, A> MembershipWatcher<R, A>
where
    R: SrvResolver,
    A: ActionRunner,
{
    pub fn new(
        resolver: R,
        runner: A,
        service_names: Vec<String>,
        self_identity: String,
        scripts: &HookScripts,
        poll_period: Duration,
    ) -> Self {
        if scripts.on_start.is_empty() {
            info!(
                "No on-start supplied, on-change {} will be applied on start.",
                scripts.on_change
            );
        }

        Self {
            resolver,
            runner,
            service_names,
            self_identity,
            on_change: scripts.on_change.clone(),
            active_script: scripts.first().to_string(),
            accepted: PeerSet::new(),
            phase: Phase::AwaitingSelf,
            poll_period,
        }
    }

    /// Watcher wired from a completed bootstrap.
    pub fn from_bootstrap(resolver: R, runner: A, bootstrap: &Bootstrap, poll_period: Duration) -> Self {
        Self::new(
            resolver,
            runner,
            bootstrap.service_names.clone(),
            bootstrap.self_identity.clone(),
            &bootstrap.scripts,
            poll_period,
        )
    }

    pub fn accepted(&self) -> &PeerSet {
        &self.accepted
    }

    pub fn active_script(&self) -> &str {
        &self.active_script
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs one lookup-compare-fire round.
    ///
    /// Only a failed hook is returned as an error; DNS errors are logged
    /// and reported as [`TickOutcome::LookupFailed`].
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        if self.active_script.is_empty() {
            return Ok(TickOutcome::Idle);
        }

        let discovered = match discover_peers(&self.resolver, &self.service_names).await {
            Ok(peers) => peers,
            Err(e) => {
                warn!("{e}");
                return Ok(TickOutcome::LookupFailed);
            }
        };

        if should_skip(&discovered, &self.accepted, &self.self_identity) {
            info!(
                "Have not found myself in list yet.\nMy Hostname: {}\nHosts in list: {}",
                self.self_identity,
                sorted_peers(&discovered).join(", ")
            );
            return Ok(TickOutcome::Skipped);
        }

        let peer_list = sorted_peers(&discovered);
        info!(
            "Peer list updated\nwas {:?}\nnow {:?}",
            sorted_peers(&self.accepted),
            peer_list
        );

        let script = self.active_script.clone();
        self.runner.run(&peer_list, &script).await?;

        self.accepted = discovered;
        self.active_script = self.on_change.clone();
        self.phase = Phase::Tracking;
        Ok(TickOutcome::Fired { script })
    }

    /// Polls until no active script remains or a hook fails.
    pub async fn run(mut self) -> Result<()> {
        while !self.active_script.is_empty() {
            self.tick().await?;
            tokio::time::sleep(self.poll_period).await;
        }

        info!("Peer finder exiting");
        Ok(())
    }
}

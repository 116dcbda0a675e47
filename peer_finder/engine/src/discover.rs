//! SRV-based peer discovery for a headless governing service.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::{PeerFinderError, Result};
use crate::types::PeerSet;

/// Source of SRV record targets. Swappable so the watcher can run without DNS.
#[async_trait]
pub trait SrvResolver: Send + Sync {
    /// Target hostnames of every SRV record published under `name`, as returned by DNS.
    async fn srv_targets(&self, name: &str) -> Result<Vec<String>>;
}

/// Resolver backed by the platform's DNS configuration.
pub struct DnsSrvResolver {
    resolver: TokioAsyncResolver,
}

impl DnsSrvResolver {
    /// Builds a resolver from the system resolver configuration.
    pub fn from_system_conf() -> Result<Self> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl SrvResolver for DnsSrvResolver {
    async fn srv_targets(&self, name: &str) -> Result<Vec<String>> {
        let lookup = self.resolver.srv_lookup(name).await?;
        Ok(lookup.iter().map(|srv| srv.target().to_utf8()).collect())
    }
}

/// A lookup round that stopped at the first failing name.
#[derive(Error, Debug)]
#[error("SRV lookup for {name} failed: {source}")]
pub struct PartialLookup {
    /// The qualified service name whose query failed.
    pub name: String,
    /// Peers collected from the names queried before the failure.
    pub partial: PeerSet,
    #[source]
    pub source: PeerFinderError,
}

/// Queries every qualified service name and unions the discovered peers.
///
/// Stops at the first failing query; remaining names are not queried.
pub async fn discover_peers<R>(resolver: &R, service_names: &[String]) -> std::result::Result<PeerSet, PartialLookup>
where
    R: SrvResolver + ?Sized,
{
    let mut peers = PeerSet::new();

    for name in service_names {
        let targets = match resolver.srv_targets(name).await {
            Ok(targets) => targets,
            Err(source) => {
                return Err(PartialLookup {
                    name: name.clone(),
                    partial: peers,
                    source,
                });
            }
        };

        debug!(service = %name, records = targets.len(), "SRV lookup complete");
        for target in targets {
            peers.insert(strip_root(&target).to_string());
        }
    }

    Ok(peers)
}

/// SRV targets end in "." for the root domain; drop exactly one.
pub fn strip_root(target: &str) -> &str {
    target.strip_suffix('.').unwrap_or(target)
}

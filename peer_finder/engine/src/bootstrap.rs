// File: src/bootstrap.rs

use tracing::info;

use crate::config::{NAMESPACE_ENV, PeerFinderConfig};
use crate::domain;
use crate::error::{PeerFinderError, Result};
use crate::types::HookScripts;

/// Startup context resolved once from configuration, environment and DNS settings
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub hostname: String,
    pub namespace: String,
    /// Primary domain first, then extra domains
    pub domains: Vec<String>,
    /// `service.domain` for each search domain
    pub service_names: Vec<String>,
    pub self_identity: String,
    pub scripts: HookScripts,
}

impl Bootstrap {
    pub fn primary_domain(&self) -> &str {
        &self.domains[0]
    }
}

/// Local hostname as reported by the OS (pod name under Kubernetes)
pub fn local_hostname() -> Result<String> {
    let name = hostname::get().map_err(PeerFinderError::Hostname)?;
    Ok(name.to_string_lossy().to_string())
}

/// Explicit namespace wins, then the environment value
pub fn resolve_namespace(explicit: &str, from_env: Option<String>) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    from_env.unwrap_or_default()
}

/// Reads the namespace fallback from `POD_NAMESPACE`
pub fn namespace_from_env() -> Option<String> {
    std::env::var(NAMESPACE_ENV).ok()
}

/// Initializes the member's identity and the names to query
pub fn init_bootstrap(config: &PeerFinderConfig, hostname: &str, env_namespace: Option<String>) -> Result<Bootstrap> {
    let namespace = resolve_namespace(&config.namespace, env_namespace);

    let primary = domain::resolve_primary_domain(&namespace, &config.domain, &config.resolv_conf)?;

    if config.service.is_empty() || primary.is_empty() || !config.scripts.any_configured() {
        return Err(PeerFinderError::Config(
            "Incomplete args, require --on-change and/or --on-start, --service and --ns or an env var for POD_NAMESPACE.".into(),
        ));
    }

    let domains = domain::search_domains(primary, &namespace, &config.extra_domains);
    info!("Following domains will be searched {:?}", domains);

    let self_identity = domain::self_identity(hostname, &config.service, &domains[0]);
    let service_names = domain::qualified_service_names(&config.service, &domains);

    Ok(Bootstrap {
        hostname: hostname.to_string(),
        namespace,
        domains,
        service_names,
        self_identity,
        scripts: config.scripts.clone(),
    })
}

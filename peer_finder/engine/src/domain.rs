//! Derives the DNS domains to search from flags or the local resolver configuration.

use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::error::{PeerFinderError, Result};

// Matches a `<label>.svc.<suffix>` search entry, used verbatim.
const CLUSTER_SEARCH_PATTERN: &str = r"\A(.*\n)*search\s{1,}(.*\s{1,})*(?P<goal>[a-zA-Z0-9-]{1,63}.svc.([a-zA-Z0-9-]{1,63}\.)*[a-zA-Z0-9]{2,63})";

// Matches a `svc.<suffix>` search entry, namespace gets prepended.
const NAMESPACED_SEARCH_PATTERN: &str = r"\A(.*\n)*search\s{1,}(.*\s{1,})*(?P<goal>svc.([a-zA-Z0-9-]{1,63}\.)*[a-zA-Z0-9]{2,63})";

/// Compiles the search-path pattern matching the namespace situation.
pub fn inference_pattern(namespace: &str) -> Result<Regex> {
    let pattern = if namespace.is_empty() {
        CLUSTER_SEARCH_PATTERN
    } else {
        NAMESPACED_SEARCH_PATTERN
    };
    Ok(Regex::new(pattern)?)
}

/// Infers the primary domain from resolver configuration text.
///
/// Returns an empty string when no `search` entry has the expected shape;
/// callers must treat that as a configuration error.
pub fn infer_primary_domain(resolv_conf: &str, namespace: &str) -> Result<String> {
    let re = inference_pattern(namespace)?;

    let goal = match re.captures(resolv_conf).and_then(|caps| caps.name("goal")) {
        Some(goal) => goal.as_str(),
        None => return Ok(String::new()),
    };

    if namespace.is_empty() {
        Ok(goal.to_string())
    } else {
        Ok(format!("{namespace}.{goal}"))
    }
}

/// Primary domain built from an explicit `--domain`.
pub fn explicit_primary_domain(namespace: &str, domain: &str) -> String {
    [namespace, "svc", domain].join(".")
}

/// Expands the comma-separated extra domain list.
///
/// Entries lacking the `.local` suffix get it appended; empty entries are skipped.
pub fn extra_domains(namespace: &str, list: &str) -> Vec<String> {
    list.split(',')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if entry.ends_with(".local") {
                [namespace, "svc", entry].join(".")
            } else {
                [namespace, "svc", entry, "local"].join(".")
            }
        })
        .collect()
}

/// Resolves the primary domain, reading `resolv_conf` only when no domain was given.
pub fn resolve_primary_domain(namespace: &str, domain: &str, resolv_conf: &Path) -> Result<String> {
    if !domain.is_empty() {
        return Ok(explicit_primary_domain(namespace, domain));
    }

    let contents = std::fs::read_to_string(resolv_conf).map_err(|source| {
        PeerFinderError::ResolvConf {
            path: resolv_conf.to_path_buf(),
            source,
        }
    })?;

    let primary = infer_primary_domain(&contents, namespace)?;
    info!("Determined domain to be {primary}");
    Ok(primary)
}

/// Builds the ordered search list: primary domain first, then extras.
pub fn search_domains(primary: String, namespace: &str, extra: &str) -> Vec<String> {
    let mut domains = vec![primary];
    domains.extend(extra_domains(namespace, extra));
    domains
}

/// One `service.domain` query name per search domain.
pub fn qualified_service_names(service: &str, domains: &[String]) -> Vec<String> {
    domains
        .iter()
        .map(|domain| format!("{service}.{domain}"))
        .collect()
}

/// Name this member expects to find once DNS has converged.
pub fn self_identity(hostname: &str, service: &str, primary_domain: &str) -> String {
    [hostname, service, primary_domain].join(".")
}

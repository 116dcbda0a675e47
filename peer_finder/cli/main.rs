//! peer-finder CLI
//!
//! Looks up the peers of a governing service and runs hooks as membership changes.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use peer_finder_engine::bootstrap::{init_bootstrap, local_hostname, namespace_from_env};
use peer_finder_engine::config::{DEFAULT_RESOLV_CONF, POLL_PERIOD, PeerFinderConfig};
use peer_finder_engine::logging::{LogFormat, init_logging};
use peer_finder_engine::types::HookScripts;
use peer_finder_engine::{DnsSrvResolver, MembershipWatcher, ShellActionRunner};
use tracing::error;

#[derive(Parser)]
#[command(name = "peer-finder", version, about = "Lookup hostnames of endpoints in a service")]
struct Cli {
    #[arg(long = "on-change", default_value = "", help = "Script to run on change, must accept a new line separated list of peers via stdin.")]
    on_change: String,

    #[arg(long = "on-start", default_value = "", help = "Script to run on start, must accept a new line separated list of peers via stdin.")]
    on_start: String,

    #[arg(long, default_value = "", help = "Governing service responsible for the DNS records of the domain this pod is in.")]
    service: String,

    #[arg(long = "ns", default_value = "", help = "The namespace this pod is running in. If unspecified, the POD_NAMESPACE env var is used.")]
    namespace: String,

    #[arg(long, default_value = "", help = "The cluster domain, if not set it is determined from the resolver configuration.")]
    domain: String,

    #[arg(long = "extdomain", default_value = "", help = "Comma-separated list of additional domains to probe (multi cluster peer finding).")]
    extra_domains: String,

    #[arg(long = "resolv-conf", default_value = DEFAULT_RESOLV_CONF, help = "Resolver configuration used to infer the cluster domain.")]
    resolv_conf: PathBuf,

    #[arg(long = "log-format", value_enum, default_value_t = Format::Text)]
    log_format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => LogFormat::Text,
            Format::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    fn into_config(self) -> PeerFinderConfig {
        PeerFinderConfig {
            scripts: HookScripts::new(self.on_start, self.on_change),
            service: self.service,
            namespace: self.namespace,
            domain: self.domain,
            extra_domains: self.extra_domains,
            resolv_conf: self.resolv_conf,
            poll_period: POLL_PERIOD,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format.into());

    match run(cli.into_config()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: PeerFinderConfig) -> anyhow::Result<()> {
    // Step 1: identity and search domains, all failures here are configuration errors
    let hostname = local_hostname()?;
    let bootstrap = init_bootstrap(&config, &hostname, namespace_from_env())?;

    // Step 2: DNS from the platform resolver settings
    let resolver = DnsSrvResolver::from_system_conf().context("Failed to initialize DNS resolver")?;

    // Step 3: poll until the hooks are done or one fails
    let watcher = MembershipWatcher::from_bootstrap(resolver, ShellActionRunner::default(), &bootstrap, config.poll_period);
    watcher.run().await?;
    Ok(())
}

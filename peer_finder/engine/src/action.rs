//! Runs the configured hook script with the current peer list on stdin.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info};

use crate::error::{PeerFinderError, Result};

/// Executes a hook for a sorted peer list.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// Runs `script` with `peers` on stdin and returns its combined output.
    /// Any error is fatal to the caller.
    async fn run(&self, peers: &[String], script: &str) -> Result<String>;
}

/// Stdin payload for a hook: one peer per line.
pub fn peer_stdin(peers: &[String]) -> String {
    let mut payload = peers.join("\n");
    payload.push('\n');
    payload
}

/// Runs hooks through a shell so scripts may carry arguments.
pub struct ShellActionRunner {
    shell: String,
}

impl ShellActionRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }
}

impl Default for ShellActionRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

#[async_trait]
impl ActionRunner for ShellActionRunner {
    async fn run(&self, peers: &[String], script: &str) -> Result<String> {
        let stdin = peer_stdin(peers);
        info!("execing: {script} with stdin: {}", peers.join("\n"));

        let spawn_err = |source| PeerFinderError::ActionSpawn {
            script: script.to_string(),
            source,
        };

        // stderr is folded into stdout inside the shell to keep ordering
        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(format!("exec 2>&1\n{script}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut pipe) = child.stdin.take() {
            match pipe.write_all(stdin.as_bytes()).await {
                // hooks are free to ignore their input
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(spawn_err(e)),
                _ => {}
            }
        }

        let result = child.wait_with_output().await.map_err(spawn_err)?;
        let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&result.stderr));

        if !result.status.success() {
            error!("Failed to execute {script}: {output}, err: {}", result.status);
            return Err(PeerFinderError::ActionFailed {
                script: script.to_string(),
                status: result.status,
                output,
            });
        }

        info!("{output}");
        Ok(output)
    }
}

//! In-memory doubles for the DNS and hook seams.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use trust_dns_resolver::error::ResolveError;

use crate::action::ActionRunner;
use crate::discover::SrvResolver;
use crate::error::{PeerFinderError, Result};

type Answer = std::result::Result<Vec<String>, String>;

/// Serves queued answers per name. The last queued answer repeats forever.
#[derive(Clone, Default)]
pub struct ScriptedResolver {
    answers: Arc<Mutex<HashMap<String, VecDeque<Answer>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedResolver {
    pub fn answer(&self, name: &str, targets: &[&str]) -> &Self {
        self.push(name, Ok(targets.iter().map(|t| t.to_string()).collect()))
    }

    pub fn fail(&self, name: &str, msg: &str) -> &Self {
        self.push(name, Err(msg.to_string()))
    }

    fn push(&self, name: &str, answer: Answer) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SrvResolver for ScriptedResolver {
    async fn srv_targets(&self, name: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(name.to_string());

        let mut answers = self.answers.lock().unwrap();
        let queue = answers.get_mut(name);
        let answer = match queue {
            Some(q) if q.len() > 1 => q.pop_front().unwrap(),
            Some(q) if q.len() == 1 => q[0].clone(),
            _ => Err(format!("no records for {name}")),
        };

        answer.map_err(|msg| PeerFinderError::Lookup(ResolveError::from(msg)))
    }
}

/// Records every hook invocation; optionally fails all of them.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    pub invocations: Arc<Mutex<Vec<(Vec<String>, String)>>>,
    pub fail: bool,
}

impl RecordingRunner {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn invocations(&self) -> Vec<(Vec<String>, String)> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.invocations().into_iter().map(|(_, script)| script).collect()
    }
}

#[async_trait]
impl ActionRunner for RecordingRunner {
    async fn run(&self, peers: &[String], script: &str) -> Result<String> {
        self.invocations
            .lock()
            .unwrap()
            .push((peers.to_vec(), script.to_string()));

        if self.fail {
            return Err(PeerFinderError::ActionSpawn {
                script: script.to_string(),
                source: std::io::Error::other("hook refused"),
            });
        }
        Ok(String::new())
    }
}

use std::collections::BTreeMap;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::warn;

use crate::pool::PoolDone;
use crate::types::{DisplayPolicy, ProbeOutcome, ScanResult};

/// Accumulates outcomes for one host.
///
/// Outcomes are keyed by port, so completion order never leaks into the
/// result. Filtering only happens in [`Collector::finalize`].
#[derive(Debug)]
pub struct Collector {
    host: String,
    outcomes: BTreeMap<u16, bool>,
    observed: u64,
    started_at: String,
    started: Instant,
}

impl Collector {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            outcomes: BTreeMap::new(),
            observed: 0,
            started_at: crate::types::now_rfc3339(),
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, outcome: ProbeOutcome) {
        self.observed += 1;
        if self.outcomes.insert(outcome.port, outcome.open).is_some() {
            warn!(host = %self.host, port = outcome.port, "duplicate outcome");
        }
    }

    /// Fold every outcome from `rx` until the channel closes.
    pub async fn drain(&mut self, rx: &mut mpsc::Receiver<ProbeOutcome>) {
        while let Some(outcome) = rx.recv().await {
            self.record(outcome);
        }
    }

    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Every outcome seen so far, ascending by port.
    pub fn outcomes(&self) -> impl Iterator<Item = ProbeOutcome> + '_ {
        self.outcomes
            .iter()
            .map(|(&port, &open)| ProbeOutcome { port, open })
    }

    /// Produce the host's result. Takes the pool's completion report so a
    /// result cannot be built while workers may still be producing.
    pub fn finalize(self, done: PoolDone, policy: DisplayPolicy) -> ScanResult {
        if done.probed != self.observed {
            warn!(
                host = %self.host,
                probed = done.probed,
                observed = self.observed,
                "outcome count does not match probe count"
            );
        }
        let open_count = self.outcomes.values().filter(|&&open| open).count() as u64;
        let entries = self.outcomes().filter(|o| policy.admits(o)).collect();
        ScanResult {
            host: self.host,
            scanned: self.observed,
            open_count,
            entries,
            started_at: self.started_at,
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

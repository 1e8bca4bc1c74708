use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::collector::Collector;
use crate::config::{ScanConfig, ScanPlan};
use crate::error::Result;
use crate::pool::WorkerPool;
use crate::probe::{Probe, TcpProbe};
use crate::types::ScanResult;

/// Lifecycle of a single host's scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Pending,
    Enumerating,
    Scanning,
    Collecting,
    Done,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Enumerating => "enumerating",
            Self::Scanning => "scanning",
            Self::Collecting => "collecting",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

struct HostScan<'a> {
    host: &'a str,
    phase: ScanPhase,
}

impl<'a> HostScan<'a> {
    fn new(host: &'a str) -> Self {
        Self {
            host,
            phase: ScanPhase::Pending,
        }
    }

    fn advance(&mut self, next: ScanPhase) {
        debug!(host = self.host, from = %self.phase, to = %next, "scan phase");
        self.phase = next;
    }
}

/// Runs a validated [`ScanPlan`], one host at a time.
pub struct Scanner {
    plan: ScanPlan,
    pool: WorkerPool,
}

impl Scanner {
    /// Scanner with a TCP connect probe using the plan's timeout.
    pub fn new(plan: ScanPlan) -> Self {
        let prober = Arc::new(TcpProbe::new(plan.timeout()));
        Self::with_probe(plan, prober)
    }

    pub fn with_probe(plan: ScanPlan, prober: Arc<dyn Probe>) -> Self {
        let pool = WorkerPool::new(plan.workers(), prober);
        Self { plan, pool }
    }

    /// Validate `config` and build a scanner. Nothing is probed if this fails.
    pub fn from_config(config: &ScanConfig, prober: Arc<dyn Probe>) -> Result<Self> {
        let plan = config.validate()?;
        Ok(Self::with_probe(plan, prober))
    }

    pub fn plan(&self) -> &ScanPlan {
        &self.plan
    }

    /// Scan every host in order and return one result per host.
    pub async fn run(&self) -> Result<Vec<ScanResult>> {
        info!(
            hosts = self.plan.hosts().len(),
            ports = self.plan.ports().len(),
            workers = self.plan.workers().get(),
            "starting scan"
        );
        let mut results = Vec::with_capacity(self.plan.hosts().len());
        for host in self.plan.hosts().iter() {
            results.push(self.scan_host(host).await?);
        }
        info!(hosts = results.len(), "scan complete");
        Ok(results)
    }

    /// Run one host through enumerate, dispatch and collect.
    pub async fn scan_host(&self, host: &Arc<str>) -> Result<ScanResult> {
        let mut state = HostScan::new(host);

        state.advance(ScanPhase::Enumerating);
        let tasks = self.plan.ports().tasks_for(host);
        let mut collector = Collector::new(&**host);

        state.advance(ScanPhase::Scanning);
        let mut handle = self.pool.spawn(tasks);

        state.advance(ScanPhase::Collecting);
        collector.drain(&mut handle.outcomes).await;
        let done = handle.done.await??;

        let result = collector.finalize(done, self.plan.policy());
        state.advance(ScanPhase::Done);
        info!(
            host = %host,
            scanned = result.scanned,
            open = result.open_count,
            elapsed_ms = result.elapsed_ms,
            "host scanned"
        );
        Ok(result)
    }
}

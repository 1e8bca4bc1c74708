use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::ConfigError;
use crate::hosts::HostList;
use crate::ports::{PortSelection, PortSpec};
use crate::types::DisplayPolicy;

pub const DEFAULT_WORKERS: i64 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Scan settings as received from the command line or another front end.
///
/// Only syntactic checks have happened at this point. [`ScanConfig::validate`]
/// applies the scan semantics and produces a [`ScanPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub hosts: Vec<String>,
    pub ports: PortSelection,
    pub workers: i64,
    pub show_all: bool,
    pub timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            ports: PortSelection::default(),
            workers: DEFAULT_WORKERS,
            show_all: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScanConfig {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_ports(mut self, ports: PortSelection) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_workers(mut self, workers: i64) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<ScanPlan, ConfigError> {
        let ports = self.ports.resolve()?;
        let workers = usize::try_from(self.workers)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(ConfigError::InvalidWorkerCount(self.workers))?;
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let hosts = HostList::from_entries(&self.hosts)?;

        Ok(ScanPlan {
            hosts,
            ports,
            workers,
            policy: DisplayPolicy::from_show_all(self.show_all),
            timeout: self.timeout,
        })
    }
}

/// A validated, immutable scan run. Only [`ScanConfig::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    hosts: HostList,
    ports: PortSpec,
    workers: NonZeroUsize,
    policy: DisplayPolicy,
    timeout: Duration,
}

impl ScanPlan {
    pub fn hosts(&self) -> &HostList {
        &self.hosts
    }

    pub fn ports(&self) -> &PortSpec {
        &self.ports
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn policy(&self) -> DisplayPolicy {
        self.policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

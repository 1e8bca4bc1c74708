use std::fmt;
use std::sync::Arc;

use ::time::{format_description::well_known, OffsetDateTime};
use serde::{Deserialize, Serialize};

/// One (host, port) pair handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    pub host: Arc<str>,
    pub port: u16,
}

impl Task {
    pub fn new(host: Arc<str>, port: u16) -> Self {
        Self { host, port }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Result of a single connection attempt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub port: u16,
    pub open: bool,
}

/// Which outcomes make it into a finalized [`ScanResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    #[default]
    OpenOnly,
    All,
}

impl DisplayPolicy {
    pub fn from_show_all(show_all: bool) -> Self {
        if show_all {
            Self::All
        } else {
            Self::OpenOnly
        }
    }

    pub fn admits(self, outcome: &ProbeOutcome) -> bool {
        match self {
            Self::All => true,
            Self::OpenOnly => outcome.open,
        }
    }
}

/// Finalized results for one host, sorted ascending by port.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScanResult {
    pub host: String,
    /// Number of outcomes observed, before filtering.
    pub scanned: u64,
    pub open_count: u64,
    pub entries: Vec<ProbeOutcome>,
    pub started_at: String,
    pub elapsed_ms: u64,
}

impl ScanResult {
    pub fn open_ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().filter(|e| e.open).map(|e| e.port)
    }
}

/// Current UTC time as RFC 3339, used for `ScanResult::started_at`.
pub(crate) fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

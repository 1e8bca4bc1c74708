use thiserror::Error;

/// Problems with the scan configuration itself.
///
/// All of these are detected before any connection attempt is made and abort
/// the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid port range {start}-{end}: expected 1 <= start <= end <= 65535")]
    InvalidRange { start: i64, end: i64 },

    #[error("a port list cannot be combined with a custom start/end range")]
    ConflictingPortSpec,

    #[error("line {line}: invalid port number: {value}")]
    InvalidPort { line: usize, value: String },

    #[error("empty ports list")]
    EmptyPorts,

    #[error("line {line}: invalid host: {value:?}")]
    InvalidHost { line: usize, value: String },

    #[error("empty hosts list")]
    EmptyHosts,

    #[error("number of workers must be greater than 0 (got {0})")]
    InvalidWorkerCount(i64),

    #[error("connection timeout must be greater than zero")]
    ZeroTimeout,
}

/// Run-level failure of a scan.
///
/// Network failures never show up here: a refused or timed out connection is
/// just a closed port.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("scan worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;

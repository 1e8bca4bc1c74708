//! Library crate for connscan: a bounded-concurrency TCP connect scanner.
pub mod collector;
pub mod config;
pub mod error;
pub mod hosts;
pub mod input;
pub mod logging;
pub mod pool;
pub mod ports;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod types;

pub use config::{ScanConfig, ScanPlan};
pub use error::{ConfigError, ScanError};
pub use ports::{PortSelection, PortSpec};
pub use scanner::Scanner;
pub use types::{ProbeOutcome, ScanResult};

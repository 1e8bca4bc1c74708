use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use connscan::config::{DEFAULT_WORKERS, ScanConfig};
use connscan::ports::{PortSelection, DEFAULT_END_PORT, DEFAULT_START_PORT};
use connscan::{input, logging, report, Scanner};

use anyhow::Result;
use clap::Parser;

/// connscan — concurrent TCP connect scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "connscan",
    version,
    about = "Concurrent TCP connect scanner.",
    after_help = "Examples:\n  connscan example.com\n  connscan -p 80 -e 443 example.com\n  connscan -f hosts.txt -p 1 -e 1024 -w 200\n  connscan -P ports.txt example.com"
)]
struct Cli {
    /// Host to scan (hostname or IP address).
    #[arg(required_unless_present = "hosts_file", conflicts_with = "hosts_file")]
    host: Option<String>,

    /// File containing list of hosts to scan, one per line.
    #[arg(short = 'f', long)]
    hosts_file: Option<PathBuf>,

    /// File containing list of ports to scan, one per line.
    #[arg(short = 'P', long)]
    ports_file: Option<PathBuf>,

    /// Start port for scanning.
    #[arg(short = 'p', long, default_value_t = DEFAULT_START_PORT, allow_negative_numbers = true)]
    start_port: i64,

    /// End port for scanning.
    #[arg(short = 'e', long, default_value_t = DEFAULT_END_PORT, allow_negative_numbers = true)]
    end_port: i64,

    /// Number of concurrent workers.
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORKERS, allow_negative_numbers = true)]
    workers: i64,

    /// Show all ports, including closed ones.
    #[arg(short = 'a', long = "all", default_value_t = false)]
    show_all: bool,

    /// Connect timeout per port in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Write results as pretty JSON to this path.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let hosts = match &cli.hosts_file {
        Some(path) => input::load_hosts_from_path(path)?,
        None => cli.host.iter().cloned().collect(),
    };

    let ports = match &cli.ports_file {
        Some(path) => PortSelection {
            list: Some(input::load_ports_from_path(path)?),
            ..PortSelection::range(cli.start_port, cli.end_port)
        },
        None => PortSelection::range(cli.start_port, cli.end_port),
    };

    let config = ScanConfig::new(hosts)
        .with_ports(ports)
        .with_workers(cli.workers)
        .with_show_all(cli.show_all)
        .with_timeout(Duration::from_millis(cli.timeout_ms));
    let scanner = Scanner::new(config.validate()?);

    let mut results = Vec::with_capacity(scanner.plan().hosts().len());
    let stdout = std::io::stdout();
    for host in scanner.plan().hosts().iter() {
        println!("Scanning host: {host}");
        let result = scanner.scan_host(host).await?;
        let mut out = stdout.lock();
        report::write_text(&mut out, &result)?;
        out.flush()?;
        results.push(result);
    }

    if let Some(path) = cli.output.as_deref() {
        if let Err(e) = report::write_results_json(path, &results) {
            eprintln!("Failed to write JSON to {}: {}", path.display(), e);
        } else {
            println!("Wrote JSON results to {}", path.display());
        }
    }

    Ok(())
}

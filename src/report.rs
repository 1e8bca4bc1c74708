use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::types::ScanResult;

/// Write the plain text report for one host.
pub fn write_text<W: Write>(mut out: W, result: &ScanResult) -> io::Result<()> {
    for entry in &result.entries {
        let state = if entry.open { "open" } else { "closed" };
        writeln!(out, "Port {}: {}", entry.port, state)?;
    }
    if result.open_count == 0 {
        writeln!(out, "No open ports found.")?;
    } else {
        writeln!(
            out,
            "Total open ports on {}: {}",
            result.host, result.open_count
        )?;
    }
    writeln!(out)
}

pub fn write_results_json(path: &Path, results: &[ScanResult]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

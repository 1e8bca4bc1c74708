use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read a file into trimmed lines, with blank lines dropped.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_lines(&content))
}

pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Read a hosts file. An empty file is an error.
pub fn load_hosts_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let hosts = read_lines(path).context("error reading hosts file")?;
    if hosts.is_empty() {
        bail!("error reading hosts file: empty hosts file {}", path.display());
    }
    Ok(hosts)
}

/// Read a ports file. Entries are validated later, together with the rest of
/// the configuration.
pub fn load_ports_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let ports = read_lines(path).context("error reading ports file")?;
    if ports.is_empty() {
        bail!("error reading ports file: empty ports file {}", path.display());
    }
    Ok(ports)
}

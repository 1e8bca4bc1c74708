use std::sync::Arc;

use crate::error::ConfigError;

/// Ordered, non-empty list of hosts, scanned one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostList(Vec<Arc<str>>);

impl HostList {
    /// Interpret entries as host identifiers (hostname or IP literal).
    ///
    /// Entries are trimmed and a bracketed IPv6 literal such as `[::1]` is
    /// unwrapped. An empty entry, or one containing whitespace or control
    /// characters, is rejected. Names that are merely unresolvable are kept:
    /// they fail at connect time and report no open ports.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hosts = Vec::new();
        for (idx, raw) in entries.into_iter().enumerate() {
            let host = normalize_host(raw.as_ref()).ok_or_else(|| ConfigError::InvalidHost {
                line: idx + 1,
                value: raw.as_ref().to_string(),
            })?;
            hosts.push(Arc::from(host));
        }
        if hosts.is_empty() {
            return Err(ConfigError::EmptyHosts);
        }
        Ok(Self(hosts))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_host(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let host = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    if host.is_empty() || host.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    Some(host)
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::types::Task;

pub const MIN_PORT: i64 = 1;
pub const MAX_PORT: i64 = 65535;

/// Default start of the scanned range when no port list is given.
pub const DEFAULT_START_PORT: i64 = MIN_PORT;
/// Default end of the scanned range when no port list is given.
pub const DEFAULT_END_PORT: i64 = MAX_PORT;

/// The ports to probe on every host.
///
/// Construct through [`PortSpec::range`] or [`PortSpec::from_entries`]; both
/// validate, so a `PortSpec` always resolves to a non-empty, duplicate-free
/// list of ports in `1..=65535`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec(Repr);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    /// `1 <= start <= end`
    Range { start: u16, end: u16 },
    /// Non-empty, no duplicates, no zero.
    List(Vec<u16>),
}

/// Port selection as handed over by the CLI layer, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSelection {
    pub start: i64,
    pub end: i64,
    /// Entries of an explicit port list, one port per entry.
    pub list: Option<Vec<String>>,
}

impl Default for PortSelection {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT,
            end: DEFAULT_END_PORT,
            list: None,
        }
    }
}

impl PortSelection {
    pub fn range(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            list: None,
        }
    }

    pub fn list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list: Some(entries.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Validate the selection and resolve it into a [`PortSpec`].
    ///
    /// A port list together with a non-default range is rejected rather than
    /// letting one silently win.
    pub fn resolve(&self) -> Result<PortSpec, ConfigError> {
        match &self.list {
            Some(_) if self.start != DEFAULT_START_PORT || self.end != DEFAULT_END_PORT => {
                Err(ConfigError::ConflictingPortSpec)
            }
            Some(entries) => PortSpec::from_entries(entries),
            None => PortSpec::range(self.start, self.end),
        }
    }
}

impl PortSpec {
    /// Inclusive range `start..=end`.
    pub fn range(start: i64, end: i64) -> Result<Self, ConfigError> {
        if !(MIN_PORT..=MAX_PORT).contains(&start)
            || !(MIN_PORT..=MAX_PORT).contains(&end)
            || start > end
        {
            return Err(ConfigError::InvalidRange { start, end });
        }
        Ok(Self(Repr::Range {
            start: start as u16,
            end: end as u16,
        }))
    }

    /// Parse an explicit list, one port per entry.
    ///
    /// Entries are trimmed and blank ones skipped. Anything that is not a
    /// decimal number in `1..=65535` fails the whole list. Duplicates keep
    /// their first position.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<u16> = Vec::new();
        let mut seen = HashSet::new();

        for (idx, raw) in entries.into_iter().enumerate() {
            let entry = raw.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            let port = parse_port_str(entry).ok_or_else(|| ConfigError::InvalidPort {
                line: idx + 1,
                value: entry.to_string(),
            })?;
            if seen.insert(port) {
                out.push(port);
            }
        }

        if out.is_empty() {
            return Err(ConfigError::EmptyPorts);
        }
        Ok(Self(Repr::List(out)))
    }

    /// Number of ports this spec resolves to.
    pub fn len(&self) -> usize {
        match &self.0 {
            Repr::Range { start, end } => usize::from(*end - *start) + 1,
            Repr::List(ports) => ports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_range(&self) -> bool {
        matches!(self.0, Repr::Range { .. })
    }

    /// Ports in scan order: ascending for a range, first-seen order for a list.
    pub fn ports(&self) -> Vec<u16> {
        match &self.0 {
            Repr::Range { start, end } => (*start..=*end).collect(),
            Repr::List(ports) => ports.clone(),
        }
    }

    /// Build the task set for one host.
    pub fn tasks_for(&self, host: &Arc<str>) -> Vec<Task> {
        self.ports()
            .into_iter()
            .map(|port| Task::new(Arc::clone(host), port))
            .collect()
    }
}

fn parse_port_str(s: &str) -> Option<u16> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let val: u32 = s.parse().ok()?;
    if val == 0 || val > MAX_PORT as u32 {
        return None;
    }
    Some(val as u16)
}

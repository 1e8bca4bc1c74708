#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use connscan::probe::Probe;
use connscan::types::Task;

/// Records every task it sees and reports the ports in `open` as open.
#[derive(Default)]
pub struct RecordingProbe {
    pub open: HashSet<u16>,
    pub calls: AtomicU64,
    pub seen: Mutex<HashMap<(String, u16), u32>>,
    /// Per-port delay derived from the port number, to shuffle completion order.
    pub jitter: bool,
    /// Fixed delays for specific ports.
    pub delays: HashMap<u16, Duration>,
}

impl RecordingProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_open(ports: impl IntoIterator<Item = u16>) -> Arc<Self> {
        Arc::new(Self {
            open: ports.into_iter().collect(),
            ..Self::default()
        })
    }

    pub fn jittered(ports: impl IntoIterator<Item = u16>) -> Arc<Self> {
        Arc::new(Self {
            open: ports.into_iter().collect(),
            jitter: true,
            ..Self::default()
        })
    }

    pub fn with_delay(port: u16, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delays: HashMap::from([(port, delay)]),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_repeats(&self) -> u32 {
        self.seen.lock().unwrap().values().copied().max().unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Probe for RecordingProbe {
    async fn probe(&self, task: &Task) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .seen
            .lock()
            .unwrap()
            .entry((task.host.to_string(), task.port))
            .or_insert(0) += 1;
        if self.jitter {
            // Higher ports finish first.
            let ms = u64::from(20 - (task.port % 20));
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if let Some(delay) = self.delays.get(&task.port) {
            tokio::time::sleep(*delay).await;
        }
        self.open.contains(&task.port)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;
use tracing::trace;

use crate::types::Task;

/// A single connectivity check against one task.
///
/// Implementations must not fail: every problem reaching the target counts
/// as "not open".
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, task: &Task) -> bool;
}

/// TCP connect scan with a fixed timeout.
///
/// The timeout bounds name resolution and the handshake together. On success
/// the stream is dropped straight away without reading or writing.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, task: &Task) -> bool {
        let connect = TcpStream::connect((&*task.host, task.port));
        match time::timeout(self.timeout, connect).await {
            Ok(Ok(_stream)) => {
                trace!(addr = %task, "open");
                true
            }
            Ok(Err(e)) => {
                trace!(addr = %task, error = %e, "closed");
                false
            }
            Err(_elapsed) => {
                trace!(addr = %task, "timed out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let task = Task::new(Arc::from("127.0.0.1"), port);
        assert!(TcpProbe::default().probe(&task).await);
    }

    #[tokio::test]
    async fn refused_port_is_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let task = Task::new(Arc::from("127.0.0.1"), port);
        assert!(!TcpProbe::default().probe(&task).await);
    }

    #[tokio::test]
    async fn unresolvable_host_is_closed() {
        let task = Task::new(Arc::from("invalid..host..format"), 80);
        assert!(!TcpProbe::new(Duration::from_millis(500)).probe(&task).await);
    }
}

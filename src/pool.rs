//! Fixed-size pool of probe workers.
//!
//! Tasks flow through one bounded queue shared by every worker, so whichever
//! worker is free claims the next task. Outcomes flow back over a second
//! bounded channel to a single consumer. The pool's barrier task owns the
//! last outcome sender and only drops it after every worker has been joined,
//! which is what closes the outcome channel.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, trace};

use crate::error::ScanError;
use crate::probe::Probe;
use crate::types::{ProbeOutcome, Task};

type TaskQueue = Arc<Mutex<mpsc::Receiver<Task>>>;

pub struct WorkerPool {
    workers: NonZeroUsize,
    prober: Arc<dyn Probe>,
}

/// Reported by the barrier once every worker has terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDone {
    /// Workers actually started, `min(W, tasks)` and at least one.
    pub effective_workers: usize,
    pub probed: u64,
    /// Tasks probed by each worker, indexed by worker id.
    pub per_worker: Vec<u64>,
}

/// A running pool: the outcome stream plus the completion barrier.
pub struct PoolHandle {
    pub outcomes: mpsc::Receiver<ProbeOutcome>,
    pub done: JoinHandle<Result<PoolDone, ScanError>>,
}

impl WorkerPool {
    pub fn new(workers: NonZeroUsize, prober: Arc<dyn Probe>) -> Self {
        Self { workers, prober }
    }

    /// Start probing `tasks`.
    ///
    /// Never starts more workers than there are tasks, and always at least
    /// one. The caller must drain `outcomes` concurrently with awaiting
    /// `done`; both channels are bounded.
    pub fn spawn(&self, tasks: Vec<Task>) -> PoolHandle {
        let workers = self.workers.get().min(tasks.len()).max(1);
        let (task_tx, task_rx) = mpsc::channel::<Task>(workers);
        let (outcome_tx, outcome_rx) = mpsc::channel::<ProbeOutcome>(workers);
        let queue: TaskQueue = Arc::new(Mutex::new(task_rx));

        let dispatcher = tokio::spawn(async move {
            for task in tasks {
                if task_tx.send(task).await.is_err() {
                    break;
                }
            }
        });

        let mut set = JoinSet::new();
        for id in 0..workers {
            set.spawn(run_worker(
                id,
                Arc::clone(&queue),
                outcome_tx.clone(),
                Arc::clone(&self.prober),
            ));
        }
        debug!(workers, "worker pool started");

        let done = tokio::spawn(async move {
            let mut per_worker = vec![0u64; workers];
            let mut failure = None;
            while let Some(res) = set.join_next().await {
                match res {
                    Ok((id, n)) => per_worker[id] = n,
                    Err(e) => {
                        failure.get_or_insert(e);
                    }
                }
            }
            dispatcher.await?;
            drop(outcome_tx);
            if let Some(e) = failure {
                return Err(ScanError::Worker(e));
            }
            let probed: u64 = per_worker.iter().sum();
            debug!(workers, probed, "worker pool finished");
            Ok(PoolDone {
                effective_workers: workers,
                probed,
                per_worker,
            })
        });

        PoolHandle {
            outcomes: outcome_rx,
            done,
        }
    }
}

async fn run_worker(
    id: usize,
    queue: TaskQueue,
    outcomes: mpsc::Sender<ProbeOutcome>,
    prober: Arc<dyn Probe>,
) -> (usize, u64) {
    let mut probed = 0u64;
    loop {
        let next = queue.lock().await.recv().await;
        let Some(task) = next else {
            break;
        };
        let open = prober.probe(&task).await;
        probed += 1;
        if outcomes
            .send(ProbeOutcome {
                port: task.port,
                open,
            })
            .await
            .is_err()
        {
            break;
        }
    }
    trace!(worker = id, probed, "worker exiting");
    (id, probed)
}

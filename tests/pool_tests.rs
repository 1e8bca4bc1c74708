mod common;

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::RecordingProbe;
use connscan::pool::WorkerPool;
use connscan::types::{ProbeOutcome, Task};

fn tasks(n: usize) -> Vec<Task> {
    let host: Arc<str> = Arc::from("10.0.0.1");
    (1..=n as u16).map(|p| Task::new(Arc::clone(&host), p)).collect()
}

async fn run(workers: usize, n: usize) -> (Vec<ProbeOutcome>, u64, Arc<RecordingProbe>) {
    let probe = RecordingProbe::with_open([1, 500]);
    let pool = WorkerPool::new(NonZeroUsize::new(workers).unwrap(), probe.clone());
    let mut handle = pool.spawn(tasks(n));
    let mut outcomes = Vec::new();
    while let Some(o) = handle.outcomes.recv().await {
        outcomes.push(o);
    }
    let done = handle.done.await.expect("barrier task").expect("pool ok");
    (outcomes, done.probed, probe)
}

#[tokio::test]
async fn every_task_claimed_exactly_once() {
    for workers in [1, 100] {
        for n in [0, 1, 1000] {
            let (outcomes, probed, probe) = run(workers, n).await;
            assert_eq!(outcomes.len(), n, "w={workers} t={n}");
            assert_eq!(probed, n as u64);
            assert_eq!(probe.calls(), n as u64);
            assert_eq!(probe.distinct(), n);
            if n > 0 {
                assert_eq!(probe.max_repeats(), 1);
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn multi_threaded_runtime_loses_nothing() {
    let (outcomes, probed, probe) = run(64, 1000).await;
    assert_eq!(outcomes.len(), 1000);
    assert_eq!(probed, 1000);
    assert_eq!(probe.max_repeats(), 1);
    let open: Vec<u16> = outcomes.iter().filter(|o| o.open).map(|o| o.port).collect();
    assert_eq!(open.len(), 2);
}

#[tokio::test]
async fn stalled_task_does_not_hold_back_the_queue() {
    let stall = Duration::from_millis(200);
    let probe = RecordingProbe::with_delay(1, stall);
    let pool = WorkerPool::new(NonZeroUsize::new(2).unwrap(), probe.clone());
    let started = Instant::now();
    let mut handle = pool.spawn(tasks(20));
    let mut count = 0;
    while handle.outcomes.recv().await.is_some() {
        count += 1;
    }
    let done = handle.done.await.unwrap().unwrap();
    let elapsed = started.elapsed();

    assert_eq!(count, 20);
    assert_eq!(done.effective_workers, 2);
    // One worker sits on the stalled port while the other claims everything else.
    let mut per_worker = done.per_worker.clone();
    per_worker.sort_unstable();
    assert_eq!(per_worker, vec![1, 19]);
    assert!(elapsed >= stall);
    assert!(elapsed < stall * 2, "took {elapsed:?}");
}

#[tokio::test]
async fn per_worker_counts_add_up() {
    let (_, probed, _) = run(7, 500).await;
    assert_eq!(probed, 500);
    let probe = RecordingProbe::jittered(Vec::<u16>::new());
    let pool = WorkerPool::new(NonZeroUsize::new(8).unwrap(), probe);
    let mut handle = pool.spawn(tasks(40));
    while handle.outcomes.recv().await.is_some() {}
    let done = handle.done.await.unwrap().unwrap();
    assert_eq!(done.per_worker.len(), 8);
    assert_eq!(done.per_worker.iter().sum::<u64>(), 40);
    assert_eq!(done.probed, 40);
}

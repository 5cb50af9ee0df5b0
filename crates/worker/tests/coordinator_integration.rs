//! Integration tests for instance coordination over a shared control
//! channel: startup processing, process signals, and takeover handoff.

mod common;

use common::*;
use domain::services::{ControlBus, ControlSignal, MemoryControlBus};
use export_worker::coordinator::InstanceCoordinator;
use export_worker::error::WorkerError;
use export_worker::notifier::JobStatusNotifier;
use export_worker::pipeline::ExportPipeline;
use export_worker::poller::JobPoller;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::sleep;

struct Cluster {
    jobs: Arc<MemoryJobStore>,
    content: Arc<FakeContentStore>,
    uploads: Arc<FakeUploadStore>,
    objects: Arc<MemoryObjectStore>,
    bus: Arc<MemoryControlBus>,
    staging: Vec<TempDir>,
}

impl Cluster {
    fn new() -> Self {
        Self {
            jobs: Arc::new(MemoryJobStore::new()),
            content: Arc::new(FakeContentStore::new()),
            uploads: Arc::new(FakeUploadStore::new()),
            objects: Arc::new(MemoryObjectStore::new()),
            bus: Arc::new(MemoryControlBus::new()),
            staging: Vec::new(),
        }
    }

    /// Spawn one worker instance against the shared stores and bus.
    fn spawn_instance(&mut self) -> JoinHandle<Result<(), WorkerError>> {
        let staging = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            self.content.clone(),
            self.uploads.clone(),
            self.objects.clone(),
            staging.path().to_path_buf(),
        );
        self.staging.push(staging);

        let notifier = JobStatusNotifier::new(self.jobs.clone(), self.bus.clone());
        let poller = JobPoller::new(self.jobs.clone(), pipeline, notifier);
        let coordinator = InstanceCoordinator::new(self.bus.clone(), poller);

        tokio::spawn(async move { coordinator.run().await })
    }

    /// Wait until the completed-job count reaches `count`.
    async fn wait_for_completed(&self, count: usize) {
        for _ in 0..200 {
            if self.jobs.completed_count() >= count {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "timed out waiting for {count} completed jobs, have {}",
            self.jobs.completed_count()
        );
    }

    /// Publish takeover signals until `handle` exits, then return its result.
    async fn shut_down(
        &self,
        handle: JoinHandle<Result<(), WorkerError>>,
    ) -> Result<(), WorkerError> {
        for _ in 0..200 {
            if handle.is_finished() {
                return handle.await.unwrap();
            }
            self.bus.publish(ControlSignal::Takeover).await.unwrap();
            sleep(Duration::from_millis(10)).await;
        }
        panic!("instance did not shut down on takeover");
    }
}

#[tokio::test]
async fn test_startup_drains_pending_queue() {
    let mut cluster = Cluster::new();
    cluster.jobs.insert_pending("exp1", "alice");
    cluster.content.add_user(sample_user("alice"));

    let handle = cluster.spawn_instance();
    cluster.wait_for_completed(1).await;

    assert!(cluster.objects.object("exp1").is_some());

    let result = cluster.shut_down(handle).await;
    assert!(matches!(result, Err(WorkerError::Superseded)));
}

#[tokio::test]
async fn test_process_signal_triggers_poll() {
    let mut cluster = Cluster::new();
    cluster.content.add_user(sample_user("alice"));

    let handle = cluster.spawn_instance();
    // The startup pass sees an empty queue; give it a moment to settle
    sleep(Duration::from_millis(50)).await;
    assert_eq!(cluster.jobs.completed_count(), 0);

    cluster.jobs.insert_pending("exp1", "alice");
    cluster.bus.publish(ControlSignal::Process).await.unwrap();
    cluster.wait_for_completed(1).await;

    cluster.shut_down(handle).await.unwrap_err();
}

#[tokio::test]
async fn test_new_instance_supersedes_old_one() {
    let mut cluster = Cluster::new();
    cluster.jobs.insert_pending("exp1", "alice");
    cluster.content.add_user(sample_user("alice"));

    let first = cluster.spawn_instance();
    cluster.wait_for_completed(1).await;

    let second = cluster.spawn_instance();

    // The newcomer's announcement takes the first instance down
    let result = tokio::time::timeout(Duration::from_secs(2), first)
        .await
        .expect("first instance did not exit on takeover")
        .unwrap();
    assert!(matches!(result, Err(WorkerError::Superseded)));

    // The job was already terminal; the second instance must not rerun it
    assert_eq!(cluster.jobs.completed_count(), 1);

    let result = cluster.shut_down(second).await;
    assert!(matches!(result, Err(WorkerError::Superseded)));
}

#[tokio::test]
async fn test_fatal_poll_error_stops_the_instance() {
    let mut cluster = Cluster::new();
    cluster.jobs.fail_find_pending(true);

    let handle = cluster.spawn_instance();

    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("instance did not exit on fetch failure")
        .unwrap();
    assert!(matches!(result, Err(WorkerError::FetchPending(_))));
}

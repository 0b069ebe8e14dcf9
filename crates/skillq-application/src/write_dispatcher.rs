//! Dispatch of create/delete calls under the configured `WritePolicy`.
//!
//! Under `FireAndForget` each write runs as a detached task whose outcome is
//! only logged; the caller continues as soon as the task is spawned. Under
//! `Confirmed` the caller awaits the write and receives its error.
//!
//! Detached writes are never aborted: dropping the dispatcher, a
//! `WriteCompletion`, or a pending `settle()` leaves them running.

use skillq_core::Result;
use skillq_core::config::WritePolicy;
use skillq_core::programmer::{CreateProgrammerRequest, DirectoryClient, ProgrammerId};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::task::TaskTracker;

/// Resolves once a dispatched write has finished, whatever its outcome.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct WriteCompletion {
    done: Option<oneshot::Receiver<()>>,
}

impl WriteCompletion {
    fn finished() -> Self {
        Self { done: None }
    }

    pub async fn wait(self) {
        if let Some(done) = self.done {
            // A closed channel also means the task is over
            let _ = done.await;
        }
    }
}

#[derive(Clone)]
pub struct WriteDispatcher {
    client: Arc<dyn DirectoryClient>,
    policy: WritePolicy,
    /// Detached writes; tracking does not own their abort handles.
    tracker: TaskTracker,
}

impl WriteDispatcher {
    pub fn new(client: Arc<dyn DirectoryClient>, policy: WritePolicy) -> Self {
        Self {
            client,
            policy,
            tracker: TaskTracker::new(),
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Submits a create call. Always `Ok` under `FireAndForget`.
    pub async fn create(&self, request: CreateProgrammerRequest) -> Result<WriteCompletion> {
        let client = self.client.clone();
        self.dispatch("create", async move { client.create(&request).await })
            .await
    }

    /// Submits a delete call. Always `Ok` under `FireAndForget`.
    pub async fn delete(&self, id: ProgrammerId) -> Result<WriteCompletion> {
        let client = self.client.clone();
        self.dispatch("delete", async move { client.delete(&id).await })
            .await
    }

    async fn dispatch<F>(&self, operation: &'static str, write: F) -> Result<WriteCompletion>
    where
        F: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        match self.policy {
            WritePolicy::Confirmed => {
                if let Err(e) = write.await {
                    tracing::error!(operation, error = %e, "Write failed");
                    return Err(e);
                }
                Ok(WriteCompletion::finished())
            }
            WritePolicy::FireAndForget => {
                let (done_tx, done_rx) = oneshot::channel();
                // The JoinHandle is dropped; that detaches the task, it does not abort it.
                self.tracker.spawn(async move {
                    if let Err(e) = write.await {
                        tracing::error!(operation, error = %e, "Detached write failed");
                    }
                    let _ = done_tx.send(());
                });
                tracing::debug!(operation, in_flight = self.tracker.len(), "Write dispatched");
                Ok(WriteCompletion {
                    done: Some(done_rx),
                })
            }
        }
    }

    /// Number of detached writes still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Waits for every detached write dispatched so far, including ones
    /// dispatched while waiting. Nothing is cancelled, and dropping the
    /// returned future only stops the waiting.
    pub async fn settle(&self) {
        // Closing only lets `wait` resolve once empty; spawning still works.
        self.tracker.close();
        self.tracker.wait().await;
    }
}

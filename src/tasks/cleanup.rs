//! TTL Cleanup Task
//!
//! Periodic sweep of expired entries, owned by whoever starts it.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::caches::AppCaches;

// == Sweep ==
/// Something whose expired entries can be swept.
pub trait Sweep: Send + Sync + 'static {
    /// Removes expired entries, returning how many were dropped.
    fn sweep(&self) -> impl Future<Output = usize> + Send;
}

impl<V: Send + Sync + 'static> Sweep for SharedCache<V> {
    fn sweep(&self) -> impl Future<Output = usize> + Send {
        async move { self.write().await.cleanup() }
    }
}

impl Sweep for AppCaches {
    fn sweep(&self) -> impl Future<Output = usize> + Send {
        self.cleanup_all()
    }
}

// == Cleanup Task ==
/// A running background sweep.
///
/// Stop it with [`stop`](CleanupTask::stop); dropping it aborts the task.
#[derive(Debug)]
pub struct CleanupTask {
    handle: Option<JoinHandle<()>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl CleanupTask {
    /// Spawns a task sweeping `target` every `interval`.
    ///
    /// The first sweep runs one full interval after start. Must be called
    /// inside a tokio runtime; `interval` must be non-zero.
    pub fn start<T: Sweep>(target: T, interval: Duration) -> Self {
        let (shutdown, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            info!("Starting TTL cleanup task with interval of {:?}", interval);

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        debug!("TTL cleanup task received stop signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = target.sweep().await;
                        if removed > 0 {
                            info!("TTL cleanup: removed {} expired entries", removed);
                        } else {
                            debug!("TTL cleanup: no expired entries found");
                        }
                    }
                }
            }
        });

        Self {
            handle: Some(handle),
            shutdown: Some(shutdown),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Signals the task and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("TTL cleanup task ended abnormally: {}", err);
            }
        }
        info!("TTL cleanup task stopped");
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

//! Trailing-edge debounce: a newer schedule supersedes the pending one.
//!
//! Only a task still waiting out its delay is ever cancelled. Once a task has
//! started it runs to completion, and started tasks run one at a time, so a
//! task is never torn down halfway through its side effects.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const WAITING: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLED: u8 = 2;

struct Pending {
    handle: JoinHandle<()>,
    state: Arc<AtomicU8>,
}

impl Pending {
    fn cancel(&self) {
        if self
            .state
            .compare_exchange(WAITING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.handle.abort();
        }
    }
}

pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
    /// Held by a task for as long as it runs.
    running: Arc<Mutex<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Runs `task` once `delay` has passed without another call to `schedule`.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let state = Arc::new(AtomicU8::new(WAITING));
        let flag = state.clone();
        let running = self.running.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _guard = running.lock().await;
            if flag
                .compare_exchange(WAITING, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return;
            }
            task.await;
        });
        self.pending = Some(Pending { handle, state });
    }

    /// Drops a task that has not started yet. A started task keeps running.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Cancels whatever is still waiting and returns once no task is running.
    pub async fn settle(&mut self) {
        self.cancel();
        let _guard = self.running.lock().await;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Tokio-backed scheduler.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use tokio::runtime::Handle;
use enrol_core::{
    application::{
        ApplicationError,
        ports::{ScheduledTask, Scheduler, Task},
    },
    error::EnrolResult,
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs deferred tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context.
    pub fn current() -> EnrolResult<Self> {
        Handle::try_current().map(Self::new).map_err(|e| {
            ApplicationError::SchedulerUnavailable {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> EnrolResult<Box<dyn ScheduledTask>> {
        let token = CancellationToken::new();
        let finished = Arc::new(AtomicBool::new(false));

        let cancelled = token.clone();
        let done = Arc::clone(&finished);
        self.handle.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    trace!("scheduled task cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    task();
                }
            }
            done.store(true, Ordering::SeqCst);
        });

        Ok(Box::new(TokioTask { token, finished }))
    }
}

struct TokioTask {
    token: CancellationToken,
    finished: Arc<AtomicBool>,
}

impl ScheduledTask for TokioTask {
    fn cancel(&self) {
        self.token.cancel();
    }

    fn is_finished(&self) -> bool {
        self.token.is_cancelled() || self.finished.load(Ordering::SeqCst)
    }
}

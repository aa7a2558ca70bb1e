//! Virtual-time scheduler for testing.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use enrol_core::{
    application::{
        ApplicationError,
        ports::{ScheduledTask, Scheduler, Task},
    },
    error::EnrolResult,
};

#[derive(Debug, Default)]
struct TaskState {
    cancelled: AtomicBool,
    ran: AtomicBool,
}

struct Entry {
    due: Duration,
    seq: u64,
    task: Task,
    state: Arc<TaskState>,
}

#[derive(Default)]
struct ManualInner {
    elapsed: Duration,
    next_seq: u64,
    queue: Vec<Entry>,
}

/// Scheduler whose clock only moves when [`advance`](Self::advance) is
/// called. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward and run every task now due, earliest
    /// first. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let Ok(mut inner) = self.inner.lock() else {
                return 0;
            };
            inner.elapsed += by;
            let now = inner.elapsed;
            let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut inner.queue)
                .into_iter()
                .partition(|e| e.due <= now);
            inner.queue = rest;
            due.sort_by_key(|e| (e.due, e.seq));
            due
        };

        // Run outside the lock: a task may schedule another.
        let mut ran = 0;
        for entry in due {
            if entry.state.cancelled.load(Ordering::SeqCst) {
                continue;
            }
            (entry.task)();
            entry.state.ran.store(true, Ordering::SeqCst);
            ran += 1;
        }
        ran
    }

    /// Tasks still waiting and not cancelled.
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .queue
                    .iter()
                    .filter(|e| !e.state.cancelled.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Virtual time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.inner.lock().map(|i| i.elapsed).unwrap_or_default()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> EnrolResult<Box<dyn ScheduledTask>> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockError {
                name: "manual scheduler",
            })?;

        let state = Arc::new(TaskState::default());
        let entry = Entry {
            due: inner.elapsed + delay,
            seq: inner.next_seq,
            task,
            state: Arc::clone(&state),
        };
        inner.next_seq += 1;
        inner.queue.push(entry);

        Ok(Box::new(ManualTask { state }))
    }
}

struct ManualTask {
    state: Arc<TaskState>,
}

impl ScheduledTask for ManualTask {
    fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst) || self.state.ran.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting(hits: &Arc<AtomicUsize>) -> Task {
        let hits = Arc::clone(hits);
        Box::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn runs_only_when_due() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task = scheduler
            .schedule(Duration::from_secs(5), counting(&hits))
            .unwrap();

        assert_eq!(scheduler.advance(Duration::from_millis(4_999)), 0);
        assert!(!task.is_finished());
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_tasks_are_skipped() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task = scheduler
            .schedule(Duration::from_secs(1), counting(&hits))
            .unwrap();
        task.cancel();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(2)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn runs_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (delay, tag) in [(3, "c"), (1, "a"), (2, "b")] {
            let order = Arc::clone(&order);
            scheduler
                .schedule(
                    Duration::from_secs(delay),
                    Box::new(move || order.lock().unwrap().push(tag)),
                )
                .unwrap();
        }
        scheduler.advance(Duration::from_secs(3));
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.elapsed(), Duration::from_secs(3));
    }
}

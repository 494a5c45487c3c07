//! Deferred reply scheduling
//!
//! The bot reply is appended after a short artificial delay. The delay is
//! behind [`ReplyScheduler`] so tests can fire replies synchronously.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::trace;

/// A deferred unit of work
pub type ReplyTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay
///
/// Scheduled tasks are never cancelled and cannot fail.
pub trait ReplyScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ReplyTask);
}

/// Schedules tasks on the current tokio runtime
///
/// Outside a runtime context the task sleeps on a dedicated thread instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl ReplyScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ReplyTask) {
        trace!(delay_ms = delay.as_millis() as u64, "Scheduling deferred reply");
        // Detached: the join handle is dropped, the task still runs to completion.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    task();
                });
            }
            Err(_) => {
                trace!("No tokio runtime, deferring reply on a thread");
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    task();
                });
            }
        }
    }
}

/// Holds scheduled tasks until the caller fires them
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, ReplyTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Delays of the waiting tasks, in scheduling order
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.queue.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Fire every waiting task in FIFO order, returning how many ran
    ///
    /// Tasks scheduled while this runs are fired too.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the lock before running so a task may schedule more work.
            let next = self.queue.lock().pop_front();
            match next {
                Some((_, task)) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl ReplyScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ReplyTask) {
        self.queue.lock().push_back((delay, task));
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

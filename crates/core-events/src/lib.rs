//! Editor events and the deferred task queue.
//!
//! Scheduling model: single-threaded and cooperative. An editor event never
//! renders synchronously; the handler posts a task and the host drains the
//! queue one tick later, once buffer/window state has settled. Tasks carry the
//! ids they were posted for and re-validate them when they run.
//!
//! Queue contract:
//! - `post` never coalesces or reorders: each event yields its own task.
//! - `take_ready` hands out everything queued *before* the call. Tasks posted
//!   while those run wait for the next tick.
//! - Nothing is cancelled. A superseded task still runs and simply recomputes
//!   state from the current source of truth.

use core_model::{BufferId, WindowId};
use std::collections::VecDeque;

/// Host notifications the surface controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A window now shows `buffer` (buffer switch or new window).
    BufferEntered { window: WindowId, buffer: BufferId },
    WindowResized { window: WindowId },
    /// Unsaved-changes flag of `buffer` flipped; affects every window showing it.
    ModifiedChanged { buffer: BufferId },
    /// The context provider has fresh nodes for `window` (cursor moved, reparse).
    ContextUpdated { window: WindowId },
    WindowClosed { window: WindowId },
}

/// Deferred render of one surface, bound to the buffer it was posted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTask {
    pub window: WindowId,
    pub buffer: BufferId,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    pub posted: u64,
    pub ticks: u64,
    pub skipped: u64,
}

#[derive(Debug)]
pub struct TaskQueue<T> {
    pending: VecDeque<T>,
    metrics: QueueMetricsSnapshot,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> TaskQueue<T> {
    pub fn post(&mut self, task: T) {
        tracing::trace!(target: "events.queue", ?task, "task_posted");
        self.metrics.posted += 1;
        self.pending.push_back(task);
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            metrics: QueueMetricsSnapshot::default(),
        }
    }

    /// Remove and return every task queued so far, oldest first.
    pub fn take_ready(&mut self) -> Vec<T> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        self.metrics.ticks += 1;
        self.pending.drain(..).collect()
    }

    /// Record that a task failed re-validation and was dropped.
    pub fn record_skipped(&mut self) {
        self.metrics.skipped += 1;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(w: u32, b: u32) -> RenderTask {
        RenderTask {
            window: WindowId(w),
            buffer: BufferId(b),
        }
    }

    #[test]
    fn tasks_are_neither_coalesced_nor_reordered() {
        let mut q = TaskQueue::new();
        q.post(task(1, 1));
        q.post(task(1, 1));
        q.post(task(2, 5));
        assert_eq!(q.len(), 3);
        assert_eq!(q.take_ready(), vec![task(1, 1), task(1, 1), task(2, 5)]);
        assert!(q.is_empty());
        let m = q.metrics_snapshot();
        assert_eq!(m.posted, 3);
        assert_eq!(m.ticks, 1);
    }

    #[test]
    fn empty_take_does_not_count_a_tick() {
        let mut q: TaskQueue<RenderTask> = TaskQueue::new();
        assert!(q.take_ready().is_empty());
        assert_eq!(q.metrics_snapshot().ticks, 0);
    }

    #[test]
    fn tasks_posted_after_take_wait_for_next_tick() {
        let mut q = TaskQueue::new();
        q.post(task(1, 1));
        let ready = q.take_ready();
        q.post(task(3, 3));
        q.record_skipped();
        assert_eq!(ready, vec![task(1, 1)]);
        assert_eq!(q.take_ready(), vec![task(3, 3)]);
        assert_eq!(q.metrics_snapshot().skipped, 1);
    }
}

//! Deferred actions on a virtual clock
//!
//! Scripted steps (the rollout after `kubectl edit`) are queued as data and
//! fired when the session clock passes their due time. The terminal front-end
//! advances the clock by real elapsed time; tests advance it by hand.

use std::time::Duration;
use tracing::debug;

/// Delay between the edit and the deployment picking up the new config
pub const ROLLOUT_START_DELAY: Duration = Duration::from_millis(2000);

/// Delay between the rollout starting and reporting success
pub const ROLLOUT_FINISH_DELAY: Duration = Duration::from_millis(1000);

/// A scripted step waiting to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Apply the fix and start rolling out new pods
    StartRollout { deployment: String },
    /// Report that the rollout finished
    FinishRollout { deployment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due: Duration,
    pub action: DeferredAction,
    seq: u64,
}

/// Single-owner queue of deferred actions
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    queue: Vec<ScheduledTask>,
    next_seq: u64,
    cancelled: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `action` to run `delay` after the current virtual time.
    ///
    /// Returns false once the scheduler has been cancelled.
    pub fn schedule(&mut self, delay: Duration, action: DeferredAction) -> bool {
        if self.cancelled {
            debug!(?action, "scheduler cancelled, dropping action");
            return false;
        }

        let task = ScheduledTask {
            due: self.now + delay,
            action,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        debug!(due_ms = task.due.as_millis() as u64, action = ?task.action, "scheduled");
        self.queue.push(task);
        true
    }

    /// Remove the earliest task due at or before `until` and move the clock
    /// to its due time. Ties run in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let task = self.queue.remove(index);
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock forward to `until` once every due task has run
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    pub fn is_pending(&self, action: &DeferredAction) -> bool {
        self.queue.iter().any(|t| &t.action == action)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop every queued task and refuse new ones. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        self.cancelled = true;
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

//! Scheduled-task table for the conversation session
//!
//! The original demo fired bare timeouts and forgot about them. Here the
//! pending timers are an explicit table: every scheduled delay is recorded
//! with its due time and payload, can be cancelled by id, and is delivered
//! by an explicit `fire_due` call. That makes the "two concurrent in-flight
//! responses" behavior a documented property instead of an implicit race,
//! and lets tests drive time with synthetic instants.

use std::time::Instant;

/// Identifier of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Payload delivered when a scheduled task fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Deliver the simulated assistant response for a submission
    ///
    /// Both fields are captured at submission time: a preset change after
    /// submit does not retarget the pending response, and the prompt is the
    /// submitted text, not whatever the input buffer holds later.
    DeliverResponse {
        /// Preset id active when the prompt was submitted
        preset_id: String,
        /// The submitted prompt text
        prompt: String,
    },

    /// Reset the saved/copied affordance flag for a message
    ClearSaved {
        /// Message whose flag auto-clears
        message_id: String,
    },
}

#[derive(Debug)]
struct ScheduledTask {
    id: TaskId,
    due_at: Instant,
    action: TaskAction,
}

/// Table of pending scheduled tasks
///
/// Tasks fire in due-time order; ties fire in scheduling order. Nothing in
/// the table is coalesced — scheduling twice yields two deliveries.
#[derive(Debug, Default)]
pub struct TimerQueue {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl TimerQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules an action to fire at `due_at`
    ///
    /// # Returns
    ///
    /// The id of the scheduled task, usable with [`TimerQueue::cancel`]
    pub fn schedule(&mut self, due_at: Instant, action: TaskAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { id, due_at, action });
        id
    }

    /// Cancels a pending task
    ///
    /// # Returns
    ///
    /// True when the task was still pending and has been removed
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Removes and returns all actions due at or before `now`
    ///
    /// Returned in firing order: due time ascending, scheduling order for
    /// equal due times.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TaskAction> {
        let mut due: Vec<ScheduledTask> = Vec::new();
        let mut remaining: Vec<ScheduledTask> = Vec::new();
        for task in self.tasks.drain(..) {
            if task.due_at <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|task| task.action).collect()
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

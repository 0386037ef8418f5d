//! Cancellable deferred tasks driven by the host's frame clock.
//!
//! Components never spawn timers of their own. They describe deferred work as
//! plain data, park it in a [`FrameScheduler`], and the host calls back with
//! the current [`Instant`] on every frame. Whatever is due is handed back to
//! the component, which decides how to apply it. Dropping or clearing the
//! scheduler cancels everything, so a torn-down component can never be
//! mutated by a stale callback.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use revolve_ui::FrameScheduler;
//!
//! let start = Instant::now();
//! let mut scheduler = FrameScheduler::new();
//! let id = scheduler.schedule_after(start, Duration::from_millis(16), "restore");
//! assert!(scheduler.take_due(start).is_empty());
//!
//! let due = scheduler.take_due(start + Duration::from_millis(16));
//! assert_eq!(due, vec![(id, "restore")]);
//! ```

use std::time::{Duration, Instant};

use slotmap::SlotMap;
use tracing::{trace, warn};

slotmap::new_key_type! {
    /// Handle to a task parked in a [`FrameScheduler`].
    pub struct TaskId;
}

#[derive(Debug)]
struct ScheduledTask<A> {
    due: Instant,
    seq: u64,
    action: A,
}

/// A single-threaded queue of deferred actions ordered by due time.
#[derive(Debug)]
pub struct FrameScheduler<A> {
    tasks: SlotMap<TaskId, ScheduledTask<A>>,
    next_seq: u64,
}

impl<A> Default for FrameScheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> FrameScheduler<A> {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Parks `action` until `due`.
    pub fn schedule_at(&mut self, due: Instant, action: A) -> TaskId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.tasks.insert(ScheduledTask { due, seq, action })
    }

    /// Parks `action` until `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, action: A) -> TaskId {
        let due = match now.checked_add(delay) {
            Some(due) => due,
            None => {
                warn!("Task delay {delay:?} overflows the clock; scheduling it for now");
                now
            }
        };
        self.schedule_at(due, action)
    }

    /// Cancels a pending task, returning its action if it had not run yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<A> {
        self.tasks.remove(id).map(|task| task.action)
    }

    /// Cancels every pending task and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Returns `true` if `id` is still waiting to run.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The earliest due time among pending tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.values().map(|task| task.due).min()
    }

    /// Removes and returns every task due at or before `now`, earliest
    /// first. Tasks sharing a due time come back in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TaskId, A)> {
        let mut due: Vec<(Instant, u64, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= now)
            .map(|(id, task)| (task.due, task.seq, id))
            .collect();
        due.sort_unstable_by_key(|&(at, seq, _)| (at, seq));
        if !due.is_empty() {
            trace!("{} of {} scheduled tasks due", due.len(), self.tasks.len());
        }

        due.into_iter()
            .filter_map(|(_, _, id)| self.tasks.remove(id).map(|task| (id, task.action)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_tasks_come_back_in_order() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let late = scheduler.schedule_after(t0, Duration::from_millis(500), "late");
        let early = scheduler.schedule_after(t0, Duration::from_millis(16), "early");
        let tie = scheduler.schedule_after(t0, Duration::from_millis(16), "tie");

        assert_eq!(scheduler.len(), 3);
        assert_eq!(
            scheduler.next_deadline(),
            Some(t0 + Duration::from_millis(16))
        );

        let due = scheduler.take_due(t0 + Duration::from_millis(100));
        assert_eq!(due, vec![(early, "early"), (tie, "tie")]);
        assert!(scheduler.is_pending(late));
        assert!(!scheduler.is_pending(early));

        let due = scheduler.take_due(t0 + Duration::from_secs(1));
        assert_eq!(due, vec![(late, "late")]);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.schedule_after(t0, Duration::from_millis(10), 7);
        assert_eq!(scheduler.cancel(id), Some(7));
        assert_eq!(scheduler.cancel(id), None);
        assert!(scheduler.take_due(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule_at(t0, 'a');
        scheduler.schedule_at(t0, 'b');
        assert_eq!(scheduler.clear(), 2);
        assert!(scheduler.take_due(t0).is_empty());
    }
}

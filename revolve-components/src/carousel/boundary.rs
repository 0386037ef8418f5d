//! Keeps the committed index inside the middle copy.
//!
//! An animated commit may land in the first or third copy. Once its
//! transition has settled the index is silently moved by a multiple of `N`
//! back into `[N, 2N)`, which shows the same item at the same place on
//! screen.

use std::time::{Duration, Instant};

use revolve_ui::{FrameScheduler, TaskId};
use tracing::debug;

use super::{CarouselTask, dataset::COPIES};

/// The middle-copy slot showing the same item as `index`.
///
/// `n` must be non-zero.
pub fn rest_index(index: usize, n: usize) -> usize {
    n + index % n
}

/// Returns `true` when `index` lies outside the middle copy.
pub fn needs_remap(index: usize, n: usize) -> bool {
    index < n || index >= 2 * n
}

/// Returns `true` when `index` is a valid slot of a working sequence over
/// `n` items.
pub fn in_sequence(index: usize, n: usize) -> bool {
    index < COPIES * n
}

/// Schedules at most one silent re-map at a time.
#[derive(Debug, Default)]
pub struct BoundaryWatcher {
    pending: Option<(TaskId, usize)>,
}

impl BoundaryWatcher {
    /// Creates a watcher with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of the pending re-map.
    pub fn pending_target(&self) -> Option<usize> {
        self.pending.map(|(_, target)| target)
    }

    /// Returns `true` while a re-map is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Looks at a freshly committed index.
    ///
    /// Any earlier pending re-map is replaced. If `index` is outside the
    /// middle copy an animated commit gets a re-map scheduled `delay` after
    /// `now`; a non-animated commit gets its target back to apply
    /// immediately.
    pub(crate) fn observe(
        &mut self,
        index: usize,
        n: usize,
        animate: bool,
        scheduler: &mut FrameScheduler<CarouselTask>,
        now: Instant,
        delay: Duration,
    ) -> Option<usize> {
        self.cancel(scheduler);
        if n == 0 || !needs_remap(index, n) {
            return None;
        }

        let target = rest_index(index, n);
        if !animate {
            debug!("Carousel index {index} re-mapped to {target} immediately");
            return Some(target);
        }

        let task = scheduler.schedule_after(now, delay, CarouselTask::Remap { target });
        self.pending = Some((task, target));
        debug!("Carousel index {index} will re-map to {target} in {delay:?}");
        None
    }

    /// Cancels the pending re-map. Returns whether one was pending.
    pub(crate) fn cancel(&mut self, scheduler: &mut FrameScheduler<CarouselTask>) -> bool {
        match self.pending.take() {
            Some((task, target)) => {
                scheduler.cancel(task);
                debug!("Carousel re-map to {target} cancelled");
                true
            }
            None => false,
        }
    }

    /// Claims a due re-map task. Returns its target when `task` is the one
    /// this watcher is waiting for.
    pub(crate) fn complete(&mut self, task: TaskId) -> Option<usize> {
        match self.pending {
            Some((pending, target)) if pending == task => {
                self.pending = None;
                Some(target)
            }
            _ => None,
        }
    }

    /// Forgets the pending re-map without touching the scheduler.
    pub(crate) fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn rest_index_preserves_the_item() {
        for index in 0..15 {
            let rest = rest_index(index, 5);
            assert!((5..10).contains(&rest));
            assert_eq!(rest % 5, index % 5);
        }
        assert_eq!(rest_index(10, 5), 5);
        assert_eq!(rest_index(4, 5), 9);
        assert_eq!(rest_index(7, 5), 7);
    }

    #[test]
    fn middle_copy_needs_nothing() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let mut watcher = BoundaryWatcher::new();
        for index in 5..10 {
            assert_eq!(watcher.observe(index, 5, true, &mut scheduler, t0, DELAY), None);
        }
        assert!(scheduler.is_empty());
        assert!(!watcher.is_pending());
    }

    #[test]
    fn animated_drift_schedules_a_remap() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let mut watcher = BoundaryWatcher::new();

        assert_eq!(watcher.observe(10, 5, true, &mut scheduler, t0, DELAY), None);
        assert_eq!(watcher.pending_target(), Some(5));
        assert!(scheduler.take_due(t0).is_empty());

        let due = scheduler.take_due(t0 + DELAY);
        assert_eq!(due.len(), 1);
        let (task, action) = due[0];
        assert_eq!(action, CarouselTask::Remap { target: 5 });
        assert_eq!(watcher.complete(task), Some(5));
        assert!(!watcher.is_pending());
        assert_eq!(watcher.complete(task), None);
    }

    #[test]
    fn silent_drift_remaps_immediately() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let mut watcher = BoundaryWatcher::new();
        assert_eq!(watcher.observe(4, 5, false, &mut scheduler, t0, DELAY), Some(9));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn newer_commit_replaces_pending_remap() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let mut watcher = BoundaryWatcher::new();

        watcher.observe(10, 5, true, &mut scheduler, t0, DELAY);
        watcher.observe(11, 5, true, &mut scheduler, t0, DELAY);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(watcher.pending_target(), Some(6));

        watcher.observe(9, 5, true, &mut scheduler, t0, DELAY);
        assert!(scheduler.is_empty());
        assert!(!watcher.is_pending());
    }

    #[test]
    fn cancel_reports_whether_anything_was_pending() {
        let t0 = Instant::now();
        let mut scheduler = FrameScheduler::new();
        let mut watcher = BoundaryWatcher::new();
        assert!(!watcher.cancel(&mut scheduler));
        watcher.observe(2, 5, true, &mut scheduler, t0, DELAY);
        assert!(watcher.cancel(&mut scheduler));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn sequence_bounds() {
        assert!(in_sequence(14, 5));
        assert!(!in_sequence(15, 5));
        assert!(!in_sequence(0, 0));
    }
}

//! Logical index to pixel offset, and the only place transforms are written.

use std::time::{Duration, Instant};

use revolve_ui::{FrameScheduler, Px, Surface, TaskId, Transform};
use tracing::{debug, warn};

use super::CarouselTask;

/// Owns the committed logical index and the measured stride.
///
/// Transitions are disabled by every non-animated commit and restored by a
/// [`CarouselTask::RestoreTransitions`] task one frame later. An animated
/// commit that lands inside that frame updates the index right away but
/// holds its transform write until the restore runs, so the host always sees
/// the jump and the eased move in separate frames.
#[derive(Debug)]
pub struct PositionController {
    index: usize,
    stride: Option<Px>,
    transition: Duration,
    restore: Option<TaskId>,
    deferred_write: bool,
    live_offset: Option<Px>,
}

impl PositionController {
    /// Creates a controller at index zero with no stride.
    pub fn new(transition: Duration) -> Self {
        Self {
            index: 0,
            stride: None,
            transition,
            restore: None,
            deferred_write: false,
            live_offset: None,
        }
    }

    /// The committed logical index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The last successfully measured stride.
    pub fn stride(&self) -> Option<Px> {
        self.stride
    }

    /// Returns `true` while transitions are disabled after a jump.
    pub fn is_restore_pending(&self) -> bool {
        self.restore.is_some()
    }

    /// Returns `true` when an animated commit is waiting for transitions to
    /// come back before it is written.
    pub fn has_deferred_write(&self) -> bool {
        self.deferred_write
    }

    /// Offset last written by a drag, until the next commit.
    pub fn live_offset(&self) -> Option<Px> {
        self.live_offset
    }

    /// Pixel offset of `index`: `-index × stride`.
    pub fn offset_for(&self, index: usize) -> Px {
        -self.stride.unwrap_or(Px::ZERO).saturating_mul_index(index)
    }

    /// Pixel offset of the committed index.
    pub fn committed_offset(&self) -> Px {
        self.offset_for(self.index)
    }

    /// Updates the stride. Non-positive values are rejected and the
    /// last-known-good stride stays in effect. Returns whether the stride
    /// changed.
    pub fn set_stride(&mut self, stride: Px) -> bool {
        if !stride.is_positive() {
            warn!("Ignoring non-positive carousel stride {stride}; keeping {:?}", self.stride);
            return false;
        }
        if self.stride == Some(stride) {
            return false;
        }
        debug!("Carousel stride {:?} -> {stride}", self.stride);
        self.stride = Some(stride);
        true
    }

    /// Commits `index` and writes its transform.
    pub(crate) fn commit<S: Surface>(
        &mut self,
        index: usize,
        animate: bool,
        surface: &mut S,
        scheduler: &mut FrameScheduler<CarouselTask>,
        now: Instant,
        frame_delay: Duration,
    ) {
        self.index = index;
        self.live_offset = None;
        let offset = self.committed_offset();

        if !animate {
            surface.apply_transform(Transform::immediate(offset));
            if let Some(previous) = self.restore.take() {
                scheduler.cancel(previous);
            }
            self.restore = Some(scheduler.schedule_after(
                now,
                frame_delay,
                CarouselTask::RestoreTransitions,
            ));
            self.deferred_write = false;
            debug!("Carousel jumped to index {index} ({offset})");
            return;
        }

        if self.restore.is_some() {
            self.deferred_write = true;
            debug!("Carousel move to index {index} waits for transitions");
            return;
        }

        surface.apply_transform(Transform::eased(offset, self.transition));
        debug!("Carousel animating to index {index} ({offset})");
    }

    /// Writes an offset that is not tied to an index, with transitions off.
    pub(crate) fn apply_live_offset<S: Surface>(&mut self, offset: Px, surface: &mut S) {
        self.live_offset = Some(offset);
        surface.apply_transform(Transform::immediate(offset));
    }

    /// Handles a due [`CarouselTask::RestoreTransitions`]. Stale task ids are
    /// ignored.
    pub(crate) fn restore_transitions<S: Surface>(&mut self, task: TaskId, surface: &mut S) {
        if self.restore != Some(task) {
            return;
        }
        self.restore = None;
        if std::mem::take(&mut self.deferred_write) {
            surface.apply_transform(Transform::eased(self.committed_offset(), self.transition));
            debug!("Carousel resumed deferred move to index {}", self.index);
        }
    }

    /// Drops an animated write still waiting for transitions. The pending
    /// restore itself stays scheduled.
    pub(crate) fn drop_deferred_write(&mut self) {
        self.deferred_write = false;
    }

    /// Forgets pending restores and moves the index without writing.
    pub(crate) fn reset(&mut self, index: usize) {
        self.index = index;
        self.restore = None;
        self.deferred_write = false;
        self.live_offset = None;
    }
}

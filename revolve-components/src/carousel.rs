//! Infinite-loop drag carousel.
//!
//! ## Usage
//!
//! Show a small, fixed set of cards that can be dragged, stepped with
//! buttons or keys, and jumped to with pagination dots, without ever
//! reaching an edge.
//!
//! The carousel keeps three copies of the items side by side and a logical
//! index into that tripled sequence. Every move goes through one pipeline:
//! the index is committed, its transform is written to the [`Surface`], and
//! if the index drifted out of the middle copy a silent re-map is scheduled
//! for when the transition has settled.
//!
//! The host feeds input and time:
//!
//! - [`LoopCarousel::handle_pointer`] for pointer events,
//! - [`LoopCarousel::step_forward`], [`LoopCarousel::step_backward`] and
//!   [`LoopCarousel::go_to`] for buttons and dots,
//! - [`LoopCarousel::handle_key`] for arrow/Home/End keys,
//! - [`LoopCarousel::remeasure`] after layout changes,
//! - [`LoopCarousel::tick`] every frame, or at [`LoopCarousel::next_deadline`].
//!
//! ```
//! use std::time::{Duration, Instant};
//! use revolve_components::carousel::{CarouselArgs, LoopCarousel};
//! use revolve_ui::{ItemMetrics, MeasurementError, Px, Surface, Transform};
//!
//! #[derive(Default)]
//! struct Track(Vec<Transform>);
//!
//! impl Surface for Track {
//!     fn apply_transform(&mut self, transform: Transform) {
//!         self.0.push(transform);
//!     }
//!
//!     fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
//!         Ok(ItemMetrics::new(Px(320), Px(16)))
//!     }
//! }
//!
//! let now = Instant::now();
//! let projects = vec!["compiler", "cache", "codec", "cli", "crawler"];
//! let mut carousel = LoopCarousel::mount(projects, Track::default(), CarouselArgs::default(), now);
//! assert_eq!(carousel.logical_index(), 5);
//!
//! carousel.step_backward(now);
//! assert_eq!(carousel.current_indicator_index(), Some(4));
//!
//! // Once the transition settles the index is back in the middle copy.
//! carousel.tick(now + Duration::from_secs(1));
//! assert_eq!(carousel.logical_index(), 9);
//! assert_eq!(carousel.current_indicator_index(), Some(4));
//! ```
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use derive_setters::Setters;
use revolve_ui::{FrameScheduler, ItemMetrics, NavigationKey, PointerEvent, Px, Surface};
use tracing::{debug, trace, warn};

pub use boundary::{BoundaryWatcher, in_sequence, needs_remap, rest_index};
pub use dataset::{COPIES, SlotKey, WorkingSequence};
pub use drag::{
    DEFAULT_DRAG_GAIN, DEFAULT_RELEASE_THRESHOLD, DragController, DragOutcome, DragSession,
    DragState, ReleaseDecision, decide_release,
};
pub use navigation::{IndicatorDot, Navigation, indicator_index, indicators, nearest_copy};
pub use position::PositionController;
pub use window::render_window;

mod boundary;
mod dataset;
mod drag;
mod navigation;
mod position;
mod window;

/// Default length of animated moves.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Default wait between disabling and re-enabling transitions.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(16);

/// Configuration for [`LoopCarousel`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct CarouselArgs {
    /// Multiplier applied to pointer travel while dragging.
    pub drag_gain: f32,
    /// Fraction of the stride a release must travel to change the index.
    pub release_threshold: f32,
    /// Length of animated moves.
    pub transition: Duration,
    /// Wait before a drifted index is re-mapped. `None` uses `transition`.
    pub remap_delay: Option<Duration>,
    /// Wait between a jump and re-enabling transitions.
    pub frame_delay: Duration,
    /// Whether pointer drags move the carousel.
    pub drag_enabled: bool,
    /// Whether arrow/Home/End keys move the carousel.
    pub keyboard_enabled: bool,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            drag_gain: DEFAULT_DRAG_GAIN,
            release_threshold: DEFAULT_RELEASE_THRESHOLD,
            transition: DEFAULT_TRANSITION,
            remap_delay: None,
            frame_delay: DEFAULT_FRAME_DELAY,
            drag_enabled: true,
            keyboard_enabled: true,
        }
    }
}

/// Deferred work parked in the carousel's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselTask {
    /// Silently move the index to `target` in the middle copy.
    Remap {
        /// Middle-copy index to jump to.
        target: usize,
    },
    /// Turn transitions back on after a jump.
    RestoreTransitions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

/// A horizontally looping carousel over `T`, painting through `S`.
#[derive(Debug)]
pub struct LoopCarousel<T, S> {
    sequence: WorkingSequence<T>,
    surface: S,
    args: CarouselArgs,
    position: PositionController,
    drag: DragController,
    boundary: BoundaryWatcher,
    scheduler: FrameScheduler<CarouselTask>,
    mounted: bool,
}

impl<T, S: Surface> LoopCarousel<T, S> {
    /// Mounts a carousel over `items`, measures the stride and places the
    /// index at the start of the middle copy.
    pub fn mount(items: impl Into<Arc<[T]>>, surface: S, args: CarouselArgs, now: Instant) -> Self {
        let mut carousel = Self {
            sequence: WorkingSequence::build(items),
            surface,
            position: PositionController::new(args.transition),
            drag: DragController::new(args.drag_gain, args.release_threshold),
            boundary: BoundaryWatcher::new(),
            scheduler: FrameScheduler::new(),
            args,
            mounted: true,
        };
        carousel.place_at_start(now);
        carousel
    }

    /// Replaces the items. Handing back the list the carousel was built from
    /// does nothing; any other list ends the current drag, cancels pending
    /// work and re-places the index at the start of the middle copy.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>, now: Instant) {
        let items = items.into();
        if self.sequence.is_built_from(&items) {
            return;
        }
        self.reset_transient_state();
        self.position.reset(0);
        self.sequence = WorkingSequence::build(items);
        debug!("Carousel items replaced, {} items", self.sequence.source_len());
        if self.mounted {
            self.place_at_start(now);
        }
    }

    /// Tears the carousel down. Pending work is cancelled and every later
    /// call is a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.reset_transient_state();
        self.mounted = false;
        debug!("Carousel unmounted at index {}", self.position.index());
    }

    /// Returns `true` until [`unmount`](Self::unmount) is called.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The caller's items.
    pub fn items(&self) -> &[T] {
        self.sequence.source()
    }

    /// The tripled working sequence.
    pub fn sequence(&self) -> &WorkingSequence<T> {
        &self.sequence
    }

    /// Effective configuration.
    pub fn args(&self) -> &CarouselArgs {
        &self.args
    }

    /// The committed logical index into the working sequence.
    pub fn logical_index(&self) -> usize {
        self.position.index()
    }

    /// The last successfully measured stride.
    pub fn stride(&self) -> Option<Px> {
        self.position.stride()
    }

    /// Transform offset of the committed index, for hosts that repaint from
    /// scratch (after a resize, for instance).
    pub fn committed_offset(&self) -> Px {
        self.position.committed_offset()
    }

    /// Offset currently on screen: the live drag offset while dragging,
    /// otherwise the committed offset.
    pub fn displayed_offset(&self) -> Px {
        self.position
            .live_offset()
            .unwrap_or_else(|| self.position.committed_offset())
    }

    /// Which source item is focused. `None` when there are no items.
    pub fn current_indicator_index(&self) -> Option<usize> {
        indicator_index(self.position.index(), self.sequence.source_len())
    }

    /// One pagination dot per source item.
    pub fn indicators(&self) -> Vec<IndicatorDot> {
        indicators(self.position.index(), self.sequence.source_len())
    }

    /// Slots within `beyond + 1` of the focused one, with their render keys.
    pub fn render_window(&self, beyond: usize) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        render_window(self.position.index(), self.sequence.len(), beyond)
            .filter_map(move |slot| Some((self.sequence.key(slot)?, self.sequence.get(slot)?)))
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Returns `true` while a pointer gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Target of the scheduled silent re-map, if any.
    pub fn pending_remap(&self) -> Option<usize> {
        self.boundary.pending_target()
    }

    /// Returns `true` when no drag is active and no re-map is pending.
    pub fn is_at_rest(&self) -> bool {
        !self.drag.is_active() && !self.boundary.is_pending()
    }

    /// When [`tick`](Self::tick) next has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The render surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the carousel and returns its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Moves one item toward the end.
    pub fn step_forward(&mut self, now: Instant) {
        if self.accepts_navigation() {
            self.step(Direction::Forward, now);
        }
    }

    /// Moves one item toward the start.
    pub fn step_backward(&mut self, now: Instant) {
        if self.accepts_navigation() {
            self.step(Direction::Backward, now);
        }
    }

    /// Moves to the copy of source item `source` nearest to the current
    /// index. Unknown sources are ignored.
    pub fn go_to(&mut self, source: usize, now: Instant) {
        if !self.accepts_navigation() {
            return;
        }
        let n = self.sequence.source_len();
        let Some(mut target) = nearest_copy(self.position.index(), source, n) else {
            debug!("Carousel ignoring go_to({source}) over {n} items");
            return;
        };
        if !in_sequence(target, n) {
            let current = self.remap_now(now);
            match nearest_copy(current, source, n) {
                Some(closer) => target = closer,
                None => return,
            }
        }
        if target == self.position.index() {
            return;
        }
        self.commit(target, true, now);
    }

    /// Applies a navigation request.
    pub fn navigate(&mut self, navigation: Navigation, now: Instant) {
        match navigation {
            Navigation::Forward => self.step_forward(now),
            Navigation::Backward => self.step_backward(now),
            Navigation::GoTo(source) => self.go_to(source, now),
        }
    }

    /// Handles an arrow/Home/End key press.
    pub fn handle_key(&mut self, key: NavigationKey, now: Instant) {
        if !self.args.keyboard_enabled {
            return;
        }
        if let Some(navigation) = Navigation::from_key(key, self.sequence.source_len()) {
            self.navigate(navigation, now);
        }
    }

    /// Feeds one pointer event to the drag state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if !self.mounted || self.sequence.is_empty() || !self.args.drag_enabled {
            return;
        }

        let outcome = self.drag.handle(
            event,
            self.position.committed_offset(),
            self.position.stride(),
        );
        match outcome {
            DragOutcome::Ignored => {}
            DragOutcome::Started { offset } => {
                self.boundary.cancel(&mut self.scheduler);
                self.position.drop_deferred_write();
                self.position
                    .apply_live_offset(Px::saturating_round(offset), &mut self.surface);
                debug!(
                    "Carousel drag started at x={} on index {}",
                    event.client_x,
                    self.position.index()
                );
            }
            DragOutcome::Tracked { offset } => {
                self.position
                    .apply_live_offset(Px::saturating_round(offset), &mut self.surface);
                trace!("Carousel drag at x={} offset={offset}", event.client_x);
            }
            DragOutcome::Released {
                decision,
                displacement,
            } => {
                debug!("Carousel drag released after {displacement}px: {decision:?}");
                match decision {
                    ReleaseDecision::Previous => self.step(Direction::Backward, now),
                    ReleaseDecision::Next => self.step(Direction::Forward, now),
                    ReleaseDecision::SnapBack => {
                        let index = self.position.index();
                        self.commit(index, true, now);
                    }
                }
            }
        }
    }

    /// Re-measures the first item and the gap. The index is untouched and
    /// nothing is written; a failed measurement keeps the last-known-good
    /// stride. Returns whether the stride changed.
    pub fn remeasure(&mut self) -> bool {
        if !self.mounted || self.sequence.is_empty() {
            return false;
        }
        match self.surface.measure_item().and_then(ItemMetrics::stride) {
            Ok(stride) => self.position.set_stride(stride),
            Err(err) => {
                warn!(
                    "Carousel measurement failed: {err}; keeping stride {:?}",
                    self.position.stride()
                );
                false
            }
        }
    }

    /// Runs deferred work that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        for (task, action) in self.scheduler.take_due(now) {
            match action {
                CarouselTask::Remap { .. } => {
                    let Some(target) = self.boundary.complete(task) else {
                        continue;
                    };
                    if self.drag.is_active() {
                        continue;
                    }
                    self.commit(target, false, now);
                }
                CarouselTask::RestoreTransitions => {
                    self.position.restore_transitions(task, &mut self.surface);
                }
            }
        }
    }

    fn accepts_navigation(&self) -> bool {
        self.mounted && !self.sequence.is_empty() && !self.drag.is_active()
    }

    fn remap_delay(&self) -> Duration {
        self.args.remap_delay.unwrap_or(self.args.transition)
    }

    fn place_at_start(&mut self, now: Instant) {
        let n = self.sequence.source_len();
        if n == 0 {
            debug!("Carousel has no items; nothing to place");
            return;
        }
        self.remeasure();
        self.commit(n, false, now);
    }

    fn reset_transient_state(&mut self) {
        let dropped = self.scheduler.clear();
        if dropped > 0 {
            debug!("Carousel dropped {dropped} pending tasks");
        }
        self.boundary.reset();
        self.drag.cancel();
        self.position.reset(self.position.index());
    }

    fn step(&mut self, direction: Direction, now: Instant) {
        let n = self.sequence.source_len();
        let current = self.position.index();
        let target = match direction {
            Direction::Forward if in_sequence(current + 1, n) => current + 1,
            Direction::Forward => self.remap_now(now) + 1,
            Direction::Backward => match current.checked_sub(1) {
                Some(target) => target,
                None => self.remap_now(now).saturating_sub(1),
            },
        };
        self.commit(target, true, now);
    }

    /// Jumps to the middle copy right away, ahead of a move that would
    /// otherwise leave the working sequence.
    fn remap_now(&mut self, now: Instant) -> usize {
        let target = rest_index(self.position.index(), self.sequence.source_len());
        self.boundary.cancel(&mut self.scheduler);
        self.commit(target, false, now);
        target
    }

    fn commit(&mut self, index: usize, animate: bool, now: Instant) {
        let n = self.sequence.source_len();
        let frame_delay = self.args.frame_delay;
        self.position.commit(
            index,
            animate,
            &mut self.surface,
            &mut self.scheduler,
            now,
            frame_delay,
        );

        // A move held back for the restore starts animating one frame late.
        let mut remap_delay = self.remap_delay();
        if animate && self.position.has_deferred_write() {
            remap_delay = remap_delay.saturating_add(frame_delay);
        }
        if let Some(target) =
            self.boundary
                .observe(index, n, animate, &mut self.scheduler, now, remap_delay)
        {
            self.position.commit(
                target,
                false,
                &mut self.surface,
                &mut self.scheduler,
                now,
                frame_delay,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use revolve_ui::{
        ItemMetrics, MeasurementError, PointerEvent, Px, RecordingSurface, Transform,
    };

    use super::*;

    const STRIDE: i32 = 336;
    const SETTLE: Duration = Duration::from_secs(1);

    type TestCarousel = LoopCarousel<usize, RecordingSurface>;

    fn mount(n: usize) -> (TestCarousel, Instant) {
        mount_with(n, CarouselArgs::default())
    }

    fn mount_with(n: usize, args: CarouselArgs) -> (TestCarousel, Instant) {
        let t0 = Instant::now();
        let carousel = LoopCarousel::mount(
            (0..n).collect::<Vec<_>>(),
            RecordingSurface::with_stride(STRIDE),
            args,
            t0,
        );
        (carousel, t0)
    }

    fn settle(carousel: &mut TestCarousel, now: Instant) -> Instant {
        let later = now + SETTLE;
        carousel.tick(later);
        later
    }

    fn drag(carousel: &mut TestCarousel, from: f32, to: f32, now: Instant) {
        carousel.handle_pointer(PointerEvent::pressed(from), now);
        carousel.handle_pointer(PointerEvent::moved(to), now);
        carousel.handle_pointer(PointerEvent::released(to), now);
    }

    fn eased(index: i32) -> Transform {
        Transform::eased(Px(-index * STRIDE), DEFAULT_TRANSITION)
    }

    fn immediate(index: i32) -> Transform {
        Transform::immediate(Px(-index * STRIDE))
    }

    /// Mounts five items, settles, and steps forward to index 7.
    fn at_seven() -> (TestCarousel, Instant) {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.step_forward(now);
        carousel.step_forward(now);
        let now = settle(&mut carousel, now);
        assert_eq!(carousel.logical_index(), 7);
        (carousel, now)
    }

    #[test]
    fn mount_places_index_at_middle_copy() {
        let (carousel, _) = mount(5);
        assert_eq!(carousel.logical_index(), 5);
        assert_eq!(carousel.stride(), Some(Px(STRIDE)));
        assert_eq!(carousel.current_indicator_index(), Some(0));
        assert_eq!(carousel.surface().writes(), &[immediate(5)]);
        assert!(carousel.is_at_rest());
    }

    #[test]
    fn scenario_button_navigation() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        for _ in 0..4 {
            carousel.step_forward(now);
        }
        assert_eq!(carousel.logical_index(), 9);
        assert_eq!(carousel.current_indicator_index(), Some(4));
        assert_eq!(carousel.surface().last(), Some(eased(9)));
        assert!(carousel.is_at_rest());
    }

    #[test]
    fn scenario_forward_wrap() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        for _ in 0..4 {
            carousel.step_forward(now);
        }
        let now = settle(&mut carousel, now);

        carousel.step_forward(now);
        assert_eq!(carousel.logical_index(), 10);
        assert_eq!(carousel.surface().last(), Some(eased(10)));
        assert_eq!(carousel.current_indicator_index(), Some(0));
        assert_eq!(carousel.pending_remap(), Some(5));
        assert!(!carousel.is_at_rest());

        // Nothing happens before the transition has settled.
        carousel.tick(now + DEFAULT_TRANSITION / 2);
        assert_eq!(carousel.logical_index(), 10);

        carousel.tick(now + DEFAULT_TRANSITION);
        assert_eq!(carousel.logical_index(), 5);
        assert_eq!(carousel.surface().last(), Some(immediate(5)));
        assert_eq!(carousel.current_indicator_index(), Some(0));
        assert!(carousel.is_at_rest());
    }

    #[test]
    fn scenario_drag_below_threshold_snaps_back() {
        let (mut carousel, now) = at_seven();
        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        carousel.handle_pointer(PointerEvent::moved(450.0), now);
        assert_eq!(
            carousel.surface().last(),
            Some(Transform::immediate(Px(-7 * STRIDE - 75)))
        );
        carousel.handle_pointer(PointerEvent::released(450.0), now);

        assert_eq!(carousel.logical_index(), 7);
        assert_eq!(carousel.surface().last(), Some(eased(7)));
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn scenario_drag_above_threshold_advances() {
        let (mut carousel, now) = at_seven();
        drag(&mut carousel, 500.0, 350.0, now);
        assert_eq!(carousel.logical_index(), 8);
        assert_eq!(carousel.surface().last(), Some(eased(8)));
    }

    #[test]
    fn scenario_dot_jump_picks_nearest_copy() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        for _ in 0..7 {
            carousel.step_forward(now);
        }
        assert_eq!(carousel.logical_index(), 12);
        assert_eq!(carousel.current_indicator_index(), Some(2));

        carousel.go_to(4, now);
        assert_eq!(carousel.logical_index(), 14);
        assert_eq!(carousel.current_indicator_index(), Some(4));
        assert_eq!(carousel.surface().last(), Some(eased(14)));

        settle(&mut carousel, now);
        assert_eq!(carousel.logical_index(), 9);
        assert_eq!(carousel.current_indicator_index(), Some(4));
    }

    #[test]
    fn threshold_boundary_through_the_carousel() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);

        drag(&mut carousel, 0.0, 100.0, now);
        assert_eq!(carousel.logical_index(), 5);

        drag(&mut carousel, 0.0, 100.8, now);
        assert_eq!(carousel.logical_index(), 4);

        drag(&mut carousel, 100.8, 0.0, now);
        assert_eq!(carousel.logical_index(), 5);
    }

    #[test]
    fn opposite_drags_round_trip() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);

        drag(&mut carousel, 300.0, 450.0, now);
        assert_eq!(carousel.logical_index(), 4);
        assert_eq!(carousel.pending_remap(), Some(9));

        drag(&mut carousel, 450.0, 300.0, now);
        assert_eq!(carousel.logical_index(), 5);
        assert!(carousel.is_at_rest());
    }

    #[test]
    fn pointer_down_cancels_pending_remap() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.step_backward(now);
        assert_eq!(carousel.pending_remap(), Some(9));

        carousel.handle_pointer(PointerEvent::pressed(200.0), now);
        assert_eq!(carousel.pending_remap(), None);
        assert_eq!(carousel.surface().last(), Some(immediate(4)));

        // A late tick cannot move the index under the drag.
        carousel.tick(now + SETTLE);
        assert_eq!(carousel.logical_index(), 4);

        carousel.handle_pointer(PointerEvent::released(210.0), now + SETTLE);
        assert_eq!(carousel.logical_index(), 4);
        assert_eq!(carousel.pending_remap(), Some(9));
        settle(&mut carousel, now + SETTLE);
        assert_eq!(carousel.logical_index(), 9);
    }

    #[test]
    fn pointer_leave_ends_the_gesture() {
        let (mut carousel, now) = at_seven();
        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        carousel.handle_pointer(PointerEvent::left(650.0), now);
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.logical_index(), 6);
    }

    #[test]
    fn stray_pointer_events_are_ignored() {
        let (mut carousel, now) = at_seven();
        let writes = carousel.surface().writes().len();
        carousel.handle_pointer(PointerEvent::released(100.0), now);
        carousel.handle_pointer(PointerEvent::moved(100.0), now);
        carousel.handle_pointer(PointerEvent::left(100.0), now);
        assert_eq!(carousel.logical_index(), 7);
        assert_eq!(carousel.surface().writes().len(), writes);
    }

    #[test]
    fn navigation_is_ignored_while_dragging() {
        let (mut carousel, now) = at_seven();
        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        carousel.step_forward(now);
        carousel.go_to(0, now);
        carousel.handle_key(NavigationKey::ArrowLeft, now);
        assert_eq!(carousel.logical_index(), 7);
        assert!(carousel.is_dragging());
    }

    #[test]
    fn pointer_down_mid_animation_overrides_transform() {
        let (mut carousel, now) = at_seven();
        carousel.step_forward(now);
        assert_eq!(carousel.surface().last(), Some(eased(8)));
        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        assert_eq!(carousel.surface().last(), Some(immediate(8)));
    }

    #[test]
    fn pointer_down_discards_move_waiting_for_transitions() {
        let (mut carousel, t0) = mount(5);
        carousel.step_forward(t0);
        assert_eq!(carousel.surface().writes(), &[immediate(5)]);

        carousel.handle_pointer(PointerEvent::pressed(500.0), t0);
        carousel.tick(t0 + DEFAULT_FRAME_DELAY);
        assert_eq!(carousel.surface().writes(), &[immediate(5), immediate(6)]);
    }

    #[test]
    fn move_after_jump_waits_one_frame() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.step_forward(now);
        carousel.step_forward(now);
        carousel.step_forward(now);
        carousel.step_forward(now);
        carousel.step_forward(now);
        let remapped_at = now + DEFAULT_TRANSITION;
        carousel.tick(remapped_at);
        assert_eq!(carousel.surface().last(), Some(immediate(5)));

        carousel.step_forward(remapped_at);
        assert_eq!(carousel.logical_index(), 6);
        assert_eq!(carousel.surface().last(), Some(immediate(5)));

        carousel.tick(remapped_at + DEFAULT_FRAME_DELAY);
        assert_eq!(carousel.surface().last(), Some(eased(6)));
    }

    #[test]
    fn remap_waits_for_a_move_held_back_by_the_restore() {
        let (mut carousel, t0) = mount(5);
        carousel.step_backward(t0);
        assert_eq!(carousel.surface().writes(), &[immediate(5)]);

        let mut eased_at = None;
        let mut remapped_at = None;
        let mut seen = carousel.surface().writes().len();
        for step in 1..=200u64 {
            let now = t0 + Duration::from_millis(step * 4);
            carousel.tick(now);
            for write in &carousel.surface().writes()[seen..] {
                if *write == eased(4) {
                    eased_at = Some(now);
                } else if *write == immediate(9) {
                    remapped_at = Some(now);
                }
            }
            seen = carousel.surface().writes().len();
        }

        let eased_at = eased_at.expect("deferred move was written");
        let remapped_at = remapped_at.expect("remap ran");
        assert_eq!(eased_at, t0 + DEFAULT_FRAME_DELAY);
        assert!(remapped_at >= eased_at + DEFAULT_TRANSITION);
        assert_eq!(carousel.logical_index(), 9);
    }

    #[test]
    fn displayed_offset_follows_the_drag() {
        let (mut carousel, now) = at_seven();
        assert_eq!(carousel.displayed_offset(), Px(-7 * STRIDE));

        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        carousel.handle_pointer(PointerEvent::moved(460.0), now);
        assert_eq!(carousel.displayed_offset(), Px(-7 * STRIDE - 60));
        assert_eq!(carousel.committed_offset(), Px(-7 * STRIDE));

        carousel.handle_pointer(PointerEvent::released(460.0), now);
        assert_eq!(carousel.displayed_offset(), Px(-7 * STRIDE));
    }

    #[test]
    fn rapid_steps_never_leave_the_sequence() {
        let (mut carousel, t0) = mount(2);
        let now = settle(&mut carousel, t0);
        for _ in 0..9 {
            carousel.step_forward(now);
            assert!(in_sequence(carousel.logical_index(), 2));
        }
        for _ in 0..9 {
            carousel.step_backward(now);
            assert!(in_sequence(carousel.logical_index(), 2));
        }
        settle(&mut carousel, now);
        assert!((2..4).contains(&carousel.logical_index()));
        assert_eq!(carousel.current_indicator_index(), Some(0));
    }

    #[test]
    fn rest_invariant_holds_after_mixed_input() {
        for n in 1..=6 {
            let (mut carousel, t0) = mount(n);
            let mut now = settle(&mut carousel, t0);
            let mut seed: u32 = 0x2545_f491 ^ n as u32;
            for _ in 0..200 {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                match seed >> 29 {
                    0 | 1 => carousel.step_forward(now),
                    2 | 3 => carousel.step_backward(now),
                    4 => carousel.go_to((seed as usize >> 8) % n, now),
                    5 => drag(&mut carousel, 500.0, 500.0 + ((seed >> 16) % 400) as f32 - 200.0, now),
                    6 => carousel.handle_key(NavigationKey::End, now),
                    _ => now = settle(&mut carousel, now),
                }
                assert!(in_sequence(carousel.logical_index(), n));
            }
            settle(&mut carousel, now);
            assert!(carousel.is_at_rest());
            assert!((n..2 * n).contains(&carousel.logical_index()));
        }
    }

    #[test]
    fn indicator_is_stable_across_remap() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.step_backward(now);
        let before = carousel.current_indicator_index();
        assert_eq!(before, Some(4));
        settle(&mut carousel, now);
        assert_eq!(carousel.logical_index(), 9);
        assert_eq!(carousel.current_indicator_index(), before);
        assert!(carousel.indicators()[4].active);
    }

    #[test]
    fn keyboard_navigation() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.handle_key(NavigationKey::ArrowRight, now);
        assert_eq!(carousel.logical_index(), 6);
        carousel.handle_key(NavigationKey::ArrowLeft, now);
        assert_eq!(carousel.logical_index(), 5);
        carousel.handle_key(NavigationKey::End, now);
        assert_eq!(carousel.logical_index(), 4);
        carousel.handle_key(NavigationKey::Home, now);
        assert_eq!(carousel.logical_index(), 5);

        let (mut disabled, t0) = mount_with(5, CarouselArgs::default().keyboard_enabled(false));
        disabled.handle_key(NavigationKey::ArrowRight, t0);
        assert_eq!(disabled.logical_index(), 5);
    }

    #[test]
    fn disabled_drag_ignores_pointer() {
        let (mut carousel, t0) = mount_with(5, CarouselArgs::default().drag_enabled(false));
        drag(&mut carousel, 500.0, 100.0, t0);
        assert_eq!(carousel.logical_index(), 5);
        assert_eq!(carousel.surface().writes().len(), 1);
    }

    #[test]
    fn go_to_ignores_unknown_and_current_items() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        let writes = carousel.surface().writes().len();
        carousel.go_to(5, now);
        carousel.go_to(0, now);
        assert_eq!(carousel.logical_index(), 5);
        assert_eq!(carousel.surface().writes().len(), writes);
    }

    #[test]
    fn custom_remap_delay_and_gain() {
        let args = CarouselArgs::default()
            .remap_delay(Some(Duration::from_millis(50)))
            .drag_gain(1.0);
        let (mut carousel, t0) = mount_with(5, args);
        let now = settle(&mut carousel, t0);

        carousel.handle_pointer(PointerEvent::pressed(500.0), now);
        carousel.handle_pointer(PointerEvent::moved(450.0), now);
        assert_eq!(
            carousel.surface().last(),
            Some(Transform::immediate(Px(-5 * STRIDE - 50)))
        );
        carousel.handle_pointer(PointerEvent::released(650.0), now);
        assert_eq!(carousel.logical_index(), 4);
        carousel.tick(now + Duration::from_millis(50));
        assert_eq!(carousel.logical_index(), 9);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let t0 = Instant::now();
        let mut carousel: TestCarousel = LoopCarousel::mount(
            Vec::new(),
            RecordingSurface::with_stride(STRIDE),
            CarouselArgs::default(),
            t0,
        );
        carousel.step_forward(t0);
        carousel.step_backward(t0);
        carousel.go_to(0, t0);
        carousel.handle_key(NavigationKey::End, t0);
        drag(&mut carousel, 0.0, 300.0, t0);
        carousel.tick(t0 + SETTLE);

        assert_eq!(carousel.logical_index(), 0);
        assert_eq!(carousel.current_indicator_index(), None);
        assert!(carousel.indicators().is_empty());
        assert_eq!(carousel.render_window(2).count(), 0);
        assert!(carousel.surface().writes().is_empty());
        assert!(!carousel.remeasure());
    }

    #[test]
    fn measurement_failure_keeps_last_known_stride() {
        let t0 = Instant::now();
        let mut carousel: TestCarousel = LoopCarousel::mount(
            (0..5).collect::<Vec<_>>(),
            RecordingSurface::unmeasured(),
            CarouselArgs::default(),
            t0,
        );
        assert_eq!(carousel.stride(), None);
        assert_eq!(carousel.committed_offset(), Px::ZERO);
        assert_eq!(carousel.surface().last(), Some(Transform::immediate(Px::ZERO)));

        // Without a stride every release snaps back.
        drag(&mut carousel, 500.0, 0.0, t0);
        assert_eq!(carousel.logical_index(), 5);

        carousel
            .surface_mut()
            .set_metrics(Ok(ItemMetrics::new(Px(320), Px(16))));
        assert!(carousel.remeasure());
        assert_eq!(carousel.stride(), Some(Px(336)));

        carousel
            .surface_mut()
            .set_metrics(Err(MeasurementError::NotLaidOut));
        assert!(!carousel.remeasure());
        carousel
            .surface_mut()
            .set_metrics(Ok(ItemMetrics::new(Px::ZERO, Px(16))));
        assert!(!carousel.remeasure());
        assert_eq!(carousel.stride(), Some(Px(336)));
        assert_eq!(carousel.committed_offset(), Px(-5 * 336));
    }

    #[test]
    fn remeasure_does_not_commit() {
        let (mut carousel, t0) = mount(5);
        let writes = carousel.surface().writes().len();
        carousel
            .surface_mut()
            .set_metrics(Ok(ItemMetrics::new(Px(500), Px(20))));
        assert!(carousel.remeasure());
        assert_eq!(carousel.surface().writes().len(), writes);
        assert_eq!(carousel.logical_index(), 5);
        assert_eq!(carousel.committed_offset(), Px(-2600));

        carousel.step_forward(t0 + SETTLE);
        carousel.tick(t0 + SETTLE);
        assert_eq!(
            carousel.surface().last(),
            Some(Transform::eased(Px(-3120), DEFAULT_TRANSITION))
        );
    }

    #[test]
    fn drag_across_resize_keeps_its_stride() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.handle_pointer(PointerEvent::pressed(500.0), now);

        carousel
            .surface_mut()
            .set_metrics(Ok(ItemMetrics::new(Px(1000), Px::ZERO)));
        carousel.remeasure();

        carousel.handle_pointer(PointerEvent::moved(350.0), now);
        assert_eq!(
            carousel.surface().last(),
            Some(Transform::immediate(Px(-5 * STRIDE - 225)))
        );
        carousel.handle_pointer(PointerEvent::released(350.0), now);
        assert_eq!(carousel.logical_index(), 6);
        assert_eq!(
            carousel.surface().last(),
            Some(Transform::eased(Px(-6000), DEFAULT_TRANSITION))
        );
    }

    #[test]
    fn unmount_cancels_pending_work() {
        let (mut carousel, t0) = mount(5);
        let now = settle(&mut carousel, t0);
        carousel.step_backward(now);
        carousel.handle_pointer(PointerEvent::pressed(0.0), now);
        let writes = carousel.surface().writes().len();

        carousel.unmount();
        assert!(!carousel.is_mounted());
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.next_deadline(), None);

        carousel.tick(now + SETTLE);
        carousel.step_forward(now + SETTLE);
        carousel.handle_pointer(PointerEvent::released(300.0), now + SETTLE);
        assert!(!carousel.remeasure());
        assert_eq!(carousel.logical_index(), 4);
        assert_eq!(carousel.surface().writes().len(), writes);
    }

    #[test]
    fn set_items_rebuilds_only_for_a_new_list() {
        let t0 = Instant::now();
        let items: Arc<[usize]> = Arc::from(vec![10, 20, 30, 40, 50]);
        let mut carousel = LoopCarousel::mount(
            Arc::clone(&items),
            RecordingSurface::with_stride(STRIDE),
            CarouselArgs::default(),
            t0,
        );
        let now = settle(&mut carousel, t0);
        carousel.step_backward(now);
        assert_eq!(carousel.logical_index(), 4);

        carousel.set_items(Arc::clone(&items), now);
        assert_eq!(carousel.logical_index(), 4);
        assert_eq!(carousel.pending_remap(), Some(9));

        carousel.handle_pointer(PointerEvent::pressed(0.0), now);
        carousel.set_items(vec![1, 2, 3], now);
        assert_eq!(carousel.items(), &[1, 2, 3]);
        assert_eq!(carousel.logical_index(), 3);
        assert_eq!(carousel.pending_remap(), None);
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.surface().last(), Some(immediate(3)));
    }

    #[test]
    fn render_window_follows_the_index() {
        let (carousel, _) = mount(5);
        let slots: Vec<_> = carousel
            .render_window(0)
            .map(|(key, item)| (key.to_string(), *item))
            .collect();
        assert_eq!(
            slots,
            vec![
                ("0-4".to_string(), 4),
                ("1-0".to_string(), 0),
                ("1-1".to_string(), 1)
            ]
        );
    }

    #[test]
    fn next_deadline_reports_pending_work() {
        let (mut carousel, t0) = mount(5);
        assert_eq!(carousel.next_deadline(), Some(t0 + DEFAULT_FRAME_DELAY));
        let now = settle(&mut carousel, t0);
        assert_eq!(carousel.next_deadline(), None);
        carousel.step_forward(now);
        assert_eq!(carousel.next_deadline(), None);
        for _ in 0..4 {
            carousel.step_forward(now);
        }
        assert_eq!(carousel.next_deadline(), Some(now + DEFAULT_TRANSITION));
    }
}

//! Pointer drag state machine.
//!
//! [`DragController::handle`] is the single entry point: it consumes one
//! [`PointerEvent`] and reports what the carousel should do with it. The
//! controller never touches the index or the surface itself.

use revolve_ui::{PointerEvent, PointerEventContent, PressKeyEventType, Px};

/// Multiplier applied to pointer travel while dragging.
pub const DEFAULT_DRAG_GAIN: f32 = 1.5;

/// Fraction of the stride the pointer must travel for a release to change
/// the index.
pub const DEFAULT_RELEASE_THRESHOLD: f32 = 0.3;

/// Absorbs `f32` error when a release lands exactly on the threshold.
const SUBPIXEL_TOLERANCE: f32 = 1e-3;

/// State captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Client x of the pointer-down.
    pub origin_client_x: f32,
    /// Committed offset when the gesture started.
    pub offset_at_start: f32,
    /// Stride in effect when the gesture started.
    pub stride_at_start: Option<Px>,
}

/// `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is in progress.
    Dragging(DragSession),
}

/// What a finished gesture does to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDecision {
    /// Dragged right far enough: show the previous item.
    Previous,
    /// Dragged left far enough: show the next item.
    Next,
    /// Not far enough: return to the committed index.
    SnapBack,
}

/// Result of feeding one event to the drag controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The event did not belong to a gesture.
    Ignored,
    /// A gesture started; hold the track at `offset`.
    Started {
        /// Offset to write with transitions off.
        offset: f32,
    },
    /// The pointer moved; follow it to `offset`.
    Tracked {
        /// Offset to write with transitions off.
        offset: f32,
    },
    /// The gesture ended.
    Released {
        /// What to do with the index.
        decision: ReleaseDecision,
        /// Raw pointer travel since pointer-down.
        displacement: f32,
    },
}

/// Decides the release of a gesture from its raw pointer displacement.
///
/// Without a usable stride every release snaps back.
///
/// ```
/// use revolve_components::carousel::{ReleaseDecision, decide_release};
/// use revolve_ui::Px;
///
/// let stride = Some(Px(336));
/// assert_eq!(decide_release(100.8, stride, 0.3), ReleaseDecision::Previous);
/// assert_eq!(decide_release(100.0, stride, 0.3), ReleaseDecision::SnapBack);
/// assert_eq!(decide_release(-150.0, stride, 0.3), ReleaseDecision::Next);
/// ```
pub fn decide_release(displacement: f32, stride: Option<Px>, threshold: f32) -> ReleaseDecision {
    let Some(stride) = stride.filter(|s| s.is_positive()) else {
        return ReleaseDecision::SnapBack;
    };
    if !displacement.is_finite() || displacement == 0.0 {
        return ReleaseDecision::SnapBack;
    }

    let limit = stride.to_f32() * threshold;
    if displacement.abs() + SUBPIXEL_TOLERANCE < limit {
        ReleaseDecision::SnapBack
    } else if displacement > 0.0 {
        ReleaseDecision::Previous
    } else {
        ReleaseDecision::Next
    }
}

/// Tracks one pointer gesture at a time.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    gain: f32,
    threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_GAIN, DEFAULT_RELEASE_THRESHOLD)
    }
}

impl DragController {
    /// Creates an idle controller. A non-finite or negative gain falls back
    /// to [`DEFAULT_DRAG_GAIN`]; the threshold is clamped to `0.0..=1.0`.
    pub fn new(gain: f32, threshold: f32) -> Self {
        let gain = if gain.is_finite() && gain >= 0.0 {
            gain
        } else {
            DEFAULT_DRAG_GAIN
        };
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_RELEASE_THRESHOLD
        };
        Self {
            state: DragState::Idle,
            gain,
            threshold,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns `true` while a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Effective drag gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Effective release threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feeds one pointer event.
    ///
    /// `committed_offset` and `stride` describe the carousel at this
    /// instant; they are only read on pointer-down.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        committed_offset: Px,
        stride: Option<Px>,
    ) -> DragOutcome {
        match (self.state, event.content) {
            (DragState::Idle, PointerEventContent::Pressed(PressKeyEventType::Left)) => {
                let session = DragSession {
                    origin_client_x: event.client_x,
                    offset_at_start: committed_offset.to_f32(),
                    stride_at_start: stride,
                };
                self.state = DragState::Dragging(session);
                DragOutcome::Started {
                    offset: session.offset_at_start,
                }
            }
            (DragState::Dragging(session), PointerEventContent::Moved) => {
                let walk = (event.client_x - session.origin_client_x) * self.gain;
                DragOutcome::Tracked {
                    offset: session.offset_at_start + walk,
                }
            }
            (
                DragState::Dragging(session),
                PointerEventContent::Released(PressKeyEventType::Left) | PointerEventContent::Left,
            ) => {
                self.state = DragState::Idle;
                let displacement = event.client_x - session.origin_client_x;
                DragOutcome::Released {
                    decision: decide_release(displacement, session.stride_at_start, self.threshold),
                    displacement,
                }
            }
            _ => DragOutcome::Ignored,
        }
    }

    /// Drops the current gesture without a release decision. Returns whether
    /// a gesture was dropped.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }
}

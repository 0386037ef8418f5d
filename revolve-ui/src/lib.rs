//! Host primitives for revolve components.
//!
//! revolve components are headless: they own their interaction state and
//! decide what should be on screen, but they never talk to a window system
//! directly. This crate defines the narrow contract between a component and
//! its host:
//!
//! - [`Px`] for strides and transforms.
//! - [`PointerEvent`] and [`NavigationKey`] for input.
//! - [`Surface`] for transform writes and layout measurement.
//! - [`FrameScheduler`] for cancellable deferred work driven by the host's
//!   frame clock.
//! - [`State`] for sharing a component between host callbacks.
//!
//! # Hosting a component
//!
//! ```
//! use revolve_ui::{ItemMetrics, MeasurementError, Px, Surface, Transform};
//!
//! struct Track {
//!     translate_x: Px,
//! }
//!
//! impl Surface for Track {
//!     fn apply_transform(&mut self, transform: Transform) {
//!         self.translate_x = transform.translate_x;
//!     }
//!
//!     fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
//!         Ok(ItemMetrics::new(Px(320), Px(16)))
//!     }
//! }
//!
//! let mut track = Track { translate_x: Px::ZERO };
//! track.apply_transform(Transform::immediate(Px(-336)));
//! assert_eq!(track.translate_x, Px(-336));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod logging;
pub mod pointer;
pub mod px;
pub mod scheduler;
pub mod state;
pub mod surface;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::{
    pointer::{NavigationKey, PointerEvent, PointerEventContent, PressKeyEventType},
    px::Px,
    scheduler::{FrameScheduler, TaskId},
    state::State,
    surface::{ItemMetrics, MeasurementError, Surface, Transform, Transition},
};

#[cfg(any(test, feature = "testing"))]
pub use crate::testing::RecordingSurface;

//! The seam between a component and whatever actually paints it.
//!
//! A [`Surface`] stands in for the container node a component is mounted in:
//! it receives transform writes and answers layout measurements. A browser
//! host would back it with a DOM element, a GPU host with a layer, tests
//! with [`RecordingSurface`](crate::RecordingSurface).

use std::time::Duration;

use thiserror::Error;

use crate::px::Px;

/// How a transform write should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Apply the new transform on the next frame with no interpolation.
    None,
    /// Ease from the current transform to the new one over `duration`.
    Ease {
        /// Length of the transition.
        duration: Duration,
    },
}

impl Transition {
    /// Returns `true` for [`Transition::Ease`].
    pub fn is_animated(self) -> bool {
        matches!(self, Transition::Ease { .. })
    }
}

/// A horizontal translation applied to a component's track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Horizontal translation in physical pixels.
    pub translate_x: Px,
    /// Whether the change is interpolated.
    pub transition: Transition,
}

impl Transform {
    /// A translation that jumps without interpolation.
    pub fn immediate(translate_x: Px) -> Self {
        Self {
            translate_x,
            transition: Transition::None,
        }
    }

    /// A translation that eases over `duration`.
    pub fn eased(translate_x: Px, duration: Duration) -> Self {
        Self {
            translate_x,
            transition: Transition::Ease { duration },
        }
    }
}

/// Layout of a single item as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemMetrics {
    /// Width of the item's bounding box.
    pub width: Px,
    /// Gap between the item and the next one.
    pub gap: Px,
}

impl ItemMetrics {
    /// Creates metrics from a width and a gap.
    pub fn new(width: Px, gap: Px) -> Self {
        Self { width, gap }
    }

    /// Distance from one item's start to the next item's start.
    ///
    /// # Errors
    ///
    /// Returns [`MeasurementError::Degenerate`] when the stride would not be
    /// strictly positive.
    pub fn stride(self) -> Result<Px, MeasurementError> {
        let stride = self.width.saturating_add(self.gap.max(Px::ZERO));
        if self.width.is_positive() && stride.is_positive() {
            Ok(stride)
        } else {
            Err(MeasurementError::Degenerate {
                width: self.width,
                gap: self.gap,
            })
        }
    }
}

/// Why a layout measurement could not produce a usable stride.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    /// The container has not been laid out yet or has no items.
    #[error("container is not laid out yet")]
    NotLaidOut,
    /// The first item measured with a non-positive width.
    #[error("item measured as {width} wide with a {gap} gap")]
    Degenerate {
        /// Measured width.
        width: Px,
        /// Measured gap.
        gap: Px,
    },
}

/// A render target for horizontally translated components.
pub trait Surface {
    /// Writes the track transform.
    fn apply_transform(&mut self, transform: Transform);

    /// Measures the first item and the inter-item gap.
    ///
    /// # Errors
    ///
    /// Returns a [`MeasurementError`] when the layout is not available.
    fn measure_item(&self) -> Result<ItemMetrics, MeasurementError>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn apply_transform(&mut self, transform: Transform) {
        (**self).apply_transform(transform);
    }

    fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
        (**self).measure_item()
    }
}

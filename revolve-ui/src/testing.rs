//! Test doubles for hosts and component tests.
//!
//! Enabled with the `testing` feature.

use crate::{
    px::Px,
    surface::{ItemMetrics, MeasurementError, Surface, Transform},
};

/// A [`Surface`] that records every transform write and serves scripted
/// measurements.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    writes: Vec<Transform>,
    metrics: Result<ItemMetrics, MeasurementError>,
}

impl RecordingSurface {
    /// A surface whose items measure `width` wide with `gap` between them.
    pub fn new(width: Px, gap: Px) -> Self {
        Self {
            writes: Vec::new(),
            metrics: Ok(ItemMetrics::new(width, gap)),
        }
    }

    /// A surface whose items measure exactly `stride` with no gap.
    pub fn with_stride(stride: i32) -> Self {
        Self::new(Px(stride), Px::ZERO)
    }

    /// A surface that has not been laid out.
    pub fn unmeasured() -> Self {
        Self {
            writes: Vec::new(),
            metrics: Err(MeasurementError::NotLaidOut),
        }
    }

    /// Changes what the next measurement returns.
    pub fn set_metrics(&mut self, metrics: Result<ItemMetrics, MeasurementError>) {
        self.metrics = metrics;
    }

    /// Every transform written so far, oldest first.
    pub fn writes(&self) -> &[Transform] {
        &self.writes
    }

    /// The most recent transform write.
    pub fn last(&self) -> Option<Transform> {
        self.writes.last().copied()
    }

    /// Forgets recorded writes.
    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl Surface for RecordingSurface {
    fn apply_transform(&mut self, transform: Transform) {
        self.writes.push(transform);
    }

    fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
        self.metrics.clone()
    }
}

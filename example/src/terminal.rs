//! A [`Surface`] that paints the carousel track as text.

use revolve_components::carousel::{LoopCarousel, render_window};
use revolve_ui::{ItemMetrics, MeasurementError, Px, Surface, Transform, Transition};
use tracing::info;

use crate::projects::Project;

/// Remembers the last transform written and serves the configured card size
/// as its layout measurement.
#[derive(Debug)]
pub struct TerminalSurface {
    metrics: ItemMetrics,
    translate_x: Px,
    transition: Transition,
    writes: usize,
}

impl TerminalSurface {
    pub fn new(width: Px, gap: Px) -> Self {
        Self {
            metrics: ItemMetrics::new(width, gap),
            translate_x: Px::ZERO,
            transition: Transition::None,
            writes: 0,
        }
    }

    /// Changes the card size reported by the next measurement.
    pub fn resize(&mut self, width: Px, gap: Px) {
        self.metrics = ItemMetrics::new(width, gap);
    }

    pub fn translate_x(&self) -> Px {
        self.translate_x
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Surface for TerminalSurface {
    fn apply_transform(&mut self, transform: Transform) {
        self.translate_x = transform.translate_x;
        self.transition = transform.transition;
        self.writes += 1;
        match transform.transition {
            Transition::None => info!("translateX({})", transform.translate_x),
            Transition::Ease { duration } => {
                info!("translateX({}) easing over {duration:?}", transform.translate_x)
            }
        }
    }

    fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
        if self.writes == 0 && self.metrics.width == Px::ZERO {
            return Err(MeasurementError::NotLaidOut);
        }
        Ok(self.metrics)
    }
}

/// Renders the painted window of the track, the focused card in brackets,
/// followed by the pagination dots.
pub fn render(carousel: &LoopCarousel<Project, TerminalSurface>, beyond: usize) -> String {
    if carousel.items().is_empty() {
        return "(no projects)".to_string();
    }

    let focused = carousel.logical_index();
    let slots = render_window(focused, carousel.sequence().len(), beyond);
    let track = slots
        .zip(carousel.render_window(beyond))
        .map(|(slot, (key, project))| {
            if slot == focused {
                format!("[{key} {}]", project.title)
            } else {
                format!(" {key} {} ", project.title)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let dots: String = carousel
        .indicators()
        .iter()
        .map(|dot| if dot.active { '●' } else { '○' })
        .collect();
    format!("{}  {dots}", track.trim_end())
}

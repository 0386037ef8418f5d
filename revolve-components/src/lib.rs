//! Headless interactive components for revolve hosts.
//!
//! # Usage
//!
//! Components own their interaction state and paint through a
//! [`revolve_ui::Surface`] supplied by the host. The host forwards input and
//! drives time with a `tick` call once per frame.
//!
//! ```
//! # use std::time::Instant;
//! use revolve_components::carousel::{CarouselArgs, LoopCarousel};
//! # use revolve_ui::{ItemMetrics, MeasurementError, Px, Surface, Transform};
//! # struct Track;
//! # impl Surface for Track {
//! #     fn apply_transform(&mut self, _: Transform) {}
//! #     fn measure_item(&self) -> Result<ItemMetrics, MeasurementError> {
//! #         Ok(ItemMetrics::new(Px(300), Px(20)))
//! #     }
//! # }
//! # let now = Instant::now();
//!
//! let args = CarouselArgs::default().drag_gain(1.2);
//! let mut carousel = LoopCarousel::mount(vec!["one", "two", "three"], Track, args, now);
//! carousel.step_forward(now);
//! assert_eq!(carousel.current_indicator_index(), Some(1));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod carousel;

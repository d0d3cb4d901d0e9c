//! Headless infinite-loop carousel engine.
//!
//! The engine keeps a padded sequence of slide clones around the original
//! slides so the track can keep moving in one direction forever, silently
//! jumping back to the equivalent original whenever a move lands in a clone
//! region. Drag/flick gestures, keyboard navigation and autoplay all drive
//! the same position controller.
//!
//! Rendering is delegated to a [`CarouselHost`]: the engine asks it for
//! measurements and hands back [`RenderRequest`]s describing the track
//! transform to paint. Nothing here depends on a particular UI toolkit.
//!
//! ```
//! use fz_carousel::{Carousel, CarouselConfig};
//! # use fz_carousel::{AutoplayToken, CarouselHost, ChangeSource, RenderRequest, SlideRef};
//! # use std::time::{Duration, Instant};
//! # struct Dom { t0: Instant }
//! # impl CarouselHost for Dom {
//! #     fn measure_slide_width(&self, _: SlideRef) -> Option<f32> { Some(300.0) }
//! #     fn measure_viewport_width(&self) -> Option<f32> { Some(300.0) }
//! #     fn apply_transform(&mut self, _: RenderRequest) {}
//! #     fn now(&self) -> Instant { self.t0 }
//! #     fn schedule_autoplay(&mut self, _: Duration, _: AutoplayToken) {}
//! #     fn cancel_autoplay(&mut self) {}
//! #     fn current_slide_changed(&mut self, _: usize, _: ChangeSource) {}
//! # }
//! # let host = Dom { t0: Instant::now() };
//! let mut carousel = Carousel::new(CarouselConfig::default(), host);
//! carousel.set_slides(vec!["intro", "pricing", "faq"]);
//! carousel.next_slide();
//! carousel.on_transition_end();
//! assert_eq!(carousel.current_index(), 1);
//! ```

pub mod animator;
pub mod autoplay;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod messages;
pub mod position;
pub mod registry;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod update;

pub use animator::TransitionSpec;
pub use config::{CarouselConfig, CarouselOptions, ConfigWarning, EasingKind};
pub use engine::{Carousel, NavKey, PagerDot};
pub use error::CarouselError;
pub use geometry::{LayoutMode, OffsetTable, TrackGeometry};
pub use gesture::{GestureOutcome, PointerId};
pub use host::{AutoplayToken, CarouselHost, ChangeSource, RenderRequest, SlideRef};
pub use messages::CarouselMessage;
pub use position::{CarouselState, MotionPhase};
pub use registry::{CloneTag, PaddedEntry, SlideRegistry};
pub use update::update;

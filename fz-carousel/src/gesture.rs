//! Drag/flick gesture tracking
//!
//! Single-pointer tracker. Touch and mouse input both arrive as pointer
//! samples; only the pointer id differs. On release the distance and
//! velocity decide between committing to a neighbour and snapping back.

use std::time::{Duration, Instant};

use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};

/// Host-assigned pointer identity (touch identifier, mouse = 0, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Conventional id for the primary mouse button.
    pub const MOUSE: Self = Self(0);
}

/// What a released gesture should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Dragged left: advance to the next slide.
    Next,
    /// Dragged right: go back to the previous slide.
    Previous,
    SnapBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub drag_threshold_px: f32,
    pub flick_velocity: f32,
    pub flick_min_distance_px: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::from(&CarouselConfig::default())
    }
}

impl From<&CarouselConfig> for GestureThresholds {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            drag_threshold_px: config.drag_threshold_px,
            flick_velocity: config.flick_velocity_threshold,
            flick_min_distance_px: config.flick_min_distance_px,
        }
    }
}

/// Velocity in px/ms; zero for a zero-length gesture.
pub fn release_velocity(distance: f32, duration: Duration) -> f32 {
    let ms = duration.as_secs_f32() * 1000.0;
    if ms <= 0.0 {
        0.0
    } else {
        distance.abs() / ms
    }
}

/// Distance-or-flick commit heuristic.
pub fn decide(distance: f32, duration: Duration, thresholds: &GestureThresholds) -> GestureOutcome {
    let velocity = release_velocity(distance, duration);
    let far = distance.abs() > thresholds.drag_threshold_px;
    let flick =
        distance.abs() > thresholds.flick_min_distance_px && velocity > thresholds.flick_velocity;
    if !(far || flick) {
        return GestureOutcome::SnapBack;
    }
    if distance < 0.0 {
        GestureOutcome::Next
    } else {
        GestureOutcome::Previous
    }
}

/// Summary of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    pub distance: f32,
    pub duration: Duration,
    pub velocity: f32,
    pub outcome: GestureOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    pointer: PointerId,
    start_x: f32,
    started_at: Instant,
    initial_offset: f32,
    last_x: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    active: Option<ActiveDrag>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn pointer(&self) -> Option<PointerId> {
        self.active.map(|drag| drag.pointer)
    }

    /// Begin tracking `pointer` from `x`, with the track at `initial_offset`.
    pub fn start(
        &mut self,
        pointer: PointerId,
        x: f32,
        at: Instant,
        initial_offset: f32,
    ) -> Result<()> {
        if self.active.is_some() {
            return Err(CarouselError::AlreadyDragging);
        }
        self.active = Some(ActiveDrag {
            pointer,
            start_x: x,
            started_at: at,
            initial_offset,
            last_x: x,
        });
        Ok(())
    }

    /// Track offset for a pointer sample: start offset plus travel, 1:1.
    pub fn track(&mut self, pointer: PointerId, x: f32) -> Result<f32> {
        let drag = self.owned(pointer)?;
        drag.last_x = x;
        Ok(drag.initial_offset + (x - drag.start_x))
    }

    /// Stop tracking and classify the release.
    pub fn finish(
        &mut self,
        pointer: PointerId,
        x: f32,
        at: Instant,
        thresholds: &GestureThresholds,
    ) -> Result<GestureRelease> {
        let drag = *self.owned(pointer)?;
        self.active = None;

        let distance = x - drag.start_x;
        let duration = at.saturating_duration_since(drag.started_at);
        Ok(GestureRelease {
            distance,
            duration,
            velocity: release_velocity(distance, duration),
            outcome: decide(distance, duration, thresholds),
        })
    }

    /// Drop the gesture without a decision. Returns whether one was active.
    pub fn abort(&mut self) -> bool {
        self.active.take().is_some()
    }

    fn owned(&mut self, pointer: PointerId) -> Result<&mut ActiveDrag> {
        let drag = self.active.as_mut().ok_or(CarouselError::GestureInactive)?;
        if drag.pointer != pointer {
            return Err(CarouselError::PointerMismatch {
                expected: drag.pointer,
                got: pointer,
            });
        }
        Ok(drag)
    }
}

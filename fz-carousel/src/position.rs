//! Position controller: logical/padded index bookkeeping and loop re-homing
//!
//! The controller owns the carousel state (`current_original`,
//! `current_dom`, motion phase) and turns navigation requests into
//! [`RenderRequest`]s. It never talks to the host; the engine forwards the
//! requests it returns.

use std::time::Instant;

use crate::animator::{TrackTween, TransitionSpec};
use crate::geometry::TrackGeometry;
use crate::host::RenderRequest;

/// What the track is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionPhase {
    /// At rest on the current slide.
    #[default]
    Idle,
    /// Animating towards the current slide.
    Transitioning,
    /// Following a pointer.
    Dragging,
}

/// Snapshot of the carousel's navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    /// Logical slide showing, always in `[0, N)`.
    pub current_original_index: usize,
    /// Padded-sequence position the track is aimed at.
    pub current_dom_index: usize,
    /// Current motion phase.
    pub phase: MotionPhase,
}

impl CarouselState {
    /// An animated move is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.phase == MotionPhase::Transitioning
    }

    /// A pointer owns the track.
    pub fn is_dragging(&self) -> bool {
        self.phase == MotionPhase::Dragging
    }
}

/// Owns the current index and phase, and turns moves into render requests.
#[derive(Debug, Clone, Default)]
pub struct PositionController {
    current_original: usize,
    current_dom: usize,
    phase: MotionPhase,
    /// Last offset handed to the host.
    offset_px: f32,
    tween: Option<TrackTween>,
}

impl PositionController {
    /// Idle at slide 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current navigation snapshot.
    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_original_index: self.current_original,
            current_dom_index: self.current_dom,
            phase: self.phase,
        }
    }

    /// Logical index of the current slide.
    pub fn current_original(&self) -> usize {
        self.current_original
    }

    /// Padded index the track is aimed at.
    pub fn current_dom(&self) -> usize {
        self.current_dom
    }

    /// Current motion phase.
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Offset of the last request handed to the host.
    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    /// Aim at `original_index` in a home region starting at `home_start`,
    /// dropping any motion in progress.
    pub fn reset(&mut self, original_index: usize, home_start: usize) {
        self.current_original = original_index;
        self.current_dom = home_start + original_index;
        self.phase = MotionPhase::Idle;
        self.tween = None;
    }

    /// Record the logical slide a navigation is heading for. The value is
    /// what `go_to` falls back on when the padded target is out of range.
    pub fn set_original(&mut self, original_index: usize) {
        self.current_original = original_index;
    }

    /// Best estimate of where the track is right now.
    pub fn live_offset(&self, now: Instant) -> f32 {
        match (&self.tween, self.phase) {
            (Some(tween), MotionPhase::Transitioning) => tween.sample(now),
            _ => self.offset_px,
        }
    }

    /// Move the track so `dom_index` is in place.
    ///
    /// Out-of-range targets fall back to the home slot of the current
    /// logical index. Interrupting a transition with another animated move
    /// first pins the track at `frozen` (or the tween estimate). Immediate
    /// moves re-home before returning.
    pub fn go_to(
        &mut self,
        geo: &TrackGeometry,
        dom_index: isize,
        transition: Option<TransitionSpec>,
        now: Instant,
        frozen: Option<f32>,
    ) -> Vec<RenderRequest> {
        let mut requests = Vec::with_capacity(2);

        let dom = usize::try_from(dom_index)
            .ok()
            .filter(|d| geo.contains(*d))
            .unwrap_or_else(|| {
                let fallback = geo.home_index(self.current_original.min(geo.slide_count() - 1));
                tracing::debug!(
                    requested = dom_index,
                    fallback,
                    "dom index outside padded sequence"
                );
                fallback
            });

        if self.phase == MotionPhase::Transitioning && transition.is_some() {
            let pinned = frozen.unwrap_or_else(|| self.live_offset(now));
            self.tween = None;
            self.offset_px = pinned;
            requests.push(RenderRequest::immediate(self.current_dom, pinned));
        }

        let Some(target) = geo.target_offset(dom) else {
            return requests;
        };
        let from = self.offset_px;
        self.current_dom = dom;
        self.current_original = geo.original_for(dom);
        self.offset_px = target;

        match transition {
            Some(spec) => {
                self.phase = MotionPhase::Transitioning;
                self.tween = Some(TrackTween::start(from, target, now, spec));
                requests.push(RenderRequest {
                    dom_index: dom,
                    offset_px: target,
                    transition: Some(spec),
                });
            }
            None => {
                self.phase = MotionPhase::Idle;
                self.tween = None;
                requests.push(RenderRequest::immediate(dom, target));
                requests.extend(self.rehome(geo));
            }
        }
        requests
    }

    /// Transition-end handling. Returns `None` when nothing was in flight.
    pub fn finish_transition(&mut self, geo: &TrackGeometry) -> Option<Vec<RenderRequest>> {
        if self.phase != MotionPhase::Transitioning {
            return None;
        }
        self.phase = MotionPhase::Idle;
        self.tween = None;
        Some(self.rehome(geo).into_iter().collect())
    }

    /// Jump silently from a clone region to the equivalent home position.
    pub fn rehome(&mut self, geo: &TrackGeometry) -> Option<RenderRequest> {
        if geo.is_home(self.current_dom) {
            self.current_original = self.current_dom - geo.home_start();
            return None;
        }
        let home = geo.home_equivalent(self.current_dom);
        let target = geo.target_offset(home)?;
        tracing::debug!(from = self.current_dom, to = home, "loop jump");
        self.current_dom = home;
        self.current_original = geo.original_for(home);
        self.offset_px = target;
        Some(RenderRequest::immediate(home, target))
    }

    /// Enter the dragging phase. Returns the offset the drag starts from and
    /// a request pinning an interrupted transition, if there was one.
    pub fn begin_drag(&mut self, now: Instant, frozen: Option<f32>) -> (f32, Option<RenderRequest>) {
        let pin = if self.phase == MotionPhase::Transitioning {
            let pinned = frozen.unwrap_or_else(|| self.live_offset(now));
            self.offset_px = pinned;
            Some(RenderRequest::immediate(self.current_dom, pinned))
        } else {
            None
        };
        self.tween = None;
        self.phase = MotionPhase::Dragging;
        (self.offset_px, pin)
    }

    /// Follow the pointer 1:1 while dragging.
    pub fn drag_to(&mut self, offset_px: f32) -> Option<RenderRequest> {
        if self.phase != MotionPhase::Dragging {
            return None;
        }
        self.offset_px = offset_px;
        Some(RenderRequest::immediate(self.current_dom, offset_px))
    }

    /// Leave the dragging phase without moving; the caller issues the
    /// commit or snap-back move next.
    pub fn end_drag(&mut self) {
        if self.phase == MotionPhase::Dragging {
            self.phase = MotionPhase::Idle;
        }
    }
}

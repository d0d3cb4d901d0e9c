//! `Carousel`: the engine wiring registry, geometry, position, gesture and
//! autoplay components to a [`CarouselHost`].
//!
//! Every entry point is a short synchronous step driven by a host event.
//! Navigation that cannot run (no slides, not measured, out-of-range index)
//! is a logged no-op; nothing here panics or surfaces errors to the page.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::animator::TransitionSpec;
use crate::autoplay::AutoplayScheduler;
use crate::config::{CarouselConfig, ConfigWarning};
use crate::constants::autoplay as autoplay_defaults;
use crate::error::{CarouselError, Result};
use crate::geometry::TrackGeometry;
use crate::gesture::{GestureOutcome, GestureRelease, GestureThresholds, GestureTracker, PointerId};
use crate::host::{AutoplayToken, CarouselHost, ChangeSource, RenderRequest, SlideRef};
use crate::position::{CarouselState, MotionPhase, PositionController};
use crate::registry::SlideRegistry;

/// Keyboard navigation intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Step back one slide.
    Previous,
    /// Step forward one slide.
    Next,
    /// Jump to slide 0.
    First,
    /// Jump to the last slide.
    Last,
}

/// One paging indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerDot {
    /// Logical slide the dot selects.
    pub index: usize,
    /// Whether that slide is the current one.
    pub active: bool,
}

/// Infinite-loop carousel over slides `S`, rendering through host `H`.
#[derive(Debug)]
pub struct Carousel<S, H: CarouselHost> {
    config: CarouselConfig,
    registry: SlideRegistry<S>,
    geometry: Option<TrackGeometry>,
    position: PositionController,
    gesture: GestureTracker,
    autoplay: AutoplayScheduler,
    measure_pending: bool,
    host: H,
}

fn ready_geometry<'a, S>(
    registry: &SlideRegistry<S>,
    geometry: &'a Option<TrackGeometry>,
) -> Result<&'a TrackGeometry> {
    if registry.is_empty() {
        return Err(CarouselError::Empty);
    }
    geometry.as_ref().ok_or(CarouselError::NotMeasured)
}

fn usable(width: Option<f32>) -> Option<f32> {
    width.filter(|w| w.is_finite() && *w > 0.0)
}

impl<S, H: CarouselHost> Carousel<S, H> {
    /// Build an empty carousel; out-of-range config values are clamped.
    pub fn new(config: CarouselConfig, host: H) -> Self {
        let (config, _) = config.sanitized();
        let mut autoplay = AutoplayScheduler::new(config.autoplay_interval);
        if config.autoplay_enabled {
            autoplay.enable(config.autoplay_interval);
        }
        Self {
            registry: SlideRegistry::new(config.leading_clone_sets, config.trailing_clone_sets),
            config,
            geometry: None,
            position: PositionController::new(),
            gesture: GestureTracker::new(),
            autoplay,
            measure_pending: false,
            host,
        }
    }

    // ---- accessors -------------------------------------------------------

    /// Current navigation snapshot.
    pub fn state(&self) -> CarouselState {
        self.position.state()
    }

    /// Logical index of the slide showing.
    pub fn current_index(&self) -> usize {
        self.position.current_original()
    }

    /// Number of logical slides.
    pub fn slide_count(&self) -> usize {
        self.registry.len()
    }

    /// Effective (clamped) configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Slides and their padded sequence.
    pub fn registry(&self) -> &SlideRegistry<S> {
        &self.registry
    }

    /// Last measured layout, if any.
    pub fn geometry(&self) -> Option<&TrackGeometry> {
        self.geometry.as_ref()
    }

    /// Slides are present and measured.
    pub fn is_ready(&self) -> bool {
        ready_geometry(&self.registry, &self.geometry).is_ok()
    }

    /// Autoplay timer state.
    pub fn autoplay(&self) -> &AutoplayScheduler {
        &self.autoplay
    }

    /// The host this carousel renders through.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Tear down the carousel, returning its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// One dot per logical slide, the current one active.
    pub fn pager(&self) -> Vec<PagerDot> {
        let current = self.position.current_original();
        (0..self.registry.len())
            .map(|index| PagerDot {
                index,
                active: index == current,
            })
            .collect()
    }

    // ---- slide set & layout ----------------------------------------------

    /// Replace the slide set and reset to the first slide.
    pub fn set_slides(&mut self, slides: Vec<S>) {
        self.stop_autoplay();
        self.gesture.abort();
        self.registry.set_slides(slides);
        self.position
            .reset(0, self.registry.offset_to_first_actual());
        info!(
            slides = self.registry.len(),
            padded = self.registry.padded_len(),
            home_start = self.registry.offset_to_first_actual(),
            "slide set replaced"
        );

        if self.registry.is_empty() {
            self.geometry = None;
            return;
        }
        if self.measure() {
            self.render_current();
        }
        self.host.current_slide_changed(0, ChangeSource::Reset);
        self.resume_autoplay();
    }

    /// Host or slide dimensions changed: re-measure and re-place the track.
    pub fn on_resize(&mut self) {
        self.measure_pending = false;
        if !self.measure() {
            return;
        }
        if self.position.phase() == MotionPhase::Dragging {
            // The release move will use the new table.
            return;
        }
        self.render_current();
    }

    /// Coalesce resize notifications to animation-frame granularity.
    /// Returns `true` when the host should request a frame.
    pub fn request_measure(&mut self) -> bool {
        !std::mem::replace(&mut self.measure_pending, true)
    }

    /// Run a measurement queued by [`Self::request_measure`].
    pub fn on_animation_frame(&mut self) {
        if self.measure_pending {
            self.on_resize();
        }
    }

    /// Apply new options at runtime. Returns the clamps that were needed.
    pub fn set_config(&mut self, config: CarouselConfig) -> Vec<ConfigWarning> {
        let (config, warnings) = config.sanitized();
        let autoplay_toggled = config.autoplay_enabled != self.config.autoplay_enabled;

        if self
            .registry
            .set_clone_sets(config.leading_clone_sets, config.trailing_clone_sets)
        {
            let original = self.position.current_original();
            self.gesture.abort();
            self.position
                .reset(original, self.registry.offset_to_first_actual());
            debug!(
                leading = config.leading_clone_sets,
                trailing = config.trailing_clone_sets,
                "clone depth changed"
            );
        }
        self.autoplay.set_interval(config.autoplay_interval);
        let interval = config.autoplay_interval;
        let autoplay_enabled = config.autoplay_enabled;
        self.config = config;

        if autoplay_toggled {
            if autoplay_enabled {
                self.enable_autoplay(Some(interval));
            } else {
                self.disable_autoplay();
            }
        }
        self.on_resize();
        warnings
    }

    fn measure(&mut self) -> bool {
        self.geometry = None;
        if self.registry.is_empty() {
            return false;
        }
        let Some(viewport) = usable(self.host.measure_viewport_width()) else {
            debug!("viewport not laid out yet");
            return false;
        };
        let widths: Option<Vec<f32>> = self
            .registry
            .padded()
            .iter()
            .enumerate()
            .map(|(dom_index, entry)| {
                usable(self.host.measure_slide_width(SlideRef {
                    dom_index,
                    original_index: entry.original_index,
                    clone: entry.clone,
                }))
            })
            .collect();
        let Some(widths) = widths else {
            debug!("slide widths not laid out yet");
            return false;
        };

        self.geometry = TrackGeometry::new(
            &self.registry,
            widths,
            self.config.gap_px,
            self.config.layout_mode(),
            viewport,
        );
        self.geometry.is_some()
    }

    fn render_current(&mut self) {
        let dom = self.position.current_dom() as isize;
        if let Err(err) = self.move_to(dom, false) {
            debug!(%err, "cannot place track");
        }
    }

    // ---- navigation --------------------------------------------------------

    /// Move one slide forward, looping past the end.
    pub fn next_slide(&mut self) {
        self.navigate(1, ChangeSource::User);
    }

    /// Move one slide back, looping past the start.
    pub fn prev_slide(&mut self) {
        self.navigate(-1, ChangeSource::User);
    }

    /// Jump to `index`; invalid requests are logged and ignored.
    pub fn go_to_slide(&mut self, index: usize) {
        if let Err(err) = self.try_go_to_slide(index) {
            debug!(%err, index, "go_to_slide ignored");
        }
    }

    /// Like [`Self::go_to_slide`] but reports why nothing moved.
    pub fn try_go_to_slide(&mut self, index: usize) -> Result<()> {
        self.go_to_slide_from(index, ChangeSource::User)
    }

    /// Handle a navigation key.
    pub fn key(&mut self, key: NavKey) {
        let result = match key {
            NavKey::Previous => self.step(-1, ChangeSource::Keyboard),
            NavKey::Next => self.step(1, ChangeSource::Keyboard),
            NavKey::First => self.go_to_slide_from(0, ChangeSource::Keyboard),
            NavKey::Last => {
                let last = self.registry.len().saturating_sub(1);
                self.go_to_slide_from(last, ChangeSource::Keyboard)
            }
        };
        if let Err(err) = result {
            debug!(%err, ?key, "key ignored");
        }
    }

    fn navigate(&mut self, delta: isize, source: ChangeSource) {
        if let Err(err) = self.step(delta, source) {
            debug!(%err, delta, ?source, "navigation ignored");
        }
    }

    /// Advance (`delta > 0`) or retreat by `delta` slides, wrapping.
    fn step(&mut self, delta: isize, source: ChangeSource) -> Result<()> {
        ready_geometry(&self.registry, &self.geometry)?;
        if source != ChangeSource::Autoplay {
            self.stop_autoplay();
        }
        self.abort_drag();

        let before = self.position.current_original();
        let n = self.registry.len() as isize;
        let target = (before as isize + delta).rem_euclid(n) as usize;
        self.position.set_original(target);

        let dom = self.position.current_dom() as isize + delta;
        self.move_to(dom, true)?;
        self.notify_if_changed(before, source);
        Ok(())
    }

    fn go_to_slide_from(&mut self, index: usize, source: ChangeSource) -> Result<()> {
        let home = {
            let geo = ready_geometry(&self.registry, &self.geometry)?;
            if index >= geo.slide_count() {
                return Err(CarouselError::IndexOutOfRange {
                    index,
                    len: geo.slide_count(),
                });
            }
            geo.home_index(index)
        };
        let before = self.position.current_original();
        if index == before && self.position.phase() == MotionPhase::Idle {
            return Ok(());
        }

        self.stop_autoplay();
        self.abort_drag();
        self.position.set_original(index);
        self.move_to(home as isize, true)?;
        self.notify_if_changed(before, source);
        Ok(())
    }

    /// Aim the track at `dom`, animated per config or immediately.
    fn move_to(&mut self, dom: isize, animate: bool) -> Result<()> {
        let now = self.host.now();
        let frozen = if self.position.phase() == MotionPhase::Transitioning {
            self.host.computed_offset()
        } else {
            None
        };
        let transition = if animate {
            TransitionSpec::animated(self.config.transition_duration, self.config.easing)
        } else {
            None
        };

        let requests = {
            let geo = ready_geometry(&self.registry, &self.geometry)?;
            self.position.go_to(geo, dom, transition, now, frozen)
        };
        self.apply(requests);

        if self.position.phase() == MotionPhase::Idle {
            self.schedule_autoplay();
        }
        Ok(())
    }

    /// Host signal that the last animated transform finished.
    pub fn on_transition_end(&mut self) {
        let Some(geo) = self.geometry.as_ref() else {
            return;
        };
        let Some(requests) = self.position.finish_transition(geo) else {
            trace!("transition end without a transition in flight");
            return;
        };
        self.apply(requests);
        self.schedule_autoplay();
    }

    fn apply(&mut self, requests: Vec<RenderRequest>) {
        for request in requests {
            trace!(
                dom_index = request.dom_index,
                offset_px = request.offset_px,
                animated = request.is_animated(),
                "render"
            );
            self.host.apply_transform(request);
        }
    }

    fn notify_if_changed(&mut self, before: usize, source: ChangeSource) {
        let after = self.position.current_original();
        if after != before {
            debug!(from = before, to = after, ?source, "slide changed");
            self.host.current_slide_changed(after, source);
        }
    }

    // ---- gestures ----------------------------------------------------------

    /// Start a drag with `pointer` at `x`.
    pub fn pointer_down(&mut self, pointer: PointerId, x: f32) {
        if let Err(err) = self.try_pointer_down(pointer, x) {
            debug!(%err, ?pointer, "drag not started");
        }
    }

    fn try_pointer_down(&mut self, pointer: PointerId, x: f32) -> Result<()> {
        if !self.config.drag_enabled {
            return Err(CarouselError::DragDisabled);
        }
        ready_geometry(&self.registry, &self.geometry)?;
        if let Some(owner) = self.gesture.pointer() {
            if owner != pointer {
                debug!(?owner, second = ?pointer, "second pointer aborts drag");
                self.cancel_gesture();
            }
            return Err(CarouselError::AlreadyDragging);
        }

        let now = self.host.now();
        let frozen = if self.position.phase() == MotionPhase::Transitioning {
            self.host.computed_offset()
        } else {
            None
        };
        self.stop_autoplay();
        let (start_offset, pin) = self.position.begin_drag(now, frozen);
        if let Some(pin) = pin {
            self.apply(vec![pin]);
        }
        self.gesture.start(pointer, x, now, start_offset)?;
        trace!(?pointer, x, start_offset, "drag started");
        Ok(())
    }

    /// Drag the track with the owning pointer.
    pub fn pointer_move(&mut self, pointer: PointerId, x: f32) {
        match self.gesture.track(pointer, x) {
            Ok(offset) => {
                if let Some(request) = self.position.drag_to(offset) {
                    self.apply(vec![request]);
                }
            }
            Err(err) => trace!(%err, ?pointer, "pointer move ignored"),
        }
    }

    /// Release the drag, committing a slide change or snapping back.
    pub fn pointer_up(&mut self, pointer: PointerId, x: f32) {
        if !self.gesture.is_dragging() {
            return;
        }
        let now = self.host.now();
        let thresholds = GestureThresholds::from(&self.config);
        let result = self
            .gesture
            .finish(pointer, x, now, &thresholds)
            .and_then(|release| self.commit_gesture(release));
        if let Err(err) = result {
            warn!(%err, ?pointer, "gesture failed; snapping back");
            self.gesture.abort();
            self.position.end_drag();
            self.snap_back();
        }
        self.resume_autoplay();
    }

    /// Pointer lost (touchcancel, capture lost): snap back.
    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        if self.gesture.pointer() == Some(pointer) {
            self.cancel_gesture();
        }
    }

    fn commit_gesture(&mut self, release: GestureRelease) -> Result<()> {
        self.position.end_drag();
        debug!(
            distance = release.distance,
            velocity = release.velocity,
            outcome = ?release.outcome,
            "drag released"
        );
        match release.outcome {
            GestureOutcome::Next if self.registry.loops() => {
                self.step(1, ChangeSource::Gesture)
            }
            GestureOutcome::Previous if self.registry.loops() => {
                self.step(-1, ChangeSource::Gesture)
            }
            _ => {
                let dom = self.position.current_dom() as isize;
                self.move_to(dom, true)
            }
        }
    }

    fn cancel_gesture(&mut self) {
        self.gesture.abort();
        self.position.end_drag();
        self.snap_back();
        self.resume_autoplay();
    }

    fn snap_back(&mut self) {
        let dom = self.position.current_dom() as isize;
        if let Err(err) = self.move_to(dom, true) {
            warn!(%err, "snap back failed");
        }
    }

    fn abort_drag(&mut self) {
        if self.gesture.abort() {
            self.position.end_drag();
        }
    }

    // ---- autoplay ----------------------------------------------------------

    /// Turn autoplay on. `None` keeps the configured interval.
    pub fn enable_autoplay(&mut self, interval: Option<Duration>) {
        let min = Duration::from_millis(autoplay_defaults::MIN_INTERVAL_MS);
        let interval = match interval {
            Some(interval) if interval < min => {
                warn!(?interval, fallback = ?self.config.autoplay_interval, "autoplay interval too short");
                self.config.autoplay_interval
            }
            Some(interval) => interval,
            None => self.config.autoplay_interval,
        };
        self.config.autoplay_enabled = true;
        self.config.autoplay_interval = interval;
        if let Some(_stale) = self.autoplay.stop() {
            self.host.cancel_autoplay();
        }
        self.autoplay.enable(interval);
        info!(?interval, "autoplay enabled");
        self.schedule_autoplay();
    }

    /// Stop autoplay and cancel any pending timer.
    pub fn disable_autoplay(&mut self) {
        self.config.autoplay_enabled = false;
        if self.autoplay.disable().is_some() {
            self.host.cancel_autoplay();
        }
        info!("autoplay disabled");
    }

    /// Hold autoplay (hover, hidden page) without disabling it.
    pub fn set_paused(&mut self, paused: bool) {
        if self.autoplay.set_paused(paused).is_some() {
            self.host.cancel_autoplay();
        }
        if !paused {
            self.schedule_autoplay();
        }
    }

    /// Host callback for a timer requested through `schedule_autoplay`.
    pub fn on_autoplay_timer(&mut self, token: AutoplayToken) {
        if !self.autoplay.fire(token) {
            trace!(token = token.raw(), "stale autoplay timer");
            return;
        }
        if self.position.phase() == MotionPhase::Dragging {
            return;
        }
        self.navigate(1, ChangeSource::Autoplay);
    }

    fn stop_autoplay(&mut self) {
        if self.autoplay.stop().is_some() {
            self.host.cancel_autoplay();
        }
    }

    fn resume_autoplay(&mut self) {
        if self.autoplay.resume() && self.registry.loops() {
            self.schedule_autoplay();
        }
    }

    fn schedule_autoplay(&mut self) {
        if self.autoplay.pending().is_some() {
            return;
        }
        let can_advance = self.registry.loops()
            && self.geometry.is_some()
            && self.position.phase() == MotionPhase::Idle;
        if let Some((delay, token)) = self.autoplay.schedule(can_advance) {
            trace!(?delay, token = token.raw(), "autoplay scheduled");
            self.host.schedule_autoplay(delay, token);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::host::MockCarouselHost;

    #[test]
    fn empty_slide_set_never_touches_the_track() {
        let mut host = MockCarouselHost::new();
        host.expect_apply_transform().never();
        host.expect_current_slide_changed().never();
        host.expect_schedule_autoplay().never();

        let mut carousel: Carousel<u32, _> = Carousel::new(CarouselConfig::default(), host);
        carousel.set_slides(Vec::new());
        carousel.next_slide();
        carousel.prev_slide();
        carousel.go_to_slide(0);
        carousel.key(NavKey::Last);
        carousel.pointer_down(PointerId::MOUSE, 10.0);
        carousel.pointer_move(PointerId::MOUSE, 90.0);
        carousel.pointer_up(PointerId::MOUSE, 90.0);
        carousel.on_transition_end();
        carousel.on_resize();

        assert_eq!(carousel.state().current_original_index, 0);
        assert!(!carousel.is_ready());
    }

    #[test]
    fn single_slide_stays_put_but_bounces() {
        let mut host = MockCarouselHost::new();
        let t0 = Instant::now();
        host.expect_now().returning(move || t0);
        host.expect_measure_viewport_width().returning(|| Some(320.0));
        host.expect_measure_slide_width().returning(|_| Some(320.0));
        host.expect_computed_offset().returning(|| None);
        host.expect_current_slide_changed()
            .withf(|index, source| *index == 0 && *source == ChangeSource::Reset)
            .times(1)
            .return_const(());
        // initial placement + bounce
        host.expect_apply_transform()
            .withf(|request| request.dom_index == 0 && request.offset_px == 0.0)
            .times(2)
            .return_const(());

        let mut carousel = Carousel::new(CarouselConfig::default(), host);
        carousel.set_slides(vec!["only"]);
        carousel.next_slide();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.registry().padded_len(), 1);
    }

    #[test]
    fn unmeasured_slides_make_navigation_a_no_op() {
        let mut host = MockCarouselHost::new();
        host.expect_measure_viewport_width().returning(|| Some(320.0));
        host.expect_measure_slide_width().returning(|_| Some(0.0));
        host.expect_current_slide_changed().return_const(());
        host.expect_apply_transform().never();

        let mut carousel = Carousel::new(CarouselConfig::default(), host);
        carousel.set_slides(vec![1, 2, 3]);
        assert_eq!(
            carousel.try_go_to_slide(2),
            Err(CarouselError::NotMeasured)
        );
        carousel.next_slide();
        assert_eq!(carousel.current_index(), 0);
    }
}

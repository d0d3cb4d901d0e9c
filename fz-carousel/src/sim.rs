//! Deterministic in-memory host
//!
//! [`SimulatedHost`] records everything the engine asks of it and runs on a
//! manually advanced clock. [`Carousel::advance`] moves that clock forward and
//! delivers transition-end and autoplay callbacks as they fall due, so whole
//! sessions can be replayed without a browser.

use std::time::{Duration, Instant};

use crate::engine::Carousel;
use crate::host::{AutoplayToken, CarouselHost, ChangeSource, RenderRequest, SlideRef};

/// Per-slide widths reported to the engine. Clones measure like their
/// original.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideWidths {
    /// Every slide has this width.
    Uniform(f32),
    /// Width per logical slide; missing entries are unmeasured.
    PerSlide(Vec<f32>),
}

impl SlideWidths {
    fn width_of(&self, original_index: usize) -> Option<f32> {
        match self {
            Self::Uniform(width) => Some(*width),
            Self::PerSlide(widths) => widths.get(original_index).copied(),
        }
    }
}

/// The autoplay timer currently armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    /// Token the timer will fire with.
    pub token: AutoplayToken,
    /// Simulated instant the timer fires at.
    pub due: Instant,
}

/// One host interaction, as recorded in [`SimulatedHost::events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// A transform was applied.
    Render(RenderRequest),
    /// The current slide changed.
    SlideChanged {
        /// New logical index.
        index: usize,
        /// What caused the change.
        source: ChangeSource,
    },
    /// An autoplay timer was armed.
    TimerScheduled {
        /// Delay the timer was armed with.
        delay: Duration,
        /// Token it will fire with.
        token: AutoplayToken,
    },
    /// The autoplay timer was cancelled.
    TimerCancelled,
}

/// A [`HostEvent`] and when it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    /// Simulated time since the host was created.
    pub at: Duration,
    /// What happened.
    pub event: HostEvent,
}

/// In-memory [`CarouselHost`] with a manual clock.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    origin: Instant,
    elapsed: Duration,
    viewport_width: Option<f32>,
    slide_widths: SlideWidths,
    computed_offset: Option<f32>,
    transition_due: Option<Instant>,
    timer: Option<ScheduledTimer>,
    /// Every transform applied, in order.
    pub renders: Vec<RenderRequest>,
    /// Every slide-change notification, in order.
    pub changes: Vec<(usize, ChangeSource)>,
    /// Every timer request, in order.
    pub scheduled: Vec<(Duration, AutoplayToken)>,
    /// Number of timer cancellations.
    pub cancellations: usize,
    /// All of the above interleaved, with timestamps.
    pub events: Vec<TimedEvent>,
}

impl SimulatedHost {
    /// A measured host with the given layout.
    pub fn new(viewport_width: f32, slide_widths: SlideWidths) -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            viewport_width: Some(viewport_width),
            slide_widths,
            computed_offset: None,
            transition_due: None,
            timer: None,
            renders: Vec::new(),
            changes: Vec::new(),
            scheduled: Vec::new(),
            cancellations: 0,
            events: Vec::new(),
        }
    }

    /// A host with nothing laid out yet; the engine stays unmeasured until
    /// a viewport and slide widths are set.
    pub fn unmeasured() -> Self {
        let mut host = Self::new(0.0, SlideWidths::PerSlide(Vec::new()));
        host.viewport_width = None;
        host
    }

    /// Every slide `width` wide in a viewport of the same width.
    pub fn uniform(width: f32) -> Self {
        Self::new(width, SlideWidths::Uniform(width))
    }

    /// Time since the host was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock without firing anything.
    pub fn advance_clock(&mut self, by: Duration) {
        self.elapsed += by;
    }

    fn set_now(&mut self, at: Instant) {
        self.elapsed = at.saturating_duration_since(self.origin);
    }

    /// `None` reports the viewport as unmeasured.
    pub fn set_viewport_width(&mut self, width: Option<f32>) {
        self.viewport_width = width;
    }

    /// Change what slide measurements report.
    pub fn set_slide_widths(&mut self, widths: SlideWidths) {
        self.slide_widths = widths;
    }

    /// Make `computed_offset` report a fixed value (as `getComputedStyle`
    /// would mid-transition).
    pub fn set_computed_offset(&mut self, offset: Option<f32>) {
        self.computed_offset = offset;
    }

    /// Most recent transform applied.
    pub fn last_render(&self) -> Option<&RenderRequest> {
        self.renders.last()
    }

    /// The armed autoplay timer, if any.
    pub fn pending_timer(&self) -> Option<ScheduledTimer> {
        self.timer
    }

    /// An animated transform has not reached its end yet.
    pub fn transition_in_flight(&self) -> bool {
        self.transition_due.is_some()
    }

    /// Clear the recorded history, keeping clock and layout.
    pub fn clear_log(&mut self) {
        self.renders.clear();
        self.changes.clear();
        self.scheduled.clear();
        self.cancellations = 0;
        self.events.clear();
    }

    fn record(&mut self, event: HostEvent) {
        self.events.push(TimedEvent {
            at: self.elapsed,
            event,
        });
    }
}

impl CarouselHost for SimulatedHost {
    fn measure_slide_width(&self, slide: SlideRef) -> Option<f32> {
        self.slide_widths.width_of(slide.original_index)
    }

    fn measure_viewport_width(&self) -> Option<f32> {
        self.viewport_width
    }

    fn apply_transform(&mut self, request: RenderRequest) {
        // A new transform replaces whatever transition was running.
        self.transition_due = request
            .transition
            .map(|spec| self.now() + spec.duration);
        self.renders.push(request);
        self.record(HostEvent::Render(request));
    }

    fn computed_offset(&self) -> Option<f32> {
        self.computed_offset
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn schedule_autoplay(&mut self, delay: Duration, token: AutoplayToken) {
        self.timer = Some(ScheduledTimer {
            token,
            due: self.now() + delay,
        });
        self.scheduled.push((delay, token));
        self.record(HostEvent::TimerScheduled { delay, token });
    }

    fn cancel_autoplay(&mut self) {
        self.timer = None;
        self.cancellations += 1;
        self.record(HostEvent::TimerCancelled);
    }

    fn current_slide_changed(&mut self, original_index: usize, source: ChangeSource) {
        self.changes.push((original_index, source));
        self.record(HostEvent::SlideChanged {
            index: original_index,
            source,
        });
    }
}

impl<S> Carousel<S, SimulatedHost> {
    /// Advance simulated time by `by`, firing transition ends and autoplay
    /// timers in the order they fall due.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.host().now() + by;
        loop {
            let host = self.host();
            let transition = host.transition_due.filter(|due| *due <= deadline);
            let timer = host.timer.filter(|timer| timer.due <= deadline);

            if let Some(due) = transition
                && timer.is_none_or(|t| due <= t.due)
            {
                let host = self.host_mut();
                host.set_now(due);
                host.transition_due = None;
                self.on_transition_end();
            } else if let Some(timer) = timer {
                let host = self.host_mut();
                host.set_now(timer.due);
                host.timer = None;
                self.on_autoplay_timer(timer.token);
            } else {
                break;
            }
        }
        self.host_mut().set_now(deadline);
    }

    /// Deliver a pending transition end right away, if there is one.
    pub fn finish_transition(&mut self) {
        let host = self.host_mut();
        if let Some(due) = host.transition_due.take() {
            host.set_now(due.max(host.now()));
            self.on_transition_end();
        }
    }

    /// Fire the pending autoplay timer right away. Returns `false` when no
    /// timer was pending.
    pub fn fire_autoplay_timer(&mut self) -> bool {
        match self.host_mut().timer.take() {
            Some(timer) => {
                self.on_autoplay_timer(timer.token);
                true
            }
            None => false,
        }
    }
}

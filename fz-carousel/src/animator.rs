//! Time-based model of the track's in-flight transition
//!
//! Hosts animate the track themselves (CSS transition, GPU tween, ...). The
//! engine keeps this model of what it asked for so it can estimate the
//! current on-screen offset when a transition is interrupted and the host
//! cannot report the computed value.

use std::time::{Duration, Instant};

use crate::config::EasingKind;

/// How the host should animate a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: EasingKind,
}

impl TransitionSpec {
    pub fn new(duration: Duration, easing: EasingKind) -> Self {
        Self { duration, easing }
    }

    /// `None` for zero-length transitions, which apply immediately.
    pub fn animated(duration: Duration, easing: EasingKind) -> Option<Self> {
        (!duration.is_zero()).then_some(Self { duration, easing })
    }
}

#[derive(Debug, Clone)]
pub struct TrackTween {
    from: f32,
    to: f32,
    started_at: Instant,
    spec: TransitionSpec,
}

impl TrackTween {
    pub fn start(from: f32, to: f32, started_at: Instant, spec: TransitionSpec) -> Self {
        Self {
            from,
            to,
            started_at,
            spec,
        }
    }

    /// Estimated offset at `now`.
    pub fn sample(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.spec.duration {
            return self.to;
        }
        let t = (elapsed.as_secs_f32() / self.spec.duration.as_secs_f32()).clamp(0.0, 1.0);
        let eased = self.spec.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }
}

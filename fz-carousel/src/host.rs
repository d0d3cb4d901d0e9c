//! Host collaborator contract
//!
//! The engine never touches a rendering technology directly. An embedding
//! (DOM adapter, native toolkit, test double) implements [`CarouselHost`]
//! and forwards its resize, transition-end, timer and pointer events to the
//! engine.

use std::time::{Duration, Instant};

use crate::animator::TransitionSpec;
use crate::registry::CloneTag;

/// Identifies one padded-sequence entry for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideRef {
    pub dom_index: usize,
    pub original_index: usize,
    pub clone: Option<CloneTag>,
}

/// A transform the host must paint on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Padded-sequence entry the offset brings into place.
    pub dom_index: usize,
    /// Horizontal translation of the track in pixels.
    pub offset_px: f32,
    /// `None` means apply immediately with transitions disabled.
    pub transition: Option<TransitionSpec>,
}

impl RenderRequest {
    pub fn immediate(dom_index: usize, offset_px: f32) -> Self {
        Self {
            dom_index,
            offset_px,
            transition: None,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.transition.is_some()
    }
}

/// What caused the current slide to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Programmatic or button navigation.
    User,
    /// A committed drag or flick.
    Gesture,
    Keyboard,
    Autoplay,
    /// The slide set was replaced.
    Reset,
}

impl ChangeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Gesture => "gesture",
            Self::Keyboard => "keyboard",
            Self::Autoplay => "autoplay",
            Self::Reset => "reset",
        }
    }
}

/// Opaque token identifying one scheduled autoplay timer. Timers fired with
/// a stale token are ignored, which stands in for cancellation on hosts that
/// cannot revoke a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AutoplayToken(pub(crate) u64);

impl AutoplayToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CarouselHost {
    /// Rendered width of one padded entry, `None` while not laid out.
    fn measure_slide_width(&self, slide: SlideRef) -> Option<f32>;

    /// Width of the visible track window, `None` while not laid out.
    fn measure_viewport_width(&self) -> Option<f32>;

    /// Paint the track at the requested offset.
    fn apply_transform(&mut self, request: RenderRequest);

    /// Current computed offset of the track if the host can read it back
    /// (e.g. `getComputedStyle`). Used to freeze interrupted transitions.
    fn computed_offset(&self) -> Option<f32> {
        None
    }

    /// Monotonic clock used for gesture velocity and tween sampling.
    fn now(&self) -> Instant;

    /// Call [`crate::Carousel::on_autoplay_timer`] with `token` after `delay`.
    fn schedule_autoplay(&mut self, delay: Duration, token: AutoplayToken);

    /// Best-effort cancellation of any pending autoplay timer.
    fn cancel_autoplay(&mut self);

    fn current_slide_changed(&mut self, original_index: usize, source: ChangeSource);
}

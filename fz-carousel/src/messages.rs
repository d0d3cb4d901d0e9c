use std::time::Duration;

use crate::engine::NavKey;
use crate::gesture::PointerId;
use crate::host::AutoplayToken;

/// Host events and commands understood by [`crate::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselMessage {
    Next,
    Previous,
    GoTo(usize),
    Key(NavKey),
    PointerDown { pointer: PointerId, x: f32 },
    PointerMove { pointer: PointerId, x: f32 },
    PointerUp { pointer: PointerId, x: f32 },
    PointerCancel(PointerId),
    TransitionEnd,
    AutoplayTimer(AutoplayToken),
    /// Size change observed; measure on the next animation frame.
    Resized,
    AnimationFrame,
    SetPaused(bool),
    EnableAutoplay(Option<Duration>),
    DisableAutoplay,
}

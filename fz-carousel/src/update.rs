use crate::engine::Carousel;
use crate::host::CarouselHost;
use crate::messages::CarouselMessage;

/// Route one host event to the engine.
///
/// Returns `true` when the host should schedule an animation frame and
/// answer with [`CarouselMessage::AnimationFrame`].
pub fn update<S, H: CarouselHost>(carousel: &mut Carousel<S, H>, msg: CarouselMessage) -> bool {
    match msg {
        CarouselMessage::Next => carousel.next_slide(),
        CarouselMessage::Previous => carousel.prev_slide(),
        CarouselMessage::GoTo(index) => carousel.go_to_slide(index),
        CarouselMessage::Key(key) => carousel.key(key),
        CarouselMessage::PointerDown { pointer, x } => carousel.pointer_down(pointer, x),
        CarouselMessage::PointerMove { pointer, x } => carousel.pointer_move(pointer, x),
        CarouselMessage::PointerUp { pointer, x } => carousel.pointer_up(pointer, x),
        CarouselMessage::PointerCancel(pointer) => carousel.pointer_cancel(pointer),
        CarouselMessage::TransitionEnd => carousel.on_transition_end(),
        CarouselMessage::AutoplayTimer(token) => carousel.on_autoplay_timer(token),
        CarouselMessage::Resized => return carousel.request_measure(),
        CarouselMessage::AnimationFrame => carousel.on_animation_frame(),
        CarouselMessage::SetPaused(paused) => carousel.set_paused(paused),
        CarouselMessage::EnableAutoplay(interval) => carousel.enable_autoplay(interval),
        CarouselMessage::DisableAutoplay => carousel.disable_autoplay(),
    }
    false
}

use std::time::Duration;

use fz_carousel::sim::SimulatedHost;
use fz_carousel::{Carousel, CarouselConfig, ChangeSource, MotionPhase, PointerId, RenderRequest};

const TOUCH: PointerId = PointerId(7);

fn carousel(config: CarouselConfig) -> Carousel<&'static str, SimulatedHost> {
    let mut carousel = Carousel::new(config, SimulatedHost::uniform(100.0));
    carousel.set_slides(vec!["a", "b", "c", "d", "e"]);
    carousel
}

fn drag(carousel: &mut Carousel<&'static str, SimulatedHost>, from: f32, to: f32, held: Duration) {
    carousel.pointer_down(PointerId::MOUSE, from);
    carousel.pointer_move(PointerId::MOUSE, to);
    carousel.host_mut().advance_clock(held);
    carousel.pointer_up(PointerId::MOUSE, to);
}

#[test]
fn track_follows_the_pointer() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(PointerId::MOUSE, 300.0);
    assert!(carousel.state().is_dragging());

    carousel.pointer_move(PointerId::MOUSE, 240.0);
    carousel.pointer_move(PointerId::MOUSE, 330.0);
    let renders = &carousel.host().renders;
    assert_eq!(
        renders[renders.len() - 2..],
        [
            RenderRequest::immediate(10, -1060.0),
            RenderRequest::immediate(10, -970.0)
        ]
    );
}

#[test]
fn long_drag_left_commits_to_next() {
    let mut carousel = carousel(CarouselConfig::default());
    drag(&mut carousel, 300.0, 240.0, Duration::from_millis(400));

    assert_eq!(carousel.current_index(), 1);
    let last = carousel.host().last_render().copied().expect("render");
    assert_eq!(last.dom_index, 11);
    assert_eq!(last.offset_px, -1100.0);
    assert!(last.is_animated());
    assert_eq!(carousel.host().changes.last(), Some(&(1, ChangeSource::Gesture)));
}

#[test]
fn long_drag_right_commits_to_previous() {
    let mut carousel = carousel(CarouselConfig::default());
    drag(&mut carousel, 100.0, 180.0, Duration::from_millis(400));
    assert_eq!(carousel.current_index(), 4);
    assert_eq!(carousel.state().current_dom_index, 9);
    carousel.finish_transition();
    assert_eq!(carousel.state().current_dom_index, 14);
}

#[test]
fn short_slow_drag_snaps_back() {
    let mut carousel = carousel(CarouselConfig::default());
    drag(&mut carousel, 300.0, 320.0, Duration::from_millis(200));

    assert_eq!(carousel.current_index(), 0);
    let last = carousel.host().last_render().copied().expect("render");
    assert_eq!(last.dom_index, 10);
    assert_eq!(last.offset_px, -1000.0);
    assert!(last.is_animated());
    assert_eq!(carousel.host().changes, vec![(0, ChangeSource::Reset)]);
}

#[test]
fn short_fast_flick_commits() {
    let mut carousel = carousel(CarouselConfig::default());
    drag(&mut carousel, 300.0, 285.0, Duration::from_millis(50));
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn tiny_fast_flick_snaps_back() {
    let mut carousel = carousel(CarouselConfig::default());
    drag(&mut carousel, 300.0, 295.0, Duration::from_millis(5));
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn thresholds_come_from_config() {
    let mut config = CarouselConfig::default();
    config.drag_threshold_px = 20.0;
    let mut carousel = carousel(config);
    drag(&mut carousel, 300.0, 270.0, Duration::from_secs(2));
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn drag_during_transition_starts_from_live_position() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.next_slide();
    carousel.host_mut().advance_clock(Duration::from_millis(150));

    carousel.pointer_down(PointerId::MOUSE, 200.0);
    let pin = carousel.host().last_render().copied().expect("pin");
    assert_eq!(pin.dom_index, 11);
    assert!(!pin.is_animated());
    // ease-out at half time covers three quarters of the way
    assert!((pin.offset_px + 1075.0).abs() < 0.5, "pinned at {}", pin.offset_px);

    carousel.pointer_move(PointerId::MOUSE, 210.0);
    let moved = carousel.host().last_render().copied().expect("move");
    assert!((moved.offset_px - (pin.offset_px + 10.0)).abs() < 1e-3);
}

#[test]
fn drag_during_transition_prefers_host_offset() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.next_slide();
    carousel.host_mut().set_computed_offset(Some(-1030.0));
    carousel.pointer_down(PointerId::MOUSE, 200.0);
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(11, -1030.0))
    );
    assert!(!carousel.host().transition_in_flight());
}

#[test]
fn second_pointer_aborts_the_drag() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(PointerId::MOUSE, 300.0);
    carousel.pointer_move(PointerId::MOUSE, 250.0);
    carousel.pointer_down(TOUCH, 100.0);

    let last = carousel.host().last_render().copied().expect("snap back");
    assert_eq!(last.dom_index, 10);
    assert_eq!(last.offset_px, -1000.0);
    assert!(last.is_animated());
    assert!(!carousel.state().is_dragging());

    let renders = carousel.host().renders.len();
    carousel.pointer_move(PointerId::MOUSE, 100.0);
    carousel.pointer_up(PointerId::MOUSE, 100.0);
    assert_eq!(carousel.host().renders.len(), renders);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn release_from_another_pointer_snaps_back() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(PointerId::MOUSE, 300.0);
    carousel.pointer_move(PointerId::MOUSE, 150.0);
    carousel.pointer_up(PointerId(9), 150.0);

    assert!(!carousel.state().is_dragging());
    assert_eq!(carousel.state().phase, MotionPhase::Transitioning);
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.state().current_dom_index, 10);

    let last = carousel.host().last_render().copied().expect("snap back");
    assert_eq!(last.dom_index, 10);
    assert_eq!(last.offset_px, -1000.0);
    assert!(last.is_animated());
    assert_eq!(carousel.host().changes, vec![(0, ChangeSource::Reset)]);

    // the real pointer's release no longer counts
    let renders = carousel.host().renders.len();
    carousel.pointer_up(PointerId::MOUSE, 150.0);
    assert_eq!(carousel.host().renders.len(), renders);
}

#[test]
fn foreign_pointer_moves_are_ignored() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(PointerId::MOUSE, 300.0);
    let renders = carousel.host().renders.len();
    carousel.pointer_move(TOUCH, 10.0);
    assert_eq!(carousel.host().renders.len(), renders);
    assert!(carousel.state().is_dragging());
}

#[test]
fn cancel_snaps_back() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(TOUCH, 300.0);
    carousel.pointer_move(TOUCH, 100.0);
    carousel.pointer_cancel(TOUCH);
    assert_eq!(carousel.state().phase, MotionPhase::Transitioning);
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.host().last_render().map(|r| r.offset_px), Some(-1000.0));
}

#[test]
fn programmatic_navigation_ends_a_drag() {
    let mut carousel = carousel(CarouselConfig::default());
    carousel.pointer_down(PointerId::MOUSE, 300.0);
    carousel.pointer_move(PointerId::MOUSE, 260.0);
    carousel.go_to_slide(3);
    assert_eq!(carousel.state().phase, MotionPhase::Transitioning);
    assert_eq!(carousel.state().current_dom_index, 13);

    let renders = carousel.host().renders.len();
    carousel.pointer_move(PointerId::MOUSE, 0.0);
    assert_eq!(carousel.host().renders.len(), renders);
}

#[test]
fn disabled_drag_never_moves_the_track() {
    let mut carousel = carousel(CarouselConfig::default().with_drag(false));
    drag(&mut carousel, 300.0, 100.0, Duration::from_millis(100));
    assert_eq!(carousel.host().renders.len(), 1);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn single_slide_drag_bounces_back() {
    let mut carousel = Carousel::new(CarouselConfig::default(), SimulatedHost::uniform(100.0));
    carousel.set_slides(vec!["only"]);
    drag(&mut carousel, 300.0, 150.0, Duration::from_millis(100));
    assert_eq!(carousel.current_index(), 0);
    let last = carousel.host().last_render().copied().expect("bounce");
    assert_eq!(last.dom_index, 0);
    assert_eq!(last.offset_px, 0.0);
    assert!(last.is_animated());
}

use fz_carousel::sim::{SimulatedHost, SlideWidths};
use fz_carousel::{Carousel, CarouselConfig, ChangeSource, RenderRequest};

#[test]
fn centered_mode_uses_measured_widths() {
    let config = CarouselConfig::default().with_centered(true).with_gap(10.0);
    let host = SimulatedHost::new(300.0, SlideWidths::PerSlide(vec![100.0, 200.0, 100.0]));
    let mut carousel = Carousel::new(config, host);
    carousel.set_slides(vec!["s", "wide", "s"]);

    // two leading sets of 100 + 200 + 100 plus three gaps each
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(6, 150.0 - (860.0 + 50.0)))
    );

    carousel.next_slide();
    let last = carousel.host().last_render().copied().expect("render");
    assert_eq!(last.dom_index, 7);
    assert_eq!(last.offset_px, 150.0 - (970.0 + 100.0));
}

#[test]
fn gap_is_part_of_every_step() {
    let config = CarouselConfig::default().with_gap(10.0);
    let mut carousel = Carousel::new(config, SimulatedHost::uniform(100.0));
    carousel.set_slides((0..5).collect::<Vec<u8>>());
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(10, -1100.0))
    );
    let table = carousel.geometry().expect("measured").table();
    assert_eq!(table.offset(11), Some(1210.0));
}

#[test]
fn resize_recomputes_and_replaces_immediately() {
    let config = CarouselConfig::default().with_centered(true);
    let host = SimulatedHost::new(300.0, SlideWidths::Uniform(100.0));
    let mut carousel = Carousel::new(config, host);
    carousel.set_slides(vec![1, 2, 3]);
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(6, 150.0 - 650.0))
    );

    carousel.host_mut().set_viewport_width(Some(500.0));
    carousel.host_mut().set_slide_widths(SlideWidths::Uniform(200.0));
    carousel.on_resize();
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(6, 250.0 - 1300.0))
    );
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn unmeasured_host_defers_placement() {
    let mut host = SimulatedHost::uniform(100.0);
    host.set_viewport_width(None);
    let mut carousel = Carousel::new(CarouselConfig::default(), host);
    carousel.set_slides(vec!['a', 'b', 'c', 'd', 'e']);
    assert!(!carousel.is_ready());
    assert!(carousel.host().renders.is_empty());
    assert_eq!(carousel.host().changes, vec![(0, ChangeSource::Reset)]);

    carousel.next_slide();
    assert!(carousel.host().renders.is_empty());

    carousel.host_mut().set_viewport_width(Some(100.0));
    carousel.on_resize();
    assert!(carousel.is_ready());
    assert_eq!(
        carousel.host().renders,
        vec![RenderRequest::immediate(10, -1000.0)]
    );
}

#[test]
fn resize_requests_coalesce_per_frame() {
    let mut carousel = Carousel::new(CarouselConfig::default(), SimulatedHost::uniform(100.0));
    carousel.set_slides(vec![1, 2, 3]);
    let renders = carousel.host().renders.len();

    assert!(carousel.request_measure());
    assert!(!carousel.request_measure());
    assert!(!carousel.request_measure());
    carousel.on_animation_frame();
    carousel.on_animation_frame();
    assert_eq!(carousel.host().renders.len(), renders + 1);
    assert!(carousel.request_measure());
}

#[test]
fn changing_clone_depth_keeps_the_current_slide() {
    let mut carousel = Carousel::new(CarouselConfig::default(), SimulatedHost::uniform(100.0));
    carousel.set_slides(vec!["a", "b", "c"]);
    carousel.go_to_slide(2);
    carousel.finish_transition();
    assert_eq!(carousel.state().current_dom_index, 8);

    let warnings = carousel.set_config(CarouselConfig::default().with_clone_sets(3, 1));
    assert!(warnings.is_empty());
    assert_eq!(carousel.current_index(), 2);
    assert_eq!(carousel.state().current_dom_index, 11);
    assert_eq!(carousel.registry().offset_to_first_actual(), 9);
    assert_eq!(
        carousel.host().last_render(),
        Some(&RenderRequest::immediate(11, -1100.0))
    );
}

#[test]
fn set_config_clamps_bad_values() {
    let mut carousel = Carousel::new(CarouselConfig::default(), SimulatedHost::uniform(100.0));
    carousel.set_slides(vec![1, 2]);
    let mut config = CarouselConfig::default();
    config.gap_px = -4.0;
    config.leading_clone_sets = 0;

    let warnings = carousel.set_config(config);
    let fields: Vec<_> = warnings.iter().map(|w| w.field).collect();
    assert_eq!(fields, ["gap_px", "leading_clone_sets"]);
    assert_eq!(carousel.config().gap_px, 0.0);
    assert_eq!(carousel.registry().leading_sets(), 1);
    assert_eq!(carousel.state().current_dom_index, 2);
}

#[test]
fn set_config_can_turn_autoplay_on() {
    let mut carousel = Carousel::new(CarouselConfig::default(), SimulatedHost::uniform(100.0));
    carousel.set_slides(vec![1, 2]);
    carousel.set_config(CarouselConfig::default().with_autoplay(std::time::Duration::from_secs(2)));
    assert!(carousel.host().pending_timer().is_some());
}

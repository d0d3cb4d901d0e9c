use fz_carousel::CarouselConfig;
use fz_carousel_config::replay::{ReplayRecord, parse_script, run};

fn changes(records: &[ReplayRecord]) -> Vec<(u64, usize, &str)> {
    records
        .iter()
        .filter_map(|record| match record {
            ReplayRecord::Change {
                at_ms,
                index,
                source,
            } => Some((*at_ms, *index, source.as_str())),
            ReplayRecord::Render { .. } => None,
        })
        .collect()
}

#[test]
fn drag_session_replays_deterministically() {
    let steps = parse_script(
        r#"[
            { "at_ms": 0, "event": { "type": "resize", "viewport": 200, "uniform_width": 200 } },
            { "at_ms": 0, "event": { "type": "set_slides", "count": 4 } },
            { "at_ms": 100, "event": { "type": "pointer_down", "x": 150 } },
            { "at_ms": 120, "event": { "type": "pointer_move", "x": 100 } },
            { "at_ms": 140, "event": { "type": "pointer_up", "x": 80 } },
            { "at_ms": 1000, "event": { "type": "key", "key": "last" } },
            { "at_ms": 1100, "event": { "type": "transition_end" } }
        ]"#,
    )
    .expect("valid script");

    let records = run(CarouselConfig::default(), &steps);
    assert_eq!(
        changes(&records),
        vec![(0, 0, "reset"), (140, 1, "gesture"), (1000, 3, "keyboard")]
    );

    assert_eq!(
        records.first(),
        Some(&ReplayRecord::Render {
            at_ms: 0,
            dom_index: 8,
            offset_px: -1600.0,
            transition_ms: None,
            easing: None,
        })
    );
    assert_eq!(
        records.get(2),
        Some(&ReplayRecord::Render {
            at_ms: 120,
            dom_index: 8,
            offset_px: -1650.0,
            transition_ms: None,
            easing: None,
        })
    );

    let again = run(CarouselConfig::default(), &steps);
    assert_eq!(records, again);
}

#[test]
fn autoplay_ticks_and_clock_driven_timers() {
    let steps = parse_script(
        r#"[
            { "event": { "type": "resize", "viewport": 100, "uniform_width": 100 } },
            { "event": { "type": "set_slides", "count": 3 } },
            { "at_ms": 10, "event": { "type": "autoplay_tick" } },
            { "at_ms": 2000, "event": { "type": "pause", "paused": true } },
            { "at_ms": 9000, "event": { "type": "next" } }
        ]"#,
    )
    .expect("valid script");

    let config = CarouselConfig::default().with_autoplay(std::time::Duration::from_secs(1));
    let records = run(config, &steps);
    assert_eq!(
        changes(&records),
        vec![
            (0, 0, "reset"),
            (10, 1, "autoplay"),
            (1310, 2, "autoplay"),
            (9000, 0, "user"),
        ]
    );
}

#[test]
fn events_before_layout_render_nothing() {
    let steps = parse_script(
        r#"[
            { "event": { "type": "set_slides", "count": 3 } },
            { "at_ms": 5, "event": { "type": "next" } }
        ]"#,
    )
    .expect("valid script");
    let records = run(CarouselConfig::default(), &steps);
    assert_eq!(changes(&records), vec![(0, 0, "reset")]);
    assert_eq!(records.len(), 1);
}

#[test]
fn json_lines_are_tagged() {
    let record = ReplayRecord::Change {
        at_ms: 7,
        index: 2,
        source: "user".into(),
    };
    assert_eq!(
        serde_json::to_string(&record).expect("serializes"),
        r#"{"kind":"change","at_ms":7,"index":2,"source":"user"}"#
    );
}

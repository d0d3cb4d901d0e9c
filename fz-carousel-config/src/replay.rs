//! Offline replay of recorded interaction scripts
//!
//! A script is a JSON array of timed steps. Each step advances the simulated
//! clock to `at_ms` (delivering any transition ends and autoplay timers that
//! fall due on the way) and then feeds one event to the engine. The output
//! is the sequence of render requests and slide changes the host saw.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, bail};
use fz_carousel::sim::{HostEvent, SimulatedHost, SlideWidths};
use fz_carousel::{Carousel, CarouselConfig, NavKey, PointerId};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub at_ms: u64,
    pub event: ScriptEvent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    SetSlides {
        count: usize,
    },
    /// New layout. `widths` are per original slide; `uniform_width` applies
    /// to all. With neither, slide widths are left as they were.
    Resize {
        viewport: f32,
        #[serde(default)]
        widths: Option<Vec<f32>>,
        #[serde(default)]
        uniform_width: Option<f32>,
    },
    Next,
    Prev,
    GoTo {
        index: usize,
    },
    PointerDown {
        x: f32,
        #[serde(default)]
        pointer: u64,
    },
    PointerMove {
        x: f32,
        #[serde(default)]
        pointer: u64,
    },
    PointerUp {
        x: f32,
        #[serde(default)]
        pointer: u64,
    },
    TransitionEnd,
    AutoplayTick,
    Key {
        key: ScriptKey,
    },
    Pause {
        paused: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKey {
    #[serde(alias = "arrow_left", alias = "ArrowLeft")]
    Previous,
    #[serde(alias = "arrow_right", alias = "ArrowRight")]
    Next,
    #[serde(alias = "home", alias = "Home")]
    First,
    #[serde(alias = "end", alias = "End")]
    Last,
}

impl From<ScriptKey> for NavKey {
    fn from(key: ScriptKey) -> Self {
        match key {
            ScriptKey::Previous => NavKey::Previous,
            ScriptKey::Next => NavKey::Next,
            ScriptKey::First => NavKey::First,
            ScriptKey::Last => NavKey::Last,
        }
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayRecord {
    Render {
        at_ms: u64,
        dom_index: usize,
        offset_px: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        transition_ms: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        easing: Option<String>,
    },
    Change {
        at_ms: u64,
        index: usize,
        source: String,
    },
}

impl fmt::Display for ReplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render {
                at_ms,
                dom_index,
                offset_px,
                transition_ms,
                easing,
            } => {
                write!(f, "{at_ms:>8}ms  render  dom={dom_index} offset={offset_px:.1}")?;
                match (transition_ms, easing) {
                    (Some(ms), Some(easing)) => write!(f, " transition={ms}ms {easing}"),
                    _ => f.write_str(" immediate"),
                }
            }
            Self::Change {
                at_ms,
                index,
                source,
            } => write!(f, "{at_ms:>8}ms  change  index={index} source={source}"),
        }
    }
}

/// Parse and validate a script. Steps must be in time order.
pub fn parse_script(raw: &str) -> anyhow::Result<Vec<ScriptStep>> {
    let steps: Vec<ScriptStep> =
        serde_json::from_str(raw).context("script must be a JSON array of steps")?;
    for (index, pair) in steps.windows(2).enumerate() {
        if pair[1].at_ms < pair[0].at_ms {
            bail!(
                "step {} at {}ms precedes the previous step at {}ms",
                index + 1,
                pair[1].at_ms,
                pair[0].at_ms
            );
        }
    }
    Ok(steps)
}

/// Run `steps` against a fresh carousel on a simulated host.
pub fn run(config: CarouselConfig, steps: &[ScriptStep]) -> Vec<ReplayRecord> {
    let mut carousel: Carousel<usize, SimulatedHost> =
        Carousel::new(config, SimulatedHost::unmeasured());

    for step in steps {
        let at = Duration::from_millis(step.at_ms);
        let by = at.saturating_sub(carousel.host().elapsed());
        carousel.advance(by);
        debug!(at_ms = step.at_ms, event = ?step.event, "replay step");
        apply(&mut carousel, &step.event);
    }

    carousel
        .host()
        .events
        .iter()
        .filter_map(|timed| {
            let at_ms = u64::try_from(timed.at.as_millis()).unwrap_or(u64::MAX);
            match timed.event {
                HostEvent::Render(request) => Some(ReplayRecord::Render {
                    at_ms,
                    dom_index: request.dom_index,
                    offset_px: request.offset_px,
                    transition_ms: request
                        .transition
                        .map(|spec| u64::try_from(spec.duration.as_millis()).unwrap_or(u64::MAX)),
                    easing: request.transition.map(|spec| spec.easing.to_string()),
                }),
                HostEvent::SlideChanged { index, source } => Some(ReplayRecord::Change {
                    at_ms,
                    index,
                    source: source.as_str().to_string(),
                }),
                HostEvent::TimerScheduled { .. } | HostEvent::TimerCancelled => None,
            }
        })
        .collect()
}

fn apply(carousel: &mut Carousel<usize, SimulatedHost>, event: &ScriptEvent) {
    match event {
        ScriptEvent::SetSlides { count } => carousel.set_slides((0..*count).collect()),
        ScriptEvent::Resize {
            viewport,
            widths,
            uniform_width,
        } => {
            let host = carousel.host_mut();
            host.set_viewport_width(Some(*viewport));
            if let Some(widths) = widths {
                host.set_slide_widths(SlideWidths::PerSlide(widths.clone()));
            } else if let Some(width) = uniform_width {
                host.set_slide_widths(SlideWidths::Uniform(*width));
            }
            carousel.on_resize();
        }
        ScriptEvent::Next => carousel.next_slide(),
        ScriptEvent::Prev => carousel.prev_slide(),
        ScriptEvent::GoTo { index } => carousel.go_to_slide(*index),
        ScriptEvent::PointerDown { x, pointer } => carousel.pointer_down(PointerId(*pointer), *x),
        ScriptEvent::PointerMove { x, pointer } => carousel.pointer_move(PointerId(*pointer), *x),
        ScriptEvent::PointerUp { x, pointer } => carousel.pointer_up(PointerId(*pointer), *x),
        ScriptEvent::TransitionEnd => carousel.finish_transition(),
        ScriptEvent::AutoplayTick => {
            if !carousel.fire_autoplay_timer() {
                debug!("autoplay tick with no timer pending");
            }
        }
        ScriptEvent::Key { key } => carousel.key((*key).into()),
        ScriptEvent::Pause { paused } => carousel.set_paused(*paused),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_parse_with_defaults() {
        let steps = parse_script(
            r#"[
                { "event": { "type": "set_slides", "count": 3 } },
                { "at_ms": 10, "event": { "type": "pointer_down", "x": 5 } },
                { "at_ms": 20, "event": { "type": "key", "key": "ArrowRight" } }
            ]"#,
        )
        .expect("valid script");
        assert_eq!(steps[0].at_ms, 0);
        assert_eq!(
            steps[1].event,
            ScriptEvent::PointerDown { x: 5.0, pointer: 0 }
        );
        assert_eq!(steps[2].event, ScriptEvent::Key { key: ScriptKey::Next });
    }

    #[test]
    fn out_of_order_steps_are_rejected() {
        let err = parse_script(
            r#"[
                { "at_ms": 50, "event": { "type": "next" } },
                { "at_ms": 10, "event": { "type": "prev" } }
            ]"#,
        )
        .expect_err("rejected");
        assert!(err.to_string().contains("precedes"));
    }

    #[test]
    fn render_lines_are_readable() {
        let record = ReplayRecord::Render {
            at_ms: 300,
            dom_index: 11,
            offset_px: -1100.0,
            transition_ms: Some(300),
            easing: Some("ease-out".into()),
        };
        assert_eq!(
            record.to_string(),
            "     300ms  render  dom=11 offset=-1100.0 transition=300ms ease-out"
        );
    }
}

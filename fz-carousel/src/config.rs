//! Carousel configuration
//!
//! [`CarouselOptions`] is the document shape read from TOML/JSON. It keeps
//! raw signed numbers so that bad input can still be represented and clamped
//! instead of failing to parse. [`CarouselConfig`] is the typed, validated
//! form the engine consumes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{autoplay, gesture, padding, transition};
use crate::geometry::LayoutMode;

/// Easing curve for animated track moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingKind {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingKind {
    pub const ALL: [Self; 4] =
        [Self::Linear, Self::EaseIn, Self::EaseOut, Self::EaseInOut];

    /// CSS timing-function keyword for hosts that animate with CSS.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Map normalized time `t` in `[0, 1]` to normalized progress (quadratic).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Unknown easing keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing `{0}`")]
pub struct UnknownEasing(pub String);

impl FromStr for EasingKind {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "ease-in" | "ease_in" | "easein" => Ok(Self::EaseIn),
            // CSS `ease` is closest to our ease-out curve.
            "ease" | "ease-out" | "ease_out" | "easeout" => Ok(Self::EaseOut),
            "ease-in-out" | "ease_in_out" | "easeinout" => Ok(Self::EaseInOut),
            other => Err(UnknownEasing(other.to_string())),
        }
    }
}

impl Serialize for EasingKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_css())
    }
}

impl<'de> Deserialize<'de> for EasingKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Presentation config: an unknown curve falls back instead of failing.
        Ok(raw.parse().unwrap_or_else(|err: UnknownEasing| {
            tracing::warn!(error = %err, fallback = %Self::default(), "ignoring easing");
            Self::default()
        }))
    }
}

/// A duration given as integer milliseconds or as a human-readable string
/// such as `"5s"` or `"350ms"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Millis(i64),
    Text(String),
}

impl DurationValue {
    fn from_duration(d: Duration) -> Self {
        Self::Millis(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }

    fn resolve(&self) -> Option<Duration> {
        match self {
            Self::Millis(ms) => u64::try_from(*ms).ok().map(Duration::from_millis),
            Self::Text(text) => humantime::parse_duration(text.trim()).ok(),
        }
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{ms}ms"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A configuration value that was replaced with a safe one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub value: String,
    pub fallback: String,
}

impl ConfigWarning {
    fn new(
        field: &'static str,
        value: impl fmt::Display,
        fallback: impl fmt::Display,
    ) -> Self {
        Self {
            field,
            value: value.to_string(),
            fallback: fallback.to_string(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is out of range; using {}",
            self.field, self.value, self.fallback
        )
    }
}

/// Serialized configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    pub centered: bool,
    pub gap_px: f64,
    #[serde(alias = "transition_duration")]
    pub transition_duration_ms: DurationValue,
    pub easing: EasingKind,
    pub drag_enabled: bool,
    pub autoplay_enabled: bool,
    #[serde(alias = "autoplay_interval")]
    pub autoplay_interval_ms: DurationValue,
    pub leading_clone_sets: i64,
    pub trailing_clone_sets: i64,
    pub drag_threshold_px: f64,
    pub flick_velocity_threshold: f64,
    pub flick_min_distance_px: f64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        CarouselConfig::default().to_options()
    }
}

impl CarouselOptions {
    /// Convert into a validated config, clamping anything out of range.
    pub fn into_config(self) -> (CarouselConfig, Vec<ConfigWarning>) {
        let defaults = CarouselConfig::default();
        let mut warnings = Vec::new();

        let mut duration = |field: &'static str, value: &DurationValue, fallback: Duration| {
            value.resolve().unwrap_or_else(|| {
                warnings.push(ConfigWarning::new(
                    field,
                    value,
                    humantime::format_duration(fallback),
                ));
                fallback
            })
        };
        let transition_duration = duration(
            "transition_duration_ms",
            &self.transition_duration_ms,
            defaults.transition_duration,
        );
        let autoplay_interval = duration(
            "autoplay_interval_ms",
            &self.autoplay_interval_ms,
            defaults.autoplay_interval,
        );

        let mut count = |field: &'static str, value: i64| {
            usize::try_from(value)
                .ok()
                .filter(|n| *n >= padding::MIN_CLONE_SETS)
                .unwrap_or_else(|| {
                    warnings.push(ConfigWarning::new(
                        field,
                        value,
                        padding::MIN_CLONE_SETS,
                    ));
                    padding::MIN_CLONE_SETS
                })
        };
        let leading_clone_sets = count("leading_clone_sets", self.leading_clone_sets);
        let trailing_clone_sets =
            count("trailing_clone_sets", self.trailing_clone_sets);

        let config = CarouselConfig {
            centered: self.centered,
            gap_px: self.gap_px as f32,
            transition_duration,
            easing: self.easing,
            drag_enabled: self.drag_enabled,
            autoplay_enabled: self.autoplay_enabled,
            autoplay_interval,
            leading_clone_sets,
            trailing_clone_sets,
            drag_threshold_px: self.drag_threshold_px as f32,
            flick_velocity_threshold: self.flick_velocity_threshold as f32,
            flick_min_distance_px: self.flick_min_distance_px as f32,
        };
        let (config, more) = config.sanitized();
        warnings.extend(more);
        (config, warnings)
    }
}

/// Validated per-instance carousel options.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Center the current slide in the viewport instead of left-aligning it.
    pub centered: bool,
    /// Spacing between adjacent slides.
    pub gap_px: f32,
    /// Duration of animated moves. Zero means moves apply immediately.
    pub transition_duration: Duration,
    pub easing: EasingKind,
    pub drag_enabled: bool,
    pub autoplay_enabled: bool,
    pub autoplay_interval: Duration,
    /// Copies of the slide set placed before the originals.
    pub leading_clone_sets: usize,
    /// Copies of the slide set placed after the originals.
    pub trailing_clone_sets: usize,
    /// Release distance beyond which a drag always commits.
    pub drag_threshold_px: f32,
    /// Release velocity (px/ms) above which a short drag counts as a flick.
    pub flick_velocity_threshold: f32,
    /// Minimum travel for a flick to commit.
    pub flick_min_distance_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            centered: false,
            gap_px: transition::GAP_PX,
            transition_duration: Duration::from_millis(transition::DURATION_MS),
            easing: EasingKind::default(),
            drag_enabled: true,
            autoplay_enabled: false,
            autoplay_interval: Duration::from_millis(autoplay::INTERVAL_MS),
            leading_clone_sets: padding::LEADING_CLONE_SETS,
            trailing_clone_sets: padding::TRAILING_CLONE_SETS,
            drag_threshold_px: gesture::DRAG_THRESHOLD_PX,
            flick_velocity_threshold: gesture::FLICK_VELOCITY_PX_PER_MS,
            flick_min_distance_px: gesture::FLICK_MIN_DISTANCE_PX,
        }
    }
}

impl CarouselConfig {
    pub fn layout_mode(&self) -> LayoutMode {
        if self.centered {
            LayoutMode::Centered
        } else {
            LayoutMode::LeftAligned
        }
    }

    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn with_gap(mut self, gap_px: f32) -> Self {
        self.gap_px = gap_px;
        self
    }

    pub fn with_transition(mut self, duration: Duration, easing: EasingKind) -> Self {
        self.transition_duration = duration;
        self.easing = easing;
        self
    }

    pub fn with_autoplay(mut self, interval: Duration) -> Self {
        self.autoplay_enabled = true;
        self.autoplay_interval = interval;
        self
    }

    pub fn with_clone_sets(mut self, leading: usize, trailing: usize) -> Self {
        self.leading_clone_sets = leading;
        self.trailing_clone_sets = trailing;
        self
    }

    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    /// Clamp every field into its safe range, reporting each replacement.
    pub fn sanitized(mut self) -> (Self, Vec<ConfigWarning>) {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            warnings.push(ConfigWarning::new("gap_px", self.gap_px, 0.0));
            self.gap_px = 0.0;
        }

        let mut positive = |field: &'static str, value: &mut f32, fallback: f32| {
            if !value.is_finite() || *value <= 0.0 {
                warnings.push(ConfigWarning::new(field, *value, fallback));
                *value = fallback;
            }
        };
        positive(
            "drag_threshold_px",
            &mut self.drag_threshold_px,
            defaults.drag_threshold_px,
        );
        positive(
            "flick_velocity_threshold",
            &mut self.flick_velocity_threshold,
            defaults.flick_velocity_threshold,
        );
        positive(
            "flick_min_distance_px",
            &mut self.flick_min_distance_px,
            defaults.flick_min_distance_px,
        );

        if self.autoplay_interval < Duration::from_millis(autoplay::MIN_INTERVAL_MS) {
            warnings.push(ConfigWarning::new(
                "autoplay_interval_ms",
                humantime::format_duration(self.autoplay_interval),
                humantime::format_duration(defaults.autoplay_interval),
            ));
            self.autoplay_interval = defaults.autoplay_interval;
        }

        for (field, sets) in [
            ("leading_clone_sets", &mut self.leading_clone_sets),
            ("trailing_clone_sets", &mut self.trailing_clone_sets),
        ] {
            if *sets < padding::MIN_CLONE_SETS {
                warnings.push(ConfigWarning::new(field, *sets, padding::MIN_CLONE_SETS));
                *sets = padding::MIN_CLONE_SETS;
            }
        }

        for warning in &warnings {
            tracing::warn!(%warning, "clamped carousel option");
        }
        (self, warnings)
    }

    /// Document form of this config, suitable for serializing.
    pub fn to_options(&self) -> CarouselOptions {
        CarouselOptions {
            centered: self.centered,
            gap_px: f64::from(self.gap_px),
            transition_duration_ms: DurationValue::from_duration(self.transition_duration),
            easing: self.easing,
            drag_enabled: self.drag_enabled,
            autoplay_enabled: self.autoplay_enabled,
            autoplay_interval_ms: DurationValue::from_duration(self.autoplay_interval),
            leading_clone_sets: self.leading_clone_sets as i64,
            trailing_clone_sets: self.trailing_clone_sets as i64,
            drag_threshold_px: f64::from(self.drag_threshold_px),
            flick_velocity_threshold: f64::from(self.flick_velocity_threshold),
            flick_min_distance_px: f64::from(self.flick_min_distance_px),
        }
    }
}

//! Environment lookups and single-field overrides.

use std::collections::HashMap;
use std::time::Duration;

use fz_carousel::CarouselConfig;

use crate::loader::error::ConfigLoadError;

/// Path to a TOML or JSON config file.
pub const CONFIG_PATH_VAR: &str = "FZ_CAROUSEL_CONFIG";
/// Whole config document as inline JSON.
pub const CONFIG_JSON_VAR: &str = "FZ_CAROUSEL_CONFIG_JSON";
pub const AUTOPLAY_VAR: &str = "FZ_CAROUSEL_AUTOPLAY";
pub const AUTOPLAY_INTERVAL_VAR: &str = "FZ_CAROUSEL_AUTOPLAY_INTERVAL";
pub const CENTERED_VAR: &str = "FZ_CAROUSEL_CENTERED";
pub const GAP_PX_VAR: &str = "FZ_CAROUSEL_GAP_PX";

/// Where configuration reads environment variables from.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`EnvSource::var`] but treats blank values as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.trim().is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment.
#[derive(Debug, Default, Clone)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Apply `FZ_CAROUSEL_*` field overrides on top of a loaded config.
///
/// Unset or blank variables are skipped. A value that does not parse is an
/// error rather than a silent fallback.
pub fn apply_env_overrides(
    config: &mut CarouselConfig,
    env: &impl EnvSource,
) -> Result<(), ConfigLoadError> {
    if let Some(raw) = env.non_empty(AUTOPLAY_VAR) {
        config.autoplay_enabled = parse_bool(AUTOPLAY_VAR, &raw)?;
    }
    if let Some(raw) = env.non_empty(AUTOPLAY_INTERVAL_VAR) {
        config.autoplay_interval = parse_duration(AUTOPLAY_INTERVAL_VAR, &raw)?;
    }
    if let Some(raw) = env.non_empty(CENTERED_VAR) {
        config.centered = parse_bool(CENTERED_VAR, &raw)?;
    }
    if let Some(raw) = env.non_empty(GAP_PX_VAR) {
        config.gap_px = raw
            .trim()
            .parse::<f32>()
            .map_err(|_| invalid(GAP_PX_VAR, &raw))?;
    }
    Ok(())
}

fn invalid(key: &str, value: &str) -> ConfigLoadError {
    ConfigLoadError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigLoadError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

/// Bare integers are milliseconds; anything else goes through `humantime`.
fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigLoadError> {
    let trimmed = raw.trim();
    if let Ok(ms) = trimmed.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    humantime::parse_duration(trimmed).map_err(|_| invalid(key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_fields() {
        let env = MapEnv::new()
            .with(AUTOPLAY_VAR, "yes")
            .with(AUTOPLAY_INTERVAL_VAR, "2s 500ms")
            .with(CENTERED_VAR, "TRUE")
            .with(GAP_PX_VAR, " 12.5 ");
        let mut config = CarouselConfig::default();
        apply_env_overrides(&mut config, &env).expect("valid overrides");

        assert!(config.autoplay_enabled);
        assert_eq!(config.autoplay_interval, Duration::from_millis(2_500));
        assert!(config.centered);
        assert_eq!(config.gap_px, 12.5);
    }

    #[test]
    fn bare_interval_is_milliseconds() {
        let env = MapEnv::from_iter([(AUTOPLAY_INTERVAL_VAR, "750")]);
        let mut config = CarouselConfig::default();
        apply_env_overrides(&mut config, &env).expect("valid override");
        assert_eq!(config.autoplay_interval, Duration::from_millis(750));
    }

    #[test]
    fn blank_values_are_ignored() {
        let env = MapEnv::new().with(CENTERED_VAR, "   ");
        let mut config = CarouselConfig::default();
        apply_env_overrides(&mut config, &env).expect("blank is unset");
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn malformed_value_names_the_variable() {
        let env = MapEnv::new().with(AUTOPLAY_VAR, "sometimes");
        let mut config = CarouselConfig::default();
        let err = apply_env_overrides(&mut config, &env).expect_err("rejected");
        assert!(matches!(
            err,
            ConfigLoadError::InvalidOverride { ref key, ref value }
                if key == AUTOPLAY_VAR && value == "sometimes"
        ));
    }
}

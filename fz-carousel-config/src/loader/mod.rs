pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use fz_carousel::{CarouselConfig, CarouselOptions};
use tracing::{debug, info, warn};

use crate::env::{CONFIG_JSON_VAR, CONFIG_PATH_VAR, EnvSource, ProcessEnv, apply_env_overrides};
use crate::validation::{ConfigWarning, ConfigWarnings};
use error::ConfigLoadError;

const DEFAULT_CONFIG_LOCATIONS: &[&str] = &[
    "carousel.toml",
    "carousel.json",
    "config/carousel.toml",
    "config/carousel.json",
];

/// Source that produced the carousel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    Explicit(PathBuf),
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: CarouselConfig,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
}

#[derive(Debug)]
pub struct ConfigLoader<E = ProcessEnv> {
    config_path: Option<PathBuf>,
    search_root: Option<PathBuf>,
    env: E,
}

impl Default for ConfigLoader<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader<ProcessEnv> {
    pub fn new() -> Self {
        Self {
            config_path: None,
            search_root: None,
            env: ProcessEnv,
        }
    }
}

impl<E: EnvSource> ConfigLoader<E> {
    pub fn with_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Directory the default locations are resolved against (the working
    /// directory when unset).
    pub fn with_search_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.search_root = Some(root.into());
        self
    }

    pub fn with_env<F: EnvSource>(self, env: F) -> ConfigLoader<F> {
        ConfigLoader {
            config_path: self.config_path,
            search_root: self.search_root,
            env,
        }
    }

    /// Evaluation order:
    /// 1) the explicit path,
    /// 2) `$FZ_CAROUSEL_CONFIG` (TOML or JSON file),
    /// 3) `$FZ_CAROUSEL_CONFIG_JSON` (inline JSON),
    /// 4) the first default location that exists,
    /// 5) built-in defaults.
    ///
    /// Field overrides from the environment apply on top, then the guard
    /// rails clamp whatever is out of range.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();
        let (options, source) = self.resolve()?;

        if source == ConfigSource::Default {
            warnings.record(ConfigWarning::defaults_used(format!(
                "create carousel.toml or set {CONFIG_PATH_VAR}"
            )));
        }

        let (mut config, clamps) = options.into_config();
        warnings.extend_clamps(clamps);

        apply_env_overrides(&mut config, &self.env)?;
        let (config, clamps) = config.sanitized();
        warnings.extend_clamps(clamps);

        for warning in warnings.iter() {
            warn!(%warning, "carousel config");
        }
        info!(?source, clamped = ?warnings.clamped_fields(), "carousel config loaded");
        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }

    fn resolve(&self) -> Result<(CarouselOptions, ConfigSource), ConfigLoadError> {
        if let Some(path) = &self.config_path {
            let options = load_from_file(path)?;
            return Ok((options, ConfigSource::Explicit(path.clone())));
        }

        if let Some(raw) = self.env.non_empty(CONFIG_PATH_VAR) {
            let path = PathBuf::from(raw);
            let options = load_from_file(&path)?;
            return Ok((options, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = self.env.non_empty(CONFIG_JSON_VAR) {
            let options = parse_document(&raw, DocumentFormat::Json, CONFIG_JSON_VAR)
                .map_err(|source| ConfigLoadError::Parse {
                    origin: CONFIG_JSON_VAR.to_string(),
                    source,
                })?;
            return Ok((options, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let options = load_from_file(&path)?;
            return Ok((options, ConfigSource::File(path)));
        }

        Ok((CarouselOptions::default(), ConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        let root = self.search_root.as_deref().unwrap_or(Path::new(""));
        DEFAULT_CONFIG_LOCATIONS
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}

/// Document formats a config can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
    /// Unknown extension: TOML is tried first, then JSON.
    Sniff,
}

impl DocumentFormat {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("toml") | Some("tml") => Self::Toml,
            _ => Self::Sniff,
        }
    }
}

pub fn load_from_file(path: &Path) -> Result<CarouselOptions, ConfigLoadError> {
    if !path.exists() {
        return Err(ConfigLoadError::MissingConfig {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DocumentFormat::of(path);
    debug!(path = %path.display(), ?format, "read carousel config");

    let origin = path.display().to_string();
    parse_document(&contents, format, &origin)
        .map_err(|source| ConfigLoadError::Parse { origin, source })
}

/// Parse `contents` as `format`. `origin` names the document in errors.
pub fn parse_document(
    contents: &str,
    format: DocumentFormat,
    origin: &str,
) -> anyhow::Result<CarouselOptions> {
    match format {
        DocumentFormat::Toml => toml::from_str(contents)
            .with_context(|| format!("{origin} is not a carousel TOML document")),
        DocumentFormat::Json => serde_json::from_str(contents)
            .with_context(|| format!("{origin} is not a carousel JSON document")),
        DocumentFormat::Sniff => parse_from_str(contents, origin),
    }
}

/// Parse a document of unknown format: TOML first, then JSON. The error
/// carries both parser failures.
pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<CarouselOptions> {
    let toml_err = match toml::from_str::<CarouselOptions>(contents) {
        Ok(options) => return Ok(options),
        Err(err) => err,
    };
    serde_json::from_str(contents).map_err(|json_err| {
        anyhow!("{origin} is neither carousel TOML ({toml_err}) nor carousel JSON ({json_err})")
    })
}

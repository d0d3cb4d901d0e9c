//! Configuration library for fz-carousel.
//!
//! Resolves carousel options from an explicit file, environment variables or
//! well-known default locations, applies single-field environment overrides
//! and clamps everything through the engine's guard rails. The
//! `fz-carousel-replay` binary builds on the same loader to replay recorded
//! interaction scripts against the simulated host.

pub mod env;
pub mod loader;
pub mod replay;
pub mod validation;

pub use env::{EnvSource, MapEnv, ProcessEnv, apply_env_overrides};
pub use loader::{
    ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError, parse_from_str,
};
pub use validation::{ConfigWarning, ConfigWarnings};

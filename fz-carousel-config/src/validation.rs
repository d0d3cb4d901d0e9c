use std::fmt;

use fz_carousel::config::ConfigWarning as ClampWarning;

/// Something about the loaded config worth telling the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    /// Config key the warning is about, when there is one.
    pub field: Option<&'static str>,
    pub hint: Option<String>,
}

impl ConfigWarning {
    /// A value the engine replaced; the hint names the key to fix.
    pub fn clamped(clamp: &ClampWarning) -> Self {
        Self {
            message: clamp.to_string(),
            field: Some(clamp.field),
            hint: Some(format!(
                "set `{}` to a supported value (was {})",
                clamp.field, clamp.value
            )),
        }
    }

    /// No document was found; `lookup` lists where one could go.
    pub fn defaults_used(lookup: impl Into<String>) -> Self {
        Self {
            message: "no carousel config detected; using built-in defaults".to_string(),
            field: None,
            hint: Some(lookup.into()),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} ({hint})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn record(&mut self, warning: ConfigWarning) {
        self.items.push(warning);
    }

    /// Record the engine's clamps, one warning per replaced field.
    pub fn extend_clamps(&mut self, clamps: impl IntoIterator<Item = ClampWarning>) {
        self.items
            .extend(clamps.into_iter().map(|clamp| ConfigWarning::clamped(&clamp)));
    }

    /// Keys that were clamped, in the order they were checked.
    pub fn clamped_fields(&self) -> Vec<&'static str> {
        self.items.iter().filter_map(|warning| warning.field).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

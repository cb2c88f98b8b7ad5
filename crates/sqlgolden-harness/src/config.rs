//! Golden assertion settings.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use sqlgolden_core::ComparisonOrder;
use sqlgolden_error::{Result, UPDATE_ENV_VAR};

/// Directory golden files live in when nothing else is configured.
pub const DEFAULT_TESTDATA_DIR: &str = "testdata";

/// Where golden files live and how assertions treat them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoldenConfig {
    pub testdata_dir: PathBuf,
    /// Overwrite references with the current recording instead of comparing.
    pub update: bool,
    pub order: ComparisonOrder,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            testdata_dir: PathBuf::from(DEFAULT_TESTDATA_DIR),
            update: false,
            order: ComparisonOrder::Ordered,
        }
    }
}

impl GoldenConfig {
    /// Defaults with the update flag taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parse a TOML document. The environment update flag still wins when set.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config.with_env_overrides())
    }

    #[must_use]
    pub fn with_testdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.testdata_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: ComparisonOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(update) = update_flag(env::var(UPDATE_ENV_VAR).ok().as_deref()) {
            self.update = update;
        }
        self
    }
}

/// Interpret the update variable. Unset or empty means "no opinion".
fn update_flag(raw: Option<&str>) -> Option<bool> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw == "1" || raw.eq_ignore_ascii_case("true"))
}

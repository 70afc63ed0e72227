use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::emitter::ReplaySettings;
use crate::payload::ValueMode;
use crate::submit;

/// What to do when a single submission fails (transport error or non-2xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestErrorPolicy {
    /// Log the failure and move on to the next row.
    #[default]
    Continue,
    /// Stop the replay at the first failure.
    Abort,
}

/// Global configuration loaded from `~/.config/wxreplay/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Tab-separated observation file (date, temperature, humidity; no header).
    pub input_path: PathBuf,
    /// Endpoint that receives one POST per row.
    pub target_url: String,
    /// Pause between consecutive submissions, in seconds. 0 disables it.
    pub delay_secs: f64,
    /// "text" sends column text as JSON strings, "number" sends JSON numbers.
    pub values: ValueMode,
    /// Drop malformed rows with a warning instead of refusing the whole file.
    pub skip_malformed: bool,
    /// "continue" (default) or "abort" on a failed submission.
    pub on_request_error: RequestErrorPolicy,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("weather.dat"),
            target_url: "http://localhost:8080/submit".to_string(),
            delay_secs: 2.0,
            values: ValueMode::Text,
            skip_malformed: false,
            on_request_error: RequestErrorPolicy::Continue,
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Values given on the command line; each `Some`/`true` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub target_url: Option<String>,
    pub delay_secs: Option<f64>,
    pub values: Option<ValueMode>,
    pub skip_malformed: bool,
    pub fail_fast: bool,
}

impl ReplayConfig {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.input_path {
            self.input_path = path;
        }
        if let Some(url) = overrides.target_url {
            self.target_url = url;
        }
        if let Some(delay) = overrides.delay_secs {
            self.delay_secs = delay;
        }
        if let Some(values) = overrides.values {
            self.values = values;
        }
        if overrides.skip_malformed {
            self.skip_malformed = true;
        }
        if overrides.fail_fast {
            self.on_request_error = RequestErrorPolicy::Abort;
        }
    }

    /// Validate and convert into the settings the emitter runs with.
    pub fn settings(&self) -> Result<ReplaySettings> {
        let delay = Duration::try_from_secs_f64(self.delay_secs).with_context(|| {
            format!(
                "delay_secs must be a non-negative number, got {}",
                self.delay_secs
            )
        })?;
        if self.connect_timeout_secs == 0 || self.timeout_secs == 0 {
            anyhow::bail!("connect_timeout_secs and timeout_secs must be greater than 0");
        }
        let target_url = submit::validate_target_url(&self.target_url)?;
        Ok(ReplaySettings {
            input_path: self.input_path.clone(),
            target_url,
            delay,
            values: self.values,
            skip_malformed: self.skip_malformed,
            on_request_error: self.on_request_error,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wxreplay")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReplayConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ReplayConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<ReplayConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ReplayConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use recipe_core::SessionConfig;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "recipeflow.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed_path: Option<PathBuf>,
    pub tick_millis: u64,
    pub default_timer_seconds: u32,
    pub celebration_millis: u64,
    pub recent_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_path: None,
            tick_millis: 1000,
            default_timer_seconds: 60,
            celebration_millis: 5000,
            recent_limit: 4,
        }
    }
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            default_timer_seconds: self.default_timer_seconds,
            tick: Duration::from_millis(self.tick_millis.max(1)),
            recent_limit: self.recent_limit,
        }
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_millis)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    seed_path: Option<PathBuf>,
    tick_millis: Option<u64>,
    default_timer_seconds: Option<u32>,
    celebration_millis: Option<u64>,
    recent_limit: Option<usize>,
}

/// Defaults, then `recipeflow.toml` (or `config_path`), then environment.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    } else if config_path.is_some() {
        warn!(path = %path.display(), "config: file not readable, using defaults");
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("config: ignoring malformed settings file: {err}");
            return;
        }
    };
    if let Some(v) = file_cfg.seed_path {
        settings.seed_path = Some(v);
    }
    if let Some(v) = file_cfg.tick_millis {
        settings.tick_millis = v;
    }
    if let Some(v) = file_cfg.default_timer_seconds {
        settings.default_timer_seconds = v;
    }
    if let Some(v) = file_cfg.celebration_millis {
        settings.celebration_millis = v;
    }
    if let Some(v) = file_cfg.recent_limit {
        settings.recent_limit = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let first = |keys: [&str; 2]| keys.into_iter().find_map(&lookup);

    if let Some(v) = first(["RECIPEFLOW_SEED_PATH", "APP__SEED_PATH"]) {
        settings.seed_path = Some(PathBuf::from(v));
    }
    if let Some(v) = first(["RECIPEFLOW_TICK_MILLIS", "APP__TICK_MILLIS"]) {
        if let Ok(parsed) = v.parse() {
            settings.tick_millis = parsed;
        }
    }
    if let Some(v) = first(["RECIPEFLOW_DEFAULT_TIMER_SECONDS", "APP__DEFAULT_TIMER_SECONDS"]) {
        if let Ok(parsed) = v.parse() {
            settings.default_timer_seconds = parsed;
        }
    }
    if let Some(v) = first(["RECIPEFLOW_CELEBRATION_MILLIS", "APP__CELEBRATION_MILLIS"]) {
        if let Ok(parsed) = v.parse() {
            settings.celebration_millis = parsed;
        }
    }
    if let Some(v) = first(["RECIPEFLOW_RECENT_LIMIT", "APP__RECENT_LIMIT"]) {
        if let Ok(parsed) = v.parse() {
            settings.recent_limit = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::SessionConfig;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "secure_chat.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub display_name: Option<String>,
    pub reply_delay_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: None,
            reply_delay_ms: 1000,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        let config = match &self.display_name {
            Some(name) => SessionConfig::new(name.clone()),
            None => SessionConfig::default(),
        };
        config.with_reply_delay(Duration::from_millis(self.reply_delay_ms))
    }

    fn apply_file(&mut self, table: &toml::Table) {
        if let Some(v) = table.get("display_name").and_then(toml::Value::as_str) {
            self.set_display_name(v);
        }
        match table.get("reply_delay_ms") {
            Some(toml::Value::Integer(v)) => match u64::try_from(*v) {
                Ok(v) => self.reply_delay_ms = v,
                Err(_) => warn!("config: ignoring negative reply_delay_ms={v}"),
            },
            Some(toml::Value::String(v)) => self.set_reply_delay(v),
            Some(other) => warn!("config: ignoring reply_delay_ms={other}"),
            None => {}
        }
        if let Some(v) = table.get("log_filter").and_then(toml::Value::as_str) {
            self.log_filter = v.to_string();
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("APP__DISPLAY_NAME") {
            self.set_display_name(&v);
        }
        if let Some(v) = lookup("APP__REPLY_DELAY_MS") {
            self.set_reply_delay(&v);
        }
        if let Some(v) = lookup("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }

    fn set_display_name(&mut self, raw: &str) {
        let raw = raw.trim();
        self.display_name = (!raw.is_empty()).then(|| raw.to_string());
    }

    fn set_reply_delay(&mut self, raw: &str) {
        match raw.trim().parse::<u64>() {
            Ok(v) => self.reply_delay_ms = v,
            Err(_) => warn!("config: ignoring unparseable reply_delay_ms={raw}"),
        }
    }
}

/// Layers defaults, the settings file and `APP__*` environment overrides.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let table = parse_settings(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        settings.apply_file(&table);
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<toml::Table> {
    Ok(raw.parse::<toml::Table>()?)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

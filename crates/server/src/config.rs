use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            templates_dir: "templates".into(),
            static_dir: "static".into(),
            debug: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    templates_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    debug: Option<bool>,
}

pub fn load_settings(config_path: &Path) -> Settings {
    let raw = fs::read_to_string(config_path).ok();
    settings_from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn settings_from_sources(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                if let Some(v) = file_cfg.templates_dir {
                    settings.templates_dir = v;
                }
                if let Some(v) = file_cfg.static_dir {
                    settings.static_dir = v;
                }
                if let Some(v) = file_cfg.debug {
                    settings.debug = v;
                }
            }
            Err(error) => warn!(%error, "ignoring malformed config file"),
        }
    }

    if let Some(port) = env("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
        settings.server_bind = format!("0.0.0.0:{port}");
    }
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("TEMPLATES_DIR") {
        settings.templates_dir = v.into();
    }
    if let Some(v) = env("APP__TEMPLATES_DIR") {
        settings.templates_dir = v.into();
    }

    if let Some(v) = env("STATIC_DIR") {
        settings.static_dir = v.into();
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = v.into();
    }

    if let Some(v) = env("DEBUG") {
        settings.debug = parse_flag(&v);
    }
    if let Some(v) = env("APP__DEBUG") {
        settings.debug = parse_flag(&v);
    }

    settings
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "True" | "true" | "1")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

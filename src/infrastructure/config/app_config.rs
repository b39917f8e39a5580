//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::domain::entities::ViewId;

pub(crate) const APP_NAME: &str = "homeboard";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where view and modal templates are fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSourceKind {
    /// Local directory.
    #[default]
    Fs,
    /// Remote web server.
    Http,
}

/// Application configuration loaded from `config.toml` and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// View shown at startup. Falls back to the last shown view, then `home`.
    #[serde(default)]
    pub start_view: Option<ViewId>,

    /// Restore the view that was visible when the dashboard last exited.
    #[serde(default = "default_true")]
    pub restore_last_view: bool,

    /// Template loading configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Controller refresh configuration.
    #[serde(default)]
    pub controllers: ControllersConfig,
}

/// Template loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Template source.
    #[serde(default)]
    pub source: TemplateSourceKind,

    /// Root directory for the filesystem source.
    #[serde(default = "default_templates_root")]
    pub root: PathBuf,

    /// Base URL for the HTTP source.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Views directory, relative to the source root.
    #[serde(default = "default_views_path")]
    pub views_path: String,

    /// Modals directory, relative to the source root.
    #[serde(default = "default_modals_path")]
    pub modals_path: String,

    /// Fixed cache-busting token. A per-session timestamp is used when unset.
    #[serde(default)]
    pub cache_buster: Option<String>,

    /// Preload essential views and all modals at startup.
    #[serde(default = "default_true")]
    pub preload: bool,

    /// Delay before background view preloading, in milliseconds.
    #[serde(default = "default_preload_delay_ms")]
    pub preload_delay_ms: u64,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            source: TemplateSourceKind::default(),
            root: default_templates_root(),
            base_url: default_base_url(),
            views_path: default_views_path(),
            modals_path: default_modals_path(),
            cache_buster: None,
            preload: true,
            preload_delay_ms: default_preload_delay_ms(),
        }
    }
}

impl TemplatesConfig {
    /// Returns the background preload delay.
    #[must_use]
    pub const fn preload_delay(&self) -> Duration {
        Duration::from_millis(self.preload_delay_ms)
    }
}

/// Refresh intervals of the polling controllers, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllersConfig {
    /// Camera snapshot refresh.
    #[serde(default = "default_camera_refresh_ms")]
    pub camera_refresh_ms: u64,

    /// PC metrics refresh.
    #[serde(default = "default_pc_metrics_refresh_ms")]
    pub pc_metrics_refresh_ms: u64,

    /// Surveillance event list refresh.
    #[serde(default = "default_surveillance_refresh_ms")]
    pub surveillance_refresh_ms: u64,
}

impl Default for ControllersConfig {
    fn default() -> Self {
        Self {
            camera_refresh_ms: default_camera_refresh_ms(),
            pc_metrics_refresh_ms: default_pc_metrics_refresh_ms(),
            surveillance_refresh_ms: default_surveillance_refresh_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_templates_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_base_url() -> String {
    "http://homeassistant.local:8123/local/dashboard".to_string()
}

fn default_views_path() -> String {
    "views".to_string()
}

fn default_modals_path() -> String {
    "modals".to_string()
}

fn default_preload_delay_ms() -> u64 {
    1000
}

fn default_camera_refresh_ms() -> u64 {
    700
}

fn default_pc_metrics_refresh_ms() -> u64 {
    2000
}

fn default_surveillance_refresh_ms() -> u64 {
    30_000
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(root) = &args.templates_root {
            self.templates.source = TemplateSourceKind::Fs;
            self.templates.root.clone_from(root);
        }
        if let Some(base_url) = &args.base_url {
            self.templates.source = TemplateSourceKind::Http;
            self.templates.base_url.clone_from(base_url);
        }
        if let Some(start_view) = args.start_view {
            self.start_view = Some(start_view);
        }
        if args.no_preload {
            self.templates.preload = false;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("homeboard.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            start_view: None,
            restore_last_view: true,
            templates: TemplatesConfig::default(),
            controllers: ControllersConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"
            start_view = "energy-display"

            [templates]
            source = "http"
            base_url = "http://ha.lan:8123/local/dashboard"
            cache_buster = "42"

            [controllers]
            camera_refresh_ms = 1500
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.start_view, Some(ViewId::EnergyDisplay));
        assert_eq!(config.templates.source, TemplateSourceKind::Http);
        assert_eq!(config.templates.cache_buster.as_deref(), Some("42"));
        assert_eq!(config.templates.views_path, "views");
        assert_eq!(config.controllers.camera_refresh_ms, 1500);
        assert_eq!(config.controllers.pc_metrics_refresh_ms, 2000);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.restore_last_view);
        assert!(config.templates.preload);
        assert_eq!(config.templates.preload_delay(), Duration::from_secs(1));
        assert_eq!(config.controllers.surveillance_refresh_ms, 30_000);
    }

    #[test]
    fn test_merge_with_args_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "homeboard",
            "--base-url",
            "http://localhost:8123/local/dashboard",
            "--start-view",
            "security",
            "--no-preload",
            "--log-level",
            "warn",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.templates.source, TemplateSourceKind::Http);
        assert_eq!(config.start_view, Some(ViewId::Security));
        assert!(!config.templates.preload);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_log_level_maps_to_tracing_level() {
        assert_eq!(LogLevel::default().to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_effective_config_path_prefers_cli() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from(["homeboard", "--config", "/tmp/homeboard.toml"]);

        config.merge_with_args(&args);

        assert_eq!(
            config.effective_config_path(),
            Some(PathBuf::from("/tmp/homeboard.toml"))
        );
    }
}

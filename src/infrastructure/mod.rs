//! Infrastructure layer with configuration, template and controller adapters.

/// Application configuration.
pub mod config;
/// Built-in controller modules.
pub mod controllers;
/// Application state persistence.
pub mod state_store;
/// Template sources and loader.
pub mod templates;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager, TemplateSourceKind};
pub use controllers::BuiltinControllers;
pub use state_store::{AppState, StateStore};
pub use templates::{FsTemplateSource, HttpTemplateSource, TemplateLoader};

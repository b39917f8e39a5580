use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use super::config::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::domain::entities::ViewId;

/// State persisted between dashboard sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppState {
    /// View visible when the dashboard last exited.
    pub last_view: Option<ViewId>,
}

#[derive(Debug, Clone)]
pub struct StateStore {
    state_path: Option<PathBuf>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Creates a new state store instance.
    ///
    /// If project directories cannot be determined, persistence will be disabled
    /// and a warning will be logged.
    #[must_use]
    pub fn new() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            Self {
                state_path: Some(proj_dirs.config_dir().join("state.toml")),
            }
        } else {
            tracing::warn!("Failed to determine project directories. State persistence disabled.");
            Self { state_path: None }
        }
    }

    /// Creates a store backed by an explicit file.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self {
        Self {
            state_path: Some(path),
        }
    }

    /// Loads the persisted state from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be read (unless it doesn't exist,
    /// in which case default state is returned).
    pub async fn load(&self) -> Result<AppState> {
        let Some(path) = &self.state_path else {
            return Ok(AppState::default());
        };

        if !fs::try_exists(path).await.unwrap_or(false) {
            return Ok(AppState::default());
        }

        let content = fs::read_to_string(path)
            .await
            .wrap_err("Failed to read state file")?;

        match toml::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse state file, resetting state");
                Ok(AppState::default())
            }
        }
    }

    /// Saves the last shown view.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or if the state file cannot be written.
    pub async fn save(&self, last_view: Option<ViewId>) -> Result<()> {
        let Some(path) = &self.state_path else {
            return Ok(());
        };

        let state = AppState { last_view };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .wrap_err("Failed to create config directory")?;
        }

        let content = toml::to_string(&state).wrap_err("Failed to serialize state")?;

        fs::write(path, content)
            .await
            .wrap_err("Failed to write state file")?;

        Ok(())
    }
}

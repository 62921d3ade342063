/// CLI configuration
use crate::error::{CliError, Result};
use podcastr_playback::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "podcastr.toml";

/// Prefix for environment overrides, e.g. `PODCASTR_PLAYER__TICK_SECONDS`
pub const ENV_PREFIX: &str = "PODCASTR";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,

    #[serde(default = "default_log")]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Episodes kept from the fetched list
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Episodes highlighted as latest
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Seconds a bare `tick` advances the simulated clock
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogSettings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist; otherwise `podcastr.toml` is read when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`load`](Self::load) with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (PODCASTR_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.tick_seconds == 0 {
            return Err(CliError::Config(
                "player.tick_seconds must be at least 1".to_string(),
            ));
        }

        if self.catalog.latest_count > self.catalog.limit {
            return Err(CliError::Config(format!(
                "catalog.latest_count ({}) exceeds catalog.limit ({})",
                self.catalog.latest_count, self.catalog.limit
            )));
        }

        Ok(())
    }

    /// Session settings derived from the player section
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            shuffle_seed: self.player.shuffle_seed,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            player: default_player(),
            log: default_log(),
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        limit: default_limit(),
        latest_count: default_latest_count(),
    }
}

fn default_limit() -> usize {
    12
}

fn default_latest_count() -> usize {
    2
}

fn default_player() -> PlayerSettings {
    PlayerSettings {
        shuffle_seed: None,
        tick_seconds: default_tick_seconds(),
    }
}

fn default_tick_seconds() -> u64 {
    1
}

fn default_log() -> LogSettings {
    LogSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "podcastr=info,podcastr_playback=info".to_string()
}

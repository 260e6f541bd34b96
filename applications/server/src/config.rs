/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use stereo_playback::{OutputProgram, PlaybackConfig};

/// Read when no `--config` is given, if present
pub const DEFAULT_CONFIG_FILE: &str = "stereo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// How many recently played tracks to remember
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Output program; probed on `PATH` when unset
    #[serde(default)]
    pub output: Option<OutputProgram>,

    /// Explicit location of the output program
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

impl PlaybackSettings {
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            history_limit: self.history_limit,
            command_buffer: self.command_buffer,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `stereo.toml` in the
    /// working directory is read if present. Environment variables override
    /// both, e.g. `STEREO_PLAYBACK__HISTORY_LIMIT=20`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("STEREO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(settings)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Self::build(config::Config::builder().add_source(config::File::from_str(
            contents,
            config::FileFormat::Toml,
        )))
    }

    fn build(settings: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.poll_interval_ms == 0 {
            return Err(ServerError::Config(
                "playback.poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.playback.command_buffer == 0 {
            return Err(ServerError::Config(
                "playback.command_buffer must be greater than zero".to_string(),
            ));
        }

        if let Some(path) = &self.playback.output_path {
            if !path.exists() {
                return Err(ServerError::Config(format!(
                    "Output program not found at {:?}",
                    path
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./stereo.db".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        history_limit: default_history_limit(),
        poll_interval_ms: default_poll_interval_ms(),
        output: None,
        output_path: None,
        command_buffer: default_command_buffer(),
    }
}

fn default_history_limit() -> usize {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_command_buffer() -> usize {
    32
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            playback: default_playback(),
        }
    }
}

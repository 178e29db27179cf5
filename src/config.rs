//! Configuration management for the chat server
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `CHAT_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5500;
const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Server configuration, loaded once at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface the listener binds to.
    /// Environment: CHAT_BIND_ADDRESS
    pub bind_address: String,

    /// TCP port the listener binds to. `0` asks the OS for a free port.
    /// Environment: CHAT_PORT
    pub port: u16,

    /// Maximum bytes taken from one receive, for the name reply as well as
    /// for chat chunks.
    /// Environment: CHAT_BUFFER_SIZE
    pub buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `./config.toml` (if present) with environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (extension optional, file optional)
    /// layered over the defaults, then apply `CHAT_*` environment overrides.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("buffer_size", DEFAULT_BUFFER_SIZE as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("CHAT").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Message("bind_address cannot be empty".into()));
        }

        if self.buffer_size == 0 {
            return Err(ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

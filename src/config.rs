//! Runtime configuration.
//!
//! Sources, later ones winning:
//! 1. `.env` (development only, loaded into the process environment)
//! 2. optional `chat-relay.toml` in the working directory
//! 3. `CHAT_RELAY__*` environment variables, `__` separating nested keys
//!
//! `CHAT_RELAY__AGENT__AGENT_ALIAS_ID=TSTALIASID` -> `agent.agent_alias_id`

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::services::prompt::PromptStyle;

pub const DEFAULT_FALLBACK_REPLY: &str =
    "I received your message. How can I help you with your musical development?";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub students: StudentSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_region")]
    pub region: String,
    pub agent_id: Option<String>,
    /// Selects the deployed agent version (draft vs. published).
    pub agent_alias_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Substituted when the agent streams nothing back. Empty disables the substitution.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    /// Unset means each entry point uses its own historical layout.
    pub prompt_style: Option<PromptStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentSettings {
    /// JSON roster; the built-in demo roster is used when unset.
    pub path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            agent_id: None,
            agent_alias_id: None,
            timeout_secs: default_timeout_secs(),
            fallback_reply: default_fallback_reply(),
            prompt_style: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("chat-relay").required(false))
            .add_source(config::Environment::with_prefix("CHAT_RELAY").separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero"));
        }
        if self.agent.timeout_secs == 0 {
            return Err(ConfigError::Invalid("agent.timeout_secs must be non-zero"));
        }
        if self.agent.agent_id.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingRequired("agent.agent_id"));
        }
        if self.agent.agent_alias_id.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingRequired("agent.agent_alias_id"));
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid("server.host is not an IP address"))
    }
}

impl AgentSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

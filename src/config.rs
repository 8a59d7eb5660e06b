use crate::error::{KanbanError, Result};

/// Configuration for the kanban server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    const HOST_VAR: &'static str = "KANBAN_HOST";
    const PORT_VAR: &'static str = "KANBAN_PORT";

    /// Reads `KANBAN_HOST` / `KANBAN_PORT`, falling back to the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup(Self::HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(Self::PORT_VAR) {
            config.port = port.trim().parse().map_err(|_| {
                KanbanError::ConfigError(format!("{} is not a valid port: {}", Self::PORT_VAR, port))
            })?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Server configuration loaded from environment variables.

use std::env;

/// HTTP server bind configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    /// Read `SERVER_HOST` and `SERVER_PORT` from the environment,
    /// falling back to `127.0.0.1:8080`.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| "SERVER_PORT must be a valid port number".to_string())?;
        Ok(Self { host, port })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! HTTP listener configuration.

use anyhow::Context;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,
    /// Port to bind to (default: 5000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl HttpConfig {
    /// Read `HOST` and `PORT` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HttpConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HttpConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, HttpConfig::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn port_from_environment() {
        let config = HttpConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_string()),
            "HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = HttpConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "dns-repeater.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns-repeater/config.toml";

/// Main configuration structure for the DNS repeater
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (DNS and SOCKS ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-repeater.toml in current directory
    /// 3. /etc/dns-repeater/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.socks_port {
            self.server.socks_port = port;
        }
        if let Some(workers) = overrides.worker_threads {
            self.resolver.worker_threads = workers;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.socks_port == 0 {
            return Err(ConfigError::Validation("SOCKS port cannot be 0".to_string()));
        }

        if self.resolver.worker_threads == 0 {
            return Err(ConfigError::Validation(
                "Resolver worker pool needs at least one thread".to_string(),
            ));
        }

        if self.resolver.strip_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "strip_timeout_ms cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn dns_bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.dns_port)
    }

    pub fn socks_bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.socks_port)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub socks_port: Option<u16>,
    pub worker_threads: Option<usize>,
    pub log_level: Option<String>,
}

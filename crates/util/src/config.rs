use std::{env, fmt, net::SocketAddr, str::FromStr};

use url::Url;

use crate::{DEFAULT_API_URL, DEFAULT_BIND_ADDR};

const ENV_APP_ENV: &str = "APP_ENV";
const ENV_BIND_ADDR: &str = "APP_BIND_ADDR";
const ENV_API_URL: &str = "API_URL";

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Returns the canonical name used for logging labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    /// Root of the glossary API both list views read from.
    pub api_base_url: Url,
}

impl AppConfig {
    /// Reads and validates `APP_ENV`, `APP_BIND_ADDR` and `API_URL`.
    ///
    /// Unset or blank variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match non_blank_var(ENV_APP_ENV) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };
        let bind_addr = non_blank_var(ENV_BIND_ADDR)
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(ConfigError::BindAddress)?;
        let api_base_url = Url::parse(
            non_blank_var(ENV_API_URL)
                .as_deref()
                .unwrap_or(DEFAULT_API_URL),
        )
        .map_err(ConfigError::ApiUrl)?;

        Ok(Self {
            bind_addr,
            environment,
            api_base_url,
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    BindAddress(std::net::AddrParseError),
    ApiUrl(url::ParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "{ENV_APP_ENV} must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::BindAddress(err) => write!(f, "invalid {ENV_BIND_ADDR} value: {err}"),
            Self::ApiUrl(err) => write!(f, "invalid {ENV_API_URL} value: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

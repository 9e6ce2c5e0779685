//! Process configuration loaded from environment variables.
//!
//! | Variable              | Default                 | Description                        |
//! |-----------------------|-------------------------|------------------------------------|
//! | `SERVER_PORT`         | `8080`                  | Gateway listen port                |
//! | `LOGGER_FORMAT`       | `text`                  | `text` or `json`                   |
//! | `LOGGER_LEVEL`        | `info`                  | tracing filter, e.g. `cartographer=debug,info` |
//! | `NEO4J_ADDRESS`       | `bolt://localhost:7687` | Store address                      |
//! | `NEO4J_USERNAME`      | `neo4j`                 |                                    |
//! | `NEO4J_PASSWORD`      | empty                   |                                    |
//! | `NEO4J_MAX_CONN_POOL` | `50`                    | Max pooled connections             |
//! | `NEO4J_ENCRYPTED`     | `false`                 | TLS to the store                   |
//! | `NEO4J_LOG_ENABLED`   | `false`                 | Driver-level logging               |
//! | `NEO4J_LOG_LEVEL`     | `0`                     | Driver log verbosity               |

pub const SERVICE_NAME: &str = "Cartographer";

/// Page size for collection lookups when the caller gives none.
pub const DEFAULT_LIMIT: u64 = 25;
pub const DEFAULT_OFFSET: u64 = 0;

pub const ENV_SERVER_PORT: &str = "SERVER_PORT";
pub const ENV_LOGGER_FORMAT: &str = "LOGGER_FORMAT";
pub const ENV_LOGGER_LEVEL: &str = "LOGGER_LEVEL";
pub const ENV_NEO4J_ADDRESS: &str = "NEO4J_ADDRESS";
pub const ENV_NEO4J_USERNAME: &str = "NEO4J_USERNAME";
pub const ENV_NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";
pub const ENV_NEO4J_MAX_CONN_POOL: &str = "NEO4J_MAX_CONN_POOL";
pub const ENV_NEO4J_ENCRYPTED: &str = "NEO4J_ENCRYPTED";
pub const ENV_NEO4J_LOG_ENABLED: &str = "NEO4J_LOG_ENABLED";
pub const ENV_NEO4J_LOG_LEVEL: &str = "NEO4J_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub format: LogFormat,
    /// Tracing filter string.
    pub level: String,
}

/// Connection settings for the store driver.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub address: String,
    pub username: String,
    pub password: String,
    pub max_conn_pool: usize,
    pub encrypted: bool,
    pub log_enabled: bool,
    pub log_level: u8,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("max_conn_pool", &self.max_conn_pool)
            .field("encrypted", &self.encrypted)
            .field("log_enabled", &self.log_enabled)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_port: u16,
    pub logger: LoggerConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Loads configuration from the process environment, applying defaults
    /// where a variable is absent or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        Self {
            server_port: parse_or(&lookup, ENV_SERVER_PORT, 8080),
            logger: LoggerConfig {
                format: LogFormat::parse(&text(ENV_LOGGER_FORMAT, "text")),
                level: text(ENV_LOGGER_LEVEL, "info"),
            },
            store: StoreConfig {
                address: text(ENV_NEO4J_ADDRESS, "bolt://localhost:7687"),
                username: text(ENV_NEO4J_USERNAME, "neo4j"),
                password: text(ENV_NEO4J_PASSWORD, ""),
                max_conn_pool: parse_or(&lookup, ENV_NEO4J_MAX_CONN_POOL, 50),
                encrypted: flag(ENV_NEO4J_ENCRYPTED),
                log_enabled: flag(ENV_NEO4J_LOG_ENABLED),
                log_level: parse_or(&lookup, ENV_NEO4J_LOG_LEVEL, 0),
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

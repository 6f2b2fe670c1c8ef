//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use database::password::DEFAULT_HASH_COST;

/// Web server configuration.
///
/// Provider credentials are read by the clients themselves; this only covers
/// what the server needs to start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Insert the demo user and leads into an empty database.
    pub seed_demo_data: bool,
    /// bcrypt cost for new passwords.
    pub password_hash_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `COACH_ADDR` | Server bind address | `127.0.0.1:5000` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:lovecoach.db?mode=rwc` |
    /// | `SEED_DEMO_DATA` | Seed demo data into an empty database | `true` |
    /// | `PASSWORD_HASH_COST` | bcrypt cost (4 to 31) | `12` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("COACH_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:lovecoach.db?mode=rwc".to_string());

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let password_hash_cost = match env::var("PASSWORD_HASH_COST") {
            Ok(raw) => parse_hash_cost(&raw)?,
            Err(_) => DEFAULT_HASH_COST,
        };

        Ok(Self {
            addr,
            database_url,
            seed_demo_data,
            password_hash_cost,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn parse_hash_cost(value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|cost| (4..=31).contains(cost))
        .ok_or_else(|| ConfigError::InvalidHashCost(value.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid COACH_ADDR format")]
    InvalidAddr,

    #[error("Invalid PASSWORD_HASH_COST: {0} (expected 4 to 31)")]
    InvalidHashCost(String),
}

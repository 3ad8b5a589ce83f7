use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::ConfigError;
use crate::models::access_code;

pub struct Config {
    pub database_path: String,
    pub code_length: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            database_path: try_load("RSVP_DATABASE", "rsvp.db")?,
            code_length: try_load("RSVP_CODE_LENGTH", "8")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "rsvp.db".to_string(),
            code_length: access_code::DEFAULT_LENGTH,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

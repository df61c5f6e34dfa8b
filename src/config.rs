use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::search::client::API_BASE;
use crate::search::transport::{default_user_agent, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub api_base: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            api_base: lookup("FINNA_API_BASE").unwrap_or(defaults.api_base),
            timeout_secs: match lookup("FINNA_TIMEOUT_SECS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("FINNA_TIMEOUT_SECS must be an integer, got '{}'", raw))?,
                None => defaults.timeout_secs,
            },
            user_agent: lookup("FINNA_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

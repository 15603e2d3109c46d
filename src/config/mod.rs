use std::env;

use anyhow::{anyhow, Context};

use crate::discord::gateway::DISCORD_GATEWAY_URL;
use crate::discord::rest::DISCORD_API_BASE;
use crate::football::client::API_FOOTBALL_BASE;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_MAX_ADDITIONAL: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Secrets
    pub discord_token: String,
    pub api_football_key: String,

    // Upstreams
    pub api_football_base_url: String,
    pub discord_api_base: String,
    pub discord_gateway_url: String,

    // Commands
    pub command_prefix: String,
    pub max_additional_predictions: u32,

    // Ops HTTP server
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            api_football_key: required("API_FOOTBALL_KEY")?,

            api_football_base_url: or_default("API_FOOTBALL_BASE_URL", API_FOOTBALL_BASE),
            discord_api_base: or_default("DISCORD_API_BASE", DISCORD_API_BASE),
            discord_gateway_url: or_default("DISCORD_GATEWAY_URL", DISCORD_GATEWAY_URL),

            command_prefix: or_default("COMMAND_PREFIX", DEFAULT_PREFIX),
            max_additional_predictions: match lookup("MAX_ADDITIONAL_PREDICTIONS") {
                Some(v) => v
                    .parse()
                    .context("MAX_ADDITIONAL_PREDICTIONS must be a non-negative integer")?,
                None => DEFAULT_MAX_ADDITIONAL,
            },

            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8080").parse().context("PORT must be a port number")?,
        })
    }

    /// Presence text shown under the bot's name.
    pub fn activity(&self) -> String {
        format!("Predictions | {}help", self.command_prefix)
    }
}

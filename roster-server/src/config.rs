//! Environment-sourced server configuration.

use roster_core::Settings;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub default_settings: Settings,
    pub senior_default_settings: Settings,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("ROSTER_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let mut default_settings = match std::env::var("ROSTER_SETTINGS_JSON") {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(_) => Settings::default(),
        };
        let mut senior_default_settings = match std::env::var("ROSTER_SENIOR_SETTINGS_JSON") {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(_) => Settings::senior_defaults(),
        };

        if let Ok(raw) = std::env::var("ROSTER_SCHEDULER_TIME_LIMIT_SECONDS") {
            let seconds: u64 = raw.parse()?;
            default_settings.scheduler_time_limit_seconds = seconds;
            senior_default_settings.scheduler_time_limit_seconds = seconds;
        }
        if let Ok(raw) = std::env::var("ROSTER_SCHEDULER_RANDOM_SEED") {
            let seed: u64 = raw.parse()?;
            default_settings.scheduler_random_seed = seed;
            senior_default_settings.scheduler_random_seed = seed;
        }

        Ok(Self {
            bind_addr,
            default_settings,
            senior_default_settings,
        })
    }
}

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, loaded once at startup.
///
/// The original deployment hardcoded two different backend hosts across its
/// pages; here the base URL is a single environment-driven value so the same
/// build serves development and production.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the portal listens on.
    pub port: u16,

    /// Base URL of the remote feedback/certificate backend.
    pub backend_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORTAL_PORT", "3000"),
            backend_url: try_load("BACKEND_URL", "http://localhost:8000"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

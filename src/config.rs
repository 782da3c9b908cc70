//! Application configuration loaded from the environment.
//!
//! Every required value is read once at startup and missing values abort the
//! process with a clear error, so a misconfigured deployment never gets as far
//! as serving traffic with a half-working bot.

use crate::errors::{Error, Result};
use tracing::info;

/// Configuration shared by the web server and the Discord bot.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Hex-encoded Ed25519 public key for interaction signature checks.
    pub discord_public_key: String,
    /// Discord application (client) id, used for command registration.
    pub discord_client_id: String,
    /// Public base URL of the site, used to build entry links.
    pub base_url: String,
    /// Address the HTTP server binds to.
    pub bind_address: String,
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("{name} environment variable not set")))
}

/// Loads the full application configuration, failing fast on any missing
/// required variable. `HOST`/`PORT` are optional and default to
/// `0.0.0.0:8080`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config = AppConfig {
        mongodb_uri: required("MONGODB_URI")?,
        discord_public_key: required("DISCORD_PUBLIC_KEY")?,
        discord_client_id: required("DISCORD_CLIENT_ID")?,
        base_url: required("BASE_URL")?,
        bind_address: format!(
            "{}:{}",
            std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()),
        ),
    };
    info!("Loaded application configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = required("REPLDEX_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("REPLDEX_TEST_DEFINITELY_UNSET"));
    }
}

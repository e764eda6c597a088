use secrecy::Secret;
use serde::Deserialize;

use pulse_core::{LOCKOUT_THRESHOLD, LockoutPolicy};

use crate::security::JwtConfig;

/// Service settings, layered from defaults, an optional JSON file named by
/// `PULSE_CONFIG_FILE`, and `PULSE__`-prefixed environment variables
/// (`PULSE__JWT__SECRET`, `PULSE__DATABASE__URL`, ...).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub listen: ListenSettings,
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtSettings,
    pub lockout: LockoutSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListenSettings {
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LockoutSettings {
    pub max_failed_attempts: u32,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Missing .env is fine; env vars may come from the environment proper.
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .set_default("listen.address", "0.0.0.0:3000")?
            .set_default("jwt.token_ttl_in_seconds", 600)?
            .set_default("lockout.max_failed_attempts", LOCKOUT_THRESHOLD)?;

        if let Ok(path) = std::env::var("PULSE_CONFIG_FILE") {
            builder = builder.add_source(config::File::new(&path, config::FileFormat::Json));
        }

        builder
            .add_source(config::Environment::with_prefix("PULSE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl JwtSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            jwt_secret: self.secret.clone(),
            token_ttl_in_seconds: self.token_ttl_in_seconds,
        }
    }
}

impl LockoutSettings {
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy {
            max_failed_attempts: self.max_failed_attempts,
        }
    }
}

//! Server configuration from environment variables

use anyhow::{Context, bail};
use auth::AuthConfig;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct ServerConfig {
    pub port: u16,
    /// `None` runs on the in-memory credential store
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secrets` lets debug builds start without token secrets
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_random_secrets: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port.trim().parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let mut auth = match (var("JWT_ACCESS_SECRET"), var("JWT_REFRESH_SECRET")) {
            (Some(access), Some(refresh)) => AuthConfig::new(access, refresh)?,
            (None, None) if allow_random_secrets => {
                tracing::warn!("JWT secrets not set, using random development secrets");
                AuthConfig::development()
            }
            _ => bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must both be set"),
        };

        if let Some(secs) = var("ACCESS_TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("ACCESS_TOKEN_TTL_SECS must be a number of seconds")?;
            auth = auth.with_access_ttl(Duration::from_secs(secs));
        }
        if let Some(secs) = var("REFRESH_TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("REFRESH_TOKEN_TTL_SECS must be a number of seconds")?;
            auth = auth.with_refresh_ttl(Duration::from_secs(secs));
        }
        if let Some(cost) = var("BCRYPT_COST") {
            let cost: u32 = cost.trim().parse().context("BCRYPT_COST must be a number")?;
            // AuthConfig refuses costs below the production floor
            auth = auth.with_bcrypt_cost(cost)?;
        }

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port,
            database_url: var("DATABASE_URL"),
            frontend_origins,
            auth,
        })
    }
}

//! Central module for application-wide configuration settings.
//!
//! This module handles loading the configuration parameters the server needs
//! at startup: the session signing secret, database location and pool sizing,
//! password hashing cost, cookie policy and the listening port.

use crate::utils::password::{MAX_COST, MIN_COST};
use anyhow::{Context, Result, bail};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// A missing `JWT_SECRET` is an error: the server must never fall back to a
    /// default signing key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let database_url = var_or("DATABASE_URL", "sqlite://database.db");

        let max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = var_or("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let bcrypt_cost = var_or("BCRYPT_COST", "10")
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between {} and {}", MIN_COST, MAX_COST);
        }

        let cookie_secure = var_or("COOKIE_SECURE", "true")
            .parse::<bool>()
            .context("COOKIE_SECURE must be true or false")?;

        let server_port = var_or("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            bcrypt_cost,
            cookie_secure,
            server_port,
        })
    }
}

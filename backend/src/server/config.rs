//! Environment-driven application configuration.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

use crate::domain::{Mode, UserAccount};

/// Default listen address, matching the deployed service.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Browser origins allowed by default when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:4200",
    "http://localhost:8080",
    "http://192.85.4.69:4200",
];

/// Application configuration resolved from the environment.
///
/// - `BIND_ADDR` — listen address, default `0.0.0.0:3000`.
/// - `DATABASE_URL` — PostgreSQL URL; when unset the server runs on
///   in-memory stores.
/// - `TOKEN_SECRET` / `TOKEN_SECRET_FILE` — signing secret for bearer
///   tokens; a generated secret is used in dev builds when neither is set.
/// - `CORS_ORIGINS` — comma-separated allowed origins.
/// - `DEV_USERS` — comma-separated `username:password` pairs seeded into the
///   in-memory user store.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub token_secret: String,
    pub cors_origins: Vec<String>,
    pub dev_users: Vec<(String, String)>,
}

impl AppConfig {
    /// Resolve the configuration from process environment variables.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let token_secret = resolve_token_secret()?;

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| (*s).to_owned()).collect(),
        };

        let dev_users = env::var("DEV_USERS")
            .map(|raw| parse_dev_users(&raw))
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            database_url,
            token_secret,
            cors_origins,
            dev_users,
        })
    }

    /// Accounts to seed into the in-memory user store, mode 0.
    pub fn dev_accounts(&self) -> Vec<UserAccount> {
        self.dev_users
            .iter()
            .map(|(username, password)| UserAccount::new(username, password, Mode::ZERO))
            .collect()
    }
}

fn resolve_token_secret() -> std::io::Result<String> {
    if let Ok(secret) = env::var("TOKEN_SECRET") {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }
    if let Ok(path) = env::var("TOKEN_SECRET_FILE") {
        return std::fs::read_to_string(&path)
            .map(|secret| secret.trim().to_owned())
            .map_err(|err| {
                std::io::Error::other(format!("failed to read token secret at {path}: {err}"))
            });
    }
    let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
    if cfg!(debug_assertions) || allow_dev {
        warn!("using generated token secret (dev only); tokens will not survive restarts");
        Ok(uuid::Uuid::new_v4().to_string())
    } else {
        Err(std::io::Error::other(
            "TOKEN_SECRET or TOKEN_SECRET_FILE must be set",
        ))
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_dev_users(raw: &str) -> Vec<(String, String)> {
    parse_list(raw)
        .into_iter()
        .filter_map(|entry| {
            let (username, password) = entry.split_once(':')?;
            Some((username.to_owned(), password.to_owned()))
        })
        .collect()
}

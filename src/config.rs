use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use log::warn;
use tokio_postgres::NoTls;

/// Signing secret used when `JWT_SECRET` is absent outside production.
/// Tokens signed with it are forgeable by anyone who reads this source.
pub const INSECURE_DEV_SECRET: &str = "dev-insecure-jwt-secret-do-not-use-in-production";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const POOL_MAX_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") || v.eq_ignore_ascii_case("prod") => {
                Environment::Production
            }
            _ => Environment::Development,
        }
    }
}

/// Everything the process reads from its environment, built once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub environment: Environment,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("APP_ENV"));

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .context("DATABASE_URL not set")?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                bail!("JWT_SECRET must be set when APP_ENV=production")
            }
            None => {
                warn!("JWT_SECRET not set, falling back to the insecure development secret");
                INSECURE_DEV_SECRET.to_string()
            }
        };

        let upload_dir = lookup("UPLOAD_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            upload_dir,
            allowed_origins,
            environment,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

pub fn get_pg_pool(database_url: &str) -> Result<Pool> {
    let pg_config = tokio_postgres::Config::from_str(database_url)
        .context("DATABASE_URL is not a valid postgres connection string")?;

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(manager)
        .max_size(POOL_MAX_SIZE)
        .build()
        .context("failed to create postgres pool")
}

/// Hides the password part of a connection string before it reaches the log.
pub fn mask_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return "[REDACTED]".to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}

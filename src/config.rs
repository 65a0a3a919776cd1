use std::env;

use crate::models::date::NewCareDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Mount point of the JSON API; empty mounts at the root.
    pub api_prefix: String,
    pub cors_origins: CorsOrigins,
    pub seed_dates: Vec<NewCareDate>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown STORE_BACKEND: {other}"),
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("Missing required env var: DATABASE_URL");
        }

        Ok(Self {
            store_backend,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()?,
            api_prefix: normalize_prefix(
                &env::var("API_PREFIX").unwrap_or_else(|_| "/api".into()),
            ),
            cors_origins: parse_cors_origins(env::var("CORS_ORIGINS").ok().as_deref()),
            seed_dates: env::var("SEED_DATES")
                .ok()
                .map(|raw| parse_seed_dates(&raw))
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Configuration for tests and embedding: in-memory store, API at `/api`,
    /// CORS limited to the local dev frontend.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            api_prefix: "/api".into(),
            cors_origins: parse_cors_origins(None),
            seed_dates: Vec::new(),
        }
    }
}

/// Comma-separated exact origins; a `*` entry allows every origin.
pub fn parse_cors_origins(raw: Option<&str>) -> CorsOrigins {
    let origins: Vec<String> = match raw {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect(),
        _ => vec![
            "http://localhost:5173".into(),
            "http://127.0.0.1:5173".into(),
        ],
    };
    if origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

fn parse_seed_dates(raw: &str) -> anyhow::Result<Vec<NewCareDate>> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(NewCareDate::parse_seed)
        .collect()
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

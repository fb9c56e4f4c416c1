// src/config.rs
use crate::geo::nominatim::DEFAULT_BASE_URL;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite file path.
    pub db_path: String,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub max_workers: usize,
    /// When `None` a random key is generated at start-up.
    pub admin_key: Option<String>,
    pub geocoder_url: String,
    pub geocoder_disabled: bool,
    /// Quiet window before a location lookup is issued.
    pub debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "inmobiliaria.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            admin_key: None,
            geocoder_url: DEFAULT_BASE_URL.to_string(),
            geocoder_disabled: false,
            debounce: Duration::from_millis(300),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; bad values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("INMOBILIARIA_DB") {
            cfg.db_path = v;
        }
        if let Some(v) = get("INMOBILIARIA_SCHEMA") {
            cfg.schema_path = v;
        }
        if let Some(v) = parsed(get("INMOBILIARIA_ADDR"), "INMOBILIARIA_ADDR") {
            cfg.addr = v;
        }
        if let Some(v) = parsed::<usize>(get("INMOBILIARIA_WORKERS"), "INMOBILIARIA_WORKERS") {
            if v > 0 {
                cfg.max_workers = v;
            } else {
                warn!("INMOBILIARIA_WORKERS must be positive, keeping default");
            }
        }
        cfg.admin_key = get("INMOBILIARIA_ADMIN_KEY");
        if let Some(v) = get("INMOBILIARIA_GEOCODER_URL") {
            cfg.geocoder_url = v;
        }
        if let Some(v) = get("INMOBILIARIA_GEOCODER_DISABLED") {
            cfg.geocoder_disabled = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(ms) = parsed::<u64>(get("INMOBILIARIA_DEBOUNCE_MS"), "INMOBILIARIA_DEBOUNCE_MS") {
            cfg.debounce = Duration::from_millis(ms);
        }
        cfg
    }
}

fn parsed<T: FromStr>(raw: Option<String>, key: &str) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "invalid setting, keeping default");
            None
        }
    }
}

// src/lifecycle.rs
//
// Per-visitor application state, read once per request and passed down
// explicitly to the pages that need it.

use astra::Request;
use std::collections::HashMap;

pub const VISITED_KEY: &str = "visitado";

/// Minimal key-value persistence the app needs about a visitor.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: &str);
}

/// Cookie-backed store: reads the request `Cookie` header, and collects
/// `Set-Cookie` values for the response.
#[derive(Debug, Default)]
pub struct CookieStore {
    values: HashMap<String, String>,
    outgoing: Vec<String>,
}

impl CookieStore {
    pub fn from_request(req: &Request) -> Self {
        let header = req
            .headers()
            .get("Cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        Self::from_header(header)
    }

    pub fn from_header(header: &str) -> Self {
        let values = header
            .split(';')
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=')?;
                let k = k.trim();
                (!k.is_empty()).then(|| (k.to_string(), v.trim().to_string()))
            })
            .collect();
        Self {
            values,
            outgoing: Vec::new(),
        }
    }

    /// `Set-Cookie` header values queued by `set`.
    pub fn set_cookie_headers(&self) -> &[String] {
        &self.outgoing
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.outgoing.push(format!(
            "{key}={value}; Path=/; Max-Age=31536000; HttpOnly; SameSite=Lax"
        ));
    }
}

/// Lifecycle facts handed to the root layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLifecycle {
    /// Show the intro splash.
    pub first_visit: bool,
}

impl AppLifecycle {
    /// Reads the visited flag and records the visit for next time.
    pub fn start(store: &mut impl KeyValueStore) -> Self {
        let first_visit = store.get(VISITED_KEY) != Some("1");
        if first_visit {
            store.set(VISITED_KEY, "1");
        }
        Self { first_visit }
    }

    pub fn returning() -> Self {
        Self { first_visit: false }
    }
}

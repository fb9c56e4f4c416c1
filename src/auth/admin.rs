// src/auth/admin.rs
use crate::errors::ServerError;
use crate::lifecycle::{CookieStore, KeyValueStore};
use astra::Request;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const ADMIN_COOKIE: &str = "admin_key";
pub const ADMIN_HEADER: &str = "X-Admin-Key";

const GENERATED_KEY_BYTES: usize = 24;

/// Generate a URL-safe admin key from random bytes (Base64 URL-safe, no padding).
pub fn generate_key<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Hash a key using SHA-256. Only the hash is kept in memory.
pub fn hash_key(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Constant-time-ish compare for hashes (simple and sufficient here).
pub fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Guards the admin CRUD routes with a single shared key.
#[derive(Debug, Clone)]
pub struct AdminGate {
    key_hash: [u8; 32],
}

impl AdminGate {
    pub fn new(key: &str) -> Self {
        Self {
            key_hash: hash_key(key),
        }
    }

    /// Uses the configured key, or generates one. The generated key is
    /// returned so the caller can log it once.
    pub fn from_config(key: Option<&str>) -> (Self, Option<String>) {
        match key {
            Some(k) => (Self::new(k), None),
            None => {
                let generated = generate_key(&mut OsRng, GENERATED_KEY_BYTES);
                (Self::new(&generated), Some(generated))
            }
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        !candidate.is_empty() && hashes_equal(&hash_key(candidate), &self.key_hash)
    }

    /// Accepts the key from the `X-Admin-Key` header or the `admin_key` cookie.
    pub fn authorize(&self, req: &Request) -> Result<(), ServerError> {
        let from_header = req
            .headers()
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let cookies = CookieStore::from_request(req);
        let from_cookie = cookies.get(ADMIN_COOKIE).map(str::to_string);

        let ok = from_header
            .into_iter()
            .chain(from_cookie)
            .any(|k| self.verify(&k));

        if ok {
            Ok(())
        } else {
            Err(ServerError::Unauthorized("admin key required".into()))
        }
    }

    /// `Set-Cookie` value after a successful login form.
    pub fn login_cookie(key: &str) -> String {
        format!("{ADMIN_COOKIE}={key}; Path=/; HttpOnly; SameSite=Strict")
    }
}

use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::auth::admin::ADMIN_HEADER;
use crate::db::{ListingStore, SqliteListings};
use crate::domain::listing::NewListing;
use crate::router::AppContext;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_ADMIN_KEY: &str = "clave-de-prueba";

/// A fresh SQLite file under the temp dir, unique per call.
pub fn temp_db(prefix: &str) -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "{prefix}_{}_{nanos}.sqlite",
        std::process::id()
    ));
    Database::new(path.to_string_lossy().to_string())
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> Database {
    let db = temp_db("inmobiliaria_test");
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// App context over a fresh DB, geocoding disabled, known admin key.
pub fn init_test_app() -> AppContext {
    let cfg = AppConfig {
        admin_key: Some(TEST_ADMIN_KEY.to_string()),
        geocoder_disabled: true,
        ..AppConfig::default()
    };
    AppContext::from_config(&cfg, init_test_db())
        .unwrap_or_else(|e| panic!("App context failed: {e}"))
}

/// Stores a listing through the admin store and returns its id.
pub fn seed(app: &AppContext, input: &NewListing) -> i64 {
    SqliteListings::admin(&app.db)
        .create(input)
        .unwrap_or_else(|e| panic!("seeding '{}' failed: {e}", input.title))
        .id
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str, admin_key: Option<&str>) -> Request {
    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(key) = admin_key {
        builder = builder.header(ADMIN_HEADER, key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn read_body(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

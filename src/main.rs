use astra::Server;
use inmobiliaria::config::AppConfig;
use inmobiliaria::db::connection::{init_db, Database};
use inmobiliaria::router::{handle, AppContext};
use inmobiliaria::templates;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Subscriber first, so config warnings are not lost
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();

    // 1️⃣ Create the database handle
    let db = Database::new(cfg.db_path.clone());

    // 2️⃣ Initialize database from schema.sql
    if let Err(e) = init_db(&db, &cfg.schema_path) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let ctx = match AppContext::from_config(&cfg, db) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    info!(addr = %cfg.addr, workers = cfg.max_workers, "starting server");
    let server = Server::bind(&cfg.addr).max_workers(cfg.max_workers);

    // 4️⃣ Serve requests, sharing the app context across workers
    let result = server.serve(move |req, _info| match handle(req, &ctx) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}

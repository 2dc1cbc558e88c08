use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

mod api;
mod config;
mod db;
mod error;
mod shutdown;

use crate::api::auth::AuthKeys;
use crate::api::health::health_config;
use crate::api::job::job_config;
use crate::api::validation;
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config::Config {
        database_url,
        secret_key,
        bind_address,
        bind_port,
        max_payload_size,
        max_db_connections,
        log_dir,
    } = config::Config::from_env().expect("Failed to load configuration");

    std::fs::create_dir_all(&log_dir).expect("Failed to create logs directory");

    // Console output plus daily-rotating info/error files.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    info!("Starting jobboard");
    info!("  - Max payload size: {} bytes", max_payload_size);
    info!("  - Max database connections: {}", max_db_connections);

    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .expect("Failed to connect to database");
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let server_pool = pool.clone();
    let server_secret = secret_key.clone();

    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(AuthKeys::from_secret(&server_secret)))
            .app_data(payload_config)
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .configure(health_config)
            .configure(job_config)
    });

    info!("Server starting on http://{}:{}", bind_address, bind_port);

    let server = server.bind((bind_address.as_str(), bind_port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);
    coordinator.wait_for_shutdown().await
}

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod ingest;
mod model;
mod payroll;
mod routes;
mod store;
mod utils;

use config::Config;
use store::mysql::MySqlStore;

use crate::docs::ApiDoc;
use crate::utils::employee_cache;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Payslip portal API"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = db::db_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let store = MySqlStore::new(pool.clone());

    let pool_for_cache_warmup = pool.clone();
    let warmup_batch = config.cache_warmup_batch;
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    actix_web::rt::spawn(async move {
        if let Err(e) = employee_cache::warmup_mobile_cache(&pool_for_cache_warmup, warmup_batch).await
        {
            eprintln!("Failed to warmup employee mobile cache: {:?}", e);
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            // Workbook uploads and large bulk payloads exceed the
            // extractor defaults.
            .app_data(actix_web::web::PayloadConfig::new(10 * 1024 * 1024))
            .app_data(actix_web::web::JsonConfig::default().limit(10 * 1024 * 1024))
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}

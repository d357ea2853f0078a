use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use taskhub::auth::TokenConfig;
use taskhub::config::Config;
use taskhub::error;
use taskhub::routes;
use taskhub::store::{CategoryStore, PgStore, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // One concrete store behind three per-entity trait objects.
    let store = Arc::new(PgStore::new(pool));
    let user_store: Arc<dyn UserStore> = store.clone();
    let task_store: Arc<dyn TaskStore> = store.clone();
    let category_store: Arc<dyn CategoryStore> = store;

    log::info!("Starting TaskHub server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .app_data(web::Data::from(category_store.clone()))
            .app_data(web::Data::new(TokenConfig {
                secret: config.jwt_secret.clone(),
            }))
            .app_data(error::json_config())
            .app_data(error::query_config())
            .app_data(error::path_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::index)
            .service(routes::health::health)
            .service(
                web::scope("/api").configure(|cfg| routes::config(cfg, &config.jwt_secret)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}

use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use pointpool_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::IdentityService,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let identity_service = IdentityService::new(config.identity.clone());

    let user_service = UserService::new(pool.clone());
    let allocation_service = AllocationService::new(pool.clone());
    let distribution_service = DistributionService::new(pool.clone());
    let item_service = ItemService::new(pool.clone());
    let notification_service = NotificationService::new(pool.clone());
    let analytics_service = AnalyticsService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(
                identity_service.clone(),
                user_service.clone(),
            ))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(allocation_service.clone()))
            .app_data(web::Data::new(distribution_service.clone()))
            .app_data(web::Data::new(item_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(analytics_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::user_config)
                    .configure(handlers::allocation_config)
                    .configure(handlers::distribution_config)
                    .configure(handlers::item_config)
                    .configure(handlers::notification_config)
                    .configure(handlers::analytics_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}

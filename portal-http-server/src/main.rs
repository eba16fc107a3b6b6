use log::info;
use std::env;

pub(crate) mod router;

use actix_web::{middleware::Logger, web, App, HttpServer};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Logger initialized at log level: {}", log_level);

    if let Err(e) = portal_database::setup().await {
        panic!("Failed to setup database connection: {}", e);
    }

    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .service(router::health)
            .service(
                web::scope("/api")
                    .service(router::research::list)
                    .service(router::research::create)
                    .service(router::research::edit)
                    .service(router::research::view)
                    .service(router::research::notify)
                    .service(router::research::analytics)
                    .service(router::institution::list)
                    .service(router::institution::activate)
                    .service(router::school::list)
                    .service(router::request::list)
                    .service(router::comment::list),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}

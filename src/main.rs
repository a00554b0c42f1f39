use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

mod config;
mod db;
mod handlers;
mod models;
mod validation;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = config::Config::from_env();

    log::info!("Connecting to database...");
    let pool = db::build_pool(&config);
    db::ping(&pool).await;

    // Schema is applied on a best-effort basis: an unreachable database is
    // logged here and every later query fails on its own.
    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        log::error!("Failed to apply migrations: {err}");
    }

    log::info!("Starting server at http://localhost:{}", config.port);

    let pool_data = web::Data::new(pool.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error))
            .wrap(
                middleware::ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, handlers::render_server_error),
            )
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .service(
                web::scope("/api")
                    .route("", web::get().to(handlers::health::index))
                    .route("/contact", web::post().to(handlers::contact::submit))
                    .route("/register", web::post().to(handlers::register::submit))
                    .route(
                        "/reservations/lookup",
                        web::post().to(handlers::reservations::lookup),
                    )
                    .route("/reservations", web::post().to(handlers::reservations::create)),
            )
    })
    .bind(("0.0.0.0", config.port))?
    .run();

    // Post-listen connectivity check, mirrors the one before bind.
    let ping_pool = pool.clone();
    actix_web::rt::spawn(async move {
        db::ping(&ping_pool).await;
    });

    server.await
}

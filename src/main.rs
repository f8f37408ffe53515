use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use shop_backend::config::Settings;
use shop_backend::db;
use shop_backend::handlers::{self, AppState};
use shop_backend::AppError;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();
}

async fn start_server(settings: Settings) -> Result<(), AppError> {
    let pool = db::init_pool(&settings.database)?;
    db::run_migrations(&pool)?;
    std::fs::create_dir_all(&settings.media.root)?;

    let media = settings.media.clone();
    let app_state = web::Data::new(AppState { pool, media: media.clone() });
    let bind = (settings.server.host.clone(), settings.server.port);

    tracing::info!(host = %bind.0, port = bind.1, media_root = %media.root, "starting HTTP server");
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(media.max_upload_bytes))
            .configure(handlers::configure)
            .service(Files::new(media.url.trim_end_matches('/'), &media.root))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenv::dotenv().ok();
    init_tracing();

    let settings = Settings::load()?;
    if let Err(err) = start_server(settings).await {
        tracing::error!(error = %err, "server stopped");
        return Err(err);
    }
    Ok(())
}

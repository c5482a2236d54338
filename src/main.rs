use actix_web::{web, App, HttpServer};
use imagenkit::server::{routes, AppState};
use imagenkit::{Config, GoogleClient, ImageStore};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    imagenkit::logger::init_with_config(
        imagenkit::logger::LoggerConfig::development()
            .with_level(imagenkit::logger::LogLevel::Debug),
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    log::info!("🔍 Checking Google AI environment...");

    // Check the credential without printing the actual value for security.
    match env::var("GOOGLE_AI_API_KEY") {
        Ok(key) => {
            log::info!("✅ Google AI API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  GOOGLE_AI_API_KEY not set, remote calls will fail as NotConfigured");
        }
    }

    let config = Config::from_env();
    imagenkit::logger::log_config_info(&config);

    let google = GoogleClient::new(config.google.clone());
    let store = ImageStore::new(&config.storage);
    let state = web::Data::new(AppState::new(google, store));

    let port = config.port();
    imagenkit::logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        port,
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(("127.0.0.1", port))?
        .run()
        .await
}

mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use crate::config::{get_pg_pool, mask_database_url, AppConfig};
use crate::repositories::health_repository::{HealthRepository, PgHealthRepository};
use crate::repositories::post_repository::{PgPostRepository, PostRepository};
use crate::repositories::user_repository::PgUserRepository;
use crate::services::auth_services::AuthService;
use crate::services::password::hash_password;
use crate::services::token_service::TokenService;
use crate::services::upload_service::UploadStore;

/// Everything a handler needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub posts: Arc<dyn PostRepository>,
    pub health: Arc<dyn HealthRepository>,
    pub uploads: UploadStore,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // `social-feed-be hash-password <plaintext>` prints a digest for seeding users.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("hash-password") {
        let Some(plain) = args.get(2) else {
            let program = args.first().map(String::as_str).unwrap_or("social-feed-be");
            eprintln!("usage: {} hash-password <plaintext>", program);
            std::process::exit(2);
        };
        return match hash_password(plain, None).await {
            Ok(digest) => {
                println!("{}", digest);
                Ok(())
            }
            Err(e) => Err(std::io::Error::other(e.to_string())),
        };
    }

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Environment: {:?}", config.environment);
    info!("Database: {}", mask_database_url(&config.database_url));

    let pg_pool = match get_pg_pool(&config.database_url) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = repositories::ensure_schema(&pg_pool).await {
        error!("Failed to prepare database schema: {}", e);
        std::process::exit(1);
    }

    let tokens = TokenService::new(&config.jwt_secret);
    let state = web::Data::new(AppState {
        auth: AuthService::new(Arc::new(PgUserRepository::new(pg_pool.clone())), tokens),
        posts: Arc::new(PgPostRepository::new(pg_pool.clone())),
        health: Arc::new(PgHealthRepository::new(pg_pool)),
        uploads: UploadStore::new(config.upload_dir.clone()),
    });

    std::fs::create_dir_all(state.uploads.dir())?;

    let bind_address = config.bind_address();
    let allowed_origins = config.allowed_origins.clone();
    let upload_dir = config.upload_dir.clone();

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| handlers::configure(cfg, &upload_dir))
    })
    .bind(&bind_address)?
    .run()
    .await
}

pub mod auth_handlers;
pub mod health_handlers;
pub mod post_handlers;

#[cfg(test)]
pub mod test_support;

use std::path::Path;

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::errors::ApiError;
use crate::services::upload_service::PUBLIC_PREFIX;

const MULTIPART_TOTAL_LIMIT: usize = 6 * 1024 * 1024;

/// Registers every route plus the JSON/multipart error mapping.
pub fn configure(cfg: &mut web::ServiceConfig, upload_dir: &Path) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        MultipartFormConfig::default()
            .total_limit(MULTIPART_TOTAL_LIMIT)
            .error_handler(|err, _req| ApiError::Upload(err.to_string()).into()),
    )
    .service(health_handlers::status)
    .service(auth_handlers::login)
    .service(post_handlers::list_posts)
    .service(post_handlers::create_post)
    .service(Files::new(PUBLIC_PREFIX, upload_dir));
}

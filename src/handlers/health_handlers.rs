use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use crate::dtos::api_response::ApiResponse;
use crate::errors::ApiError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOut {
    pub db_time: DateTime<Utc>,
    pub project_status: String,
}

/// GET /
/// Liveness plus a store round-trip.
#[get("/")]
pub async fn status(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db_time = state.health.db_time().await.map_err(|e| {
        error!("database check failed: {}", e);
        match e {
            ApiError::Store(msg) => ApiError::Store(format!("DB Connection Failed: {}", msg)),
            other => other,
        }
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Social feed backend live (database connected)",
        StatusOut {
            db_time,
            project_status: "Ready for posts, users, and image uploads".to_string(),
        },
    )))
}

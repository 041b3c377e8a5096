use actix_web::{post, web, HttpResponse};

use crate::dtos::api_response::ApiResponse;
use crate::dtos::auth::LoginIn;
use crate::errors::ApiError;
use crate::AppState;

/// POST /login
/// Exchanges email + password for the public user fields and a 7-day token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    let out = state.auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Login successful", out)))
}

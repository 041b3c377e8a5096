use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::{debug, error};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::AppState;

/// A request whose bearer token verified.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// `MissingToken` when there is no header or the bearer value is empty;
/// `InvalidToken` for anything else that does not look like a bearer token.
fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let Some(header) = req.headers().get("Authorization") else {
        return Err(ApiError::MissingToken);
    };
    let value = header.to_str().map_err(|_| ApiError::InvalidToken)?.trim();
    if value.is_empty() {
        return Err(ApiError::MissingToken);
    }

    let mut parts = value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::InvalidToken);
    }
    match parts.next().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::MissingToken),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            error!("AppState missing from app data");
            return ready(Err(ApiError::Internal("server misconfigured".to_string())));
        };

        let result = bearer_token(req)
            .and_then(|token| state.auth.verify_token(token))
            .map(|identity| AuthenticatedUser {
                user_id: identity.user_id,
                username: identity.username,
            });

        if let Err(e) = &result {
            debug!("auth rejected on {}: {}", req.path(), e);
        }
        ready(result)
    }
}

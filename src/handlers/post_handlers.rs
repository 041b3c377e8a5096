use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};

use crate::dtos::api_response::ApiResponse;
use crate::dtos::post::CreatePostForm;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::post::NewPost;
use crate::AppState;

/// POST /posts
/// Multipart `content` + optional `image`. Owner comes from the token only.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> Result<HttpResponse, ApiError> {
    let content = form
        .content
        .map(|text| text.0.trim().to_string())
        .unwrap_or_default();
    if content.is_empty() {
        return Err(ApiError::Validation("Content is required".to_string()));
    }

    let upload = match &form.image {
        Some(file) => state.uploads.save_temp_file(file).await?,
        None => None,
    };

    let new_post = NewPost {
        user_id: user.user_id,
        content,
        image_url: upload.as_ref().map(|u| u.public_url.clone()),
    };

    match state.posts.create_post(new_post).await {
        Ok(post) => {
            info!("{} ({}) created post {}", user.username, user.user_id, post.id);
            Ok(HttpResponse::Created().json(ApiResponse::success("Post created successfully", post)))
        }
        Err(e) => {
            error!("failed to create post for {}: {}", user.user_id, e);
            if let Some(upload) = &upload {
                state.uploads.remove(upload).await;
            }
            Err(e)
        }
    }
}

/// GET /posts
/// Every post with its author's username, newest first.
#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = state.posts.list_posts_with_authors().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", posts)))
}

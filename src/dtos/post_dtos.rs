use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};

/// Multipart body of `POST /posts`.
///
/// Any other part (a client-supplied `user_id`, for instance) is ignored; the
/// owner always comes from the verified token.
#[derive(MultipartForm)]
pub struct CreatePostForm {
    pub content: Option<Text<String>>,
    #[multipart(limit = "5 MiB")]
    pub image: Option<TempFile>,
}

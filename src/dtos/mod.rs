pub mod api_response;
pub mod auth_dtos;
pub mod post_dtos;
// alias so handlers can write `crate::dtos::auth` / `crate::dtos::post`
pub use auth_dtos as auth;
pub use post_dtos as post;

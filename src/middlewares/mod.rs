pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, AuthUser, require_user};
pub use cors::create_cors;

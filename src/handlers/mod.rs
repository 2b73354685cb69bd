pub mod admin;
pub mod allocation;
pub mod analytics;
pub mod distribution;
pub mod item;
pub mod notification;
pub mod user;

pub use admin::admin_config;
pub use allocation::allocation_config;
pub use analytics::analytics_config;
pub use distribution::distribution_config;
pub use item::item_config;
pub use notification::notification_config;
pub use user::user_config;

use actix_web::HttpResponse;
use serde_json::json;

/// Fallback for known resources hit with an unsupported method.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}

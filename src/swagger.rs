use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::get_me,
        handlers::allocation::allocate_points,
        handlers::allocation::get_allocations,
        handlers::distribution::create_distribution,
        handlers::distribution::list_distributions,
        handlers::distribution::get_distribution,
        handlers::distribution::update_distribution,
        handlers::distribution::delete_distribution,
        handlers::item::create_item,
        handlers::item::list_items,
        handlers::item::update_item,
        handlers::item::delete_item,
        handlers::notification::list_notifications,
        handlers::notification::mark_notifications_read,
        handlers::analytics::get_analytics,
        handlers::admin::list_users,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            DistributionStatus,
            CreateDistributionRequest,
            UpdateDistributionRequest,
            DistributionResponse,
            DistributionDetailResponse,
            CreateItemRequest,
            UpdateItemRequest,
            ItemResponse,
            ItemWithAllocations,
            AllocationStatus,
            AllocateRequest,
            AllocationResponse,
            AllocationWithContext,
            AllocationSummary,
            MarkReadRequest,
            MarkReadResponse,
            NotificationResponse,
            AnalyticsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Current user"),
        (name = "allocations", description = "Point allocation"),
        (name = "distributions", description = "Distribution management"),
        (name = "items", description = "Item management"),
        (name = "notifications", description = "Notifications"),
        (name = "analytics", description = "Admin analytics"),
        (name = "admin", description = "Admin user management"),
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

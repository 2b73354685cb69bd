use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::AnalyticsService;

#[utoipa::path(
    get,
    path = "/analytics",
    tag = "analytics",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participation and spend per distribution", body = AnalyticsResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn get_analytics(
    analytics_service: web::Data<AnalyticsService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;
    user.require_admin()?;

    match analytics_service.get_overview().await {
        Ok(overview) => Ok(HttpResponse::Ok().json(overview)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn analytics_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/analytics")
            .route(web::get().to(get_analytics))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::NotificationService;

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's notifications, newest first", body = [NotificationResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_notifications(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match notification_service.list_notifications(user.id).await {
        Ok(notifications) => Ok(HttpResponse::Ok().json(notifications)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/notifications/read",
    tag = "notifications",
    request_body = MarkReadRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Count of notifications marked read", body = MarkReadResponse),
        (status = 400, description = "Missing notification ids")
    )
)]
pub async fn mark_notifications_read(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
    request: web::Json<MarkReadRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match notification_service
        .mark_read(user.id, request.into_inner().notification_ids)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(MarkReadResponse { updated })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn notification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notifications")
            .route(web::get().to(list_notifications))
            .default_service(web::route().to(super::method_not_allowed)),
    )
    .service(
        web::resource("/notifications/read")
            .route(web::post().to(mark_notifications_read))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

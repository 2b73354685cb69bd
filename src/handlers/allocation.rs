use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::AllocationService;

#[utoipa::path(
    post,
    path = "/allocations",
    tag = "allocations",
    request_body = AllocateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The persisted allocation", body = AllocationResponse),
        (status = 400, description = "Inactive distribution or insufficient points"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn allocate_points(
    allocation_service: web::Data<AllocationService>,
    req: HttpRequest,
    request: web::Json<AllocateRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match allocation_service
        .allocate_points(user.id, request.into_inner())
        .await
    {
        Ok(allocation) => Ok(HttpResponse::Ok().json(allocation)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/allocations",
    tag = "allocations",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's allocations", body = [AllocationWithContext]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_allocations(
    allocation_service: web::Data<AllocationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match allocation_service.list_user_allocations(user.id).await {
        Ok(allocations) => Ok(HttpResponse::Ok().json(allocations)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn allocation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/allocations")
            .route(web::post().to(allocate_points))
            .route(web::get().to(get_allocations))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

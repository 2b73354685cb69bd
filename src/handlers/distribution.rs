use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::DistributionService;

#[utoipa::path(
    post,
    path = "/distributions",
    tag = "distributions",
    request_body = CreateDistributionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Distribution created", body = DistributionResponse),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_distribution(
    distribution_service: web::Data<DistributionService>,
    req: HttpRequest,
    request: web::Json<CreateDistributionRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;
    user.require_admin()?;

    match distribution_service
        .create_distribution(user.id, request.into_inner())
        .await
    {
        Ok(distribution) => Ok(HttpResponse::Created().json(distribution)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/distributions",
    tag = "distributions",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Distributions visible to the caller", body = [DistributionResponse])
    )
)]
pub async fn list_distributions(
    distribution_service: web::Data<DistributionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match distribution_service.list_distributions(user.is_admin()).await {
        Ok(distributions) => Ok(HttpResponse::Ok().json(distributions)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/distributions/{id}",
    tag = "distributions",
    params(
        ("id" = Uuid, Path, description = "Distribution id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Distribution with items and allocations", body = DistributionDetailResponse),
        (status = 404, description = "Distribution not found")
    )
)]
pub async fn get_distribution(
    distribution_service: web::Data<DistributionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let _user = require_user(&req)?;

    match distribution_service.get_distribution(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(detail)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/distributions/{id}",
    tag = "distributions",
    request_body = UpdateDistributionRequest,
    params(
        ("id" = Uuid, Path, description = "Distribution id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Updated distribution", body = DistributionResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Distribution not found")
    )
)]
pub async fn update_distribution(
    distribution_service: web::Data<DistributionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateDistributionRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;
    user.require_admin()?;

    match distribution_service
        .update_distribution(path.into_inner(), request.into_inner())
        .await
    {
        Ok(distribution) => Ok(HttpResponse::Ok().json(distribution)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/distributions/{id}",
    tag = "distributions",
    params(
        ("id" = Uuid, Path, description = "Distribution id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Distribution deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Distribution not found")
    )
)]
pub async fn delete_distribution(
    distribution_service: web::Data<DistributionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;
    user.require_admin()?;

    match distribution_service
        .delete_distribution(path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn distribution_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/distributions")
            .route(web::post().to(create_distribution))
            .route(web::get().to(list_distributions))
            .default_service(web::route().to(super::method_not_allowed)),
    )
    .service(
        web::resource("/distributions/{id}")
            .route(web::get().to(get_distribution))
            .route(web::put().to(update_distribution))
            .route(web::delete().to(delete_distribution))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

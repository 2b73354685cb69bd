use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/me",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's user row", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_me(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;

    match user_service.get_profile(user.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(profile)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/me")
            .route(web::get().to(get_me))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

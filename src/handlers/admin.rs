use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::require_user;
use crate::models::*;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every user, oldest first", body = [UserResponse]),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = require_user(&req)?;
    user.require_admin()?;

    match user_service.list_users().await {
        Ok(users) => Ok(HttpResponse::Ok().json(users)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin").service(
            web::resource("/users")
                .route(web::get().to(list_users))
                .default_service(web::route().to(super::method_not_allowed)),
        ),
    );
}
